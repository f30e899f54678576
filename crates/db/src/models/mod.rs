//! Row structs for the PostgreSQL tables.
//!
//! Each row converts into its `cuadrante_core` domain type with
//! `TryFrom`, failing when stored text no longer parses (bad date key,
//! unknown role or action).

pub mod change_log;
pub mod entry;
pub mod user;
