//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument and return raw rows.

pub mod change_log_repo;
pub mod entry_repo;
pub mod user_repo;

pub use change_log_repo::ChangeLogRepo;
pub use entry_repo::EntryRepo;
pub use user_repo::UserRepo;
