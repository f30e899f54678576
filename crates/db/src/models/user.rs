//! Row model for the `users` table.

use cuadrante_core::types::DbId;
use cuadrante_core::{CoreError, User};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub identifier: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = CoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            identifier: row.identifier,
            role: row.role.parse()?,
        })
    }
}
