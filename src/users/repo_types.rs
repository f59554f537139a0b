use sqlx::FromRow;
use time::OffsetDateTime;

/// Row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_naissance: Option<String>, // NULL in rows older than the column
    pub niveau_natation: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Writable fields, shared by insert and update.
#[derive(Debug, Clone)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_naissance: String,
    pub niveau_natation: String,
}
