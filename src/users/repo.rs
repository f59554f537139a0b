use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use super::filter::UserFilter;
use super::repo_types::{UserFields, UserRow};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, date_naissance, niveau_natation, created_at";

/// One page of filtered users, newest first.
pub async fn find(
    db: &SqlitePool,
    filter: &UserFilter,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<UserRow>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM users", USER_COLUMNS));
    filter.push_where(&mut qb);
    qb.push(" ORDER BY id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    debug!(
        clauses = filter.clauses().len(),
        where_clause = %filter.where_sql(),
        binds = ?filter.binds(),
        limit,
        offset,
        "find users"
    );
    qb.build_query_as::<UserRow>().fetch_all(db).await
}

/// Number of users matching `filter`, ignoring pagination.
pub async fn count(db: &SqlitePool, filter: &UserFilter) -> sqlx::Result<i64> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users");
    filter.push_where(&mut qb);
    qb.build_query_scalar::<i64>().fetch_one(db).await
}

pub async fn get(db: &SqlitePool, id: i64) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &SqlitePool, fields: &UserFields) -> sqlx::Result<UserRow> {
    sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (first_name, last_name, email, date_naissance, niveau_natation)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.email)
    .bind(&fields.date_naissance)
    .bind(&fields.niveau_natation)
    .fetch_one(db)
    .await
}

/// Replaces every writable field. `None` when no row has this id.
pub async fn update(db: &SqlitePool, id: i64, fields: &UserFields) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users
           SET first_name = ?, last_name = ?, email = ?, date_naissance = ?, niveau_natation = ?
         WHERE id = ?
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(&fields.email)
    .bind(&fields.date_naissance)
    .bind(&fields.niveau_natation)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Hard delete. Returns whether a row was removed.
pub async fn delete(db: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
