use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use time::Date;
use tracing::{debug, info};

use super::dto::{ListParams, UserRequest, UserResponse, UsersPage};
use super::filter::UserFilter;
use super::pagination::PageRequest;
use super::repo;
use super::repo_types::UserFields;
use crate::error::ApiError;

/// `local@domain.tld`: the domain needs at least one dot.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Blank means absent; the value itself is kept as sent.
fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{} is required", field))),
    }
}

/// Checks presence of every field and the shape of the email.
pub fn validate(req: UserRequest) -> Result<UserFields, ApiError> {
    let fields = UserFields {
        first_name: required(req.first_name, "first_name")?,
        last_name: required(req.last_name, "last_name")?,
        email: required(req.email, "email")?,
        date_naissance: required(req.date_naissance, "date_naissance")?,
        niveau_natation: required(req.niveau_natation, "niveau_natation")?,
    };
    if !is_valid_email(&fields.email) {
        return Err(ApiError::Validation("invalid email".into()));
    }
    Ok(fields)
}

/// Filtered, paginated listing. The page and the total come from two separate
/// reads with no transaction between them.
pub async fn list_users(
    db: &SqlitePool,
    params: &ListParams,
    today: Date,
) -> Result<UsersPage, ApiError> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    let filter = UserFilter::from_params(
        params.search.as_deref(),
        params.filter_niveau.as_deref(),
        params.filter_age_min.as_deref(),
        params.filter_age_max.as_deref(),
    );

    let rows = repo::find(db, &filter, page.limit, page.offset()).await?;
    let total = repo::count(db, &filter).await?;
    debug!(
        filtered = !filter.is_empty(),
        total,
        returned = rows.len(),
        "listed users"
    );

    Ok(UsersPage {
        users: rows
            .into_iter()
            .map(|row| UserResponse::from_row(row, today))
            .collect(),
        total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages(total),
    })
}

pub async fn get_user(db: &SqlitePool, id: i64, today: Date) -> Result<UserResponse, ApiError> {
    let row = repo::get(db, id).await?.ok_or(ApiError::NotFound)?;
    Ok(UserResponse::from_row(row, today))
}

pub async fn create_user(
    db: &SqlitePool,
    req: UserRequest,
    today: Date,
) -> Result<UserResponse, ApiError> {
    let fields = validate(req)?;
    let row = repo::insert(db, &fields).await?;
    info!(user_id = row.id, email = %row.email, "user created");
    Ok(UserResponse::from_row(row, today))
}

pub async fn update_user(
    db: &SqlitePool,
    id: i64,
    req: UserRequest,
    today: Date,
) -> Result<UserResponse, ApiError> {
    let fields = validate(req)?;
    let row = repo::update(db, id, &fields)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(user_id = row.id, "user updated");
    Ok(UserResponse::from_row(row, today))
}

pub async fn delete_user(db: &SqlitePool, id: i64) -> Result<(), ApiError> {
    if !repo::delete(db, id).await? {
        return Err(ApiError::NotFound);
    }
    info!(user_id = id, "user deleted");
    Ok(())
}
