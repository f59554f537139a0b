use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::age::age_on;
use super::repo_types::UserRow;

/// Query string of `GET /api/users`. Kept as raw strings so malformed values
/// can fall back to defaults instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub filter_niveau: Option<String>,
    pub filter_age_min: Option<String>,
    pub filter_age_max: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// First occurrence of each key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut params.search,
                "filter_niveau" => &mut params.filter_niveau,
                "filter_age_min" => &mut params.filter_age_min,
                "filter_age_max" => &mut params.filter_age_max,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Body of `POST /api/users` and `PUT /api/users/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct UserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_naissance: Option<String>,
    pub niveau_natation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_naissance: String,
    pub age: i32,
    pub niveau_natation: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl UserResponse {
    pub fn from_row(row: UserRow, today: Date) -> Self {
        let date_naissance = row.date_naissance.unwrap_or_default();
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            age: age_on(&date_naissance, today),
            date_naissance,
            niveau_natation: row.niveau_natation.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersPage {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
