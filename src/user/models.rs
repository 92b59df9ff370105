use crate::http::ApiResponder;
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    /// RFC 3339 UTC timestamp, second precision.
    pub created_at: String,
}

impl ApiResponder for User {
    fn unit() -> &'static str {
        "user"
    }
    fn article() -> &'static str {
        "A"
    }
}

/// Body accepted by both user creation and update. Absent fields decode as
/// empty strings; unknown keys such as `id` or `created_at` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
}
