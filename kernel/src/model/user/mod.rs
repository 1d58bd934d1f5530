use crate::model::{id::UserId, role::Role};
use chrono::{DateTime, Utc};

#[derive(Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub registered_at: DateTime<Utc>,
}
