use crate::{extractor::AuthorizedUser, model::user::UserResponse};
use axum::Json;

pub async fn show_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}
