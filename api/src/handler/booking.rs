use crate::{
    extractor::AuthorizedUser,
    model::{
        booking::{BookingOutcomeName, BookingToggleResponse},
        gym_class::GymClassesResponse,
    },
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use kernel::model::{booking::event::ToggleBooking, id::GymClassId};
use registry::AppRegistry;
use shared::error::AppResult;

// 予約のトグル操作。
// 認証はエクストラクタで済んでいるため、ここに来た時点で user は解決済み。
// 目的の状態は指定できず、現在の状態が反転するだけである
pub async fn toggle_booking(
    user: AuthorizedUser,
    Path(gym_class_id): Path<GymClassId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingToggleResponse>> {
    let event = ToggleBooking::new(gym_class_id, user.id(), Utc::now());

    registry
        .booking_repository()
        .toggle(event)
        .await
        .map(|outcome| {
            Json(BookingToggleResponse {
                gym_class_id,
                outcome: BookingOutcomeName::from(outcome),
            })
        })
}

pub async fn show_my_booked_classes(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<GymClassesResponse>> {
    registry
        .gym_class_repository()
        .find_booked_by_user_id(user.id())
        .await
        .map(GymClassesResponse::from)
        .map(Json)
}

pub async fn show_my_history(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<GymClassesResponse>> {
    let now = Utc::now();

    registry
        .gym_class_repository()
        .find_history_by_user_id(user.id(), now)
        .await
        .map(GymClassesResponse::from)
        .map(Json)
}
