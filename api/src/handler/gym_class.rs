use crate::{
    extractor::AuthorizedUser,
    model::gym_class::{
        CreateGymClassRequest, GymClassListQuery, GymClassResponse, GymClassesResponse,
        UpdateGymClassRequest, UpdateGymClassRequestWithIds,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    gym_class::{event::DeleteGymClass, GymClassListOptions},
    id::GymClassId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_gym_class_list(
    Query(query): Query<GymClassListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<GymClassesResponse>> {
    // 「現在時刻」はリクエストごとにここで一度だけ評価し、
    // 以降の絞り込みはすべて同じ値を使う
    let now = Utc::now();

    registry
        .gym_class_repository()
        .find_all(GymClassListOptions::new(query.include_past, now))
        .await
        .map(GymClassesResponse::from)
        .map(Json)
}

pub async fn show_gym_class(
    Path(gym_class_id): Path<GymClassId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<GymClassResponse>> {
    registry
        .gym_class_repository()
        .find_by_id(gym_class_id)
        .await
        .and_then(|gc| match gc {
            Some(gc) => Ok(Json(gc.into())),
            None => Err(AppError::EntityNotFound(format!(
                "ジムクラス（{}）が見つかりませんでした。",
                gym_class_id
            ))),
        })
}

pub async fn register_gym_class(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateGymClassRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    registry
        .gym_class_repository()
        .create(req.into())
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn update_gym_class(
    user: AuthorizedUser,
    Path(gym_class_id): Path<GymClassId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateGymClassRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let update_gym_class = UpdateGymClassRequestWithIds::new(gym_class_id, user.id(), req);
    registry
        .gym_class_repository()
        .update(update_gym_class.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_gym_class(
    user: AuthorizedUser,
    Path(gym_class_id): Path<GymClassId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let delete_gym_class = DeleteGymClass {
        gym_class_id,
        requested_user: user.id(),
    };
    registry
        .gym_class_repository()
        .delete(delete_gym_class)
        .await
        .map(|_| StatusCode::OK)
}
