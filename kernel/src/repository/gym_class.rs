use crate::model::{
    gym_class::{
        event::{CreateGymClass, DeleteGymClass, UpdateGymClass},
        GymClass, GymClassListOptions,
    },
    id::{GymClassId, UserId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[async_trait]
pub trait GymClassRepository: Send + Sync {
    // ジムクラスを登録する
    async fn create(&self, event: CreateGymClass) -> AppResult<GymClassId>;
    // ジムクラスの内容を更新する
    async fn update(&self, event: UpdateGymClass) -> AppResult<()>;
    // ジムクラスを削除する。紐づく予約も一緒に削除される
    async fn delete(&self, event: DeleteGymClass) -> AppResult<()>;
    // ジムクラスの一覧を開始時刻の昇順で取得する
    async fn find_all(&self, options: GymClassListOptions) -> AppResult<Vec<GymClass>>;
    // ユーザーが予約中のジムクラス一覧を取得する（時刻での絞り込みなし）
    async fn find_booked_by_user_id(&self, user_id: UserId) -> AppResult<Vec<GymClass>>;
    // ユーザーが参加済み（開始時刻が now より前）のジムクラス一覧を取得する
    async fn find_history_by_user_id(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<GymClass>>;
    // ジムクラスを参加者一覧つきで 1 件取得する
    async fn find_by_id(&self, gym_class_id: GymClassId) -> AppResult<Option<GymClass>>;
}
