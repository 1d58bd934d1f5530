use crate::model::{
    booking::{event::ToggleBooking, BookingOutcome, BookingUser},
    id::{GymClassId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 予約のトグル操作を行う。
    // 予約が無ければ作成して Booked を、あれば削除して Unbooked を返す。
    // 呼び出し側から目的の状態を指定することはできない
    async fn toggle(&self, event: ToggleBooking) -> AppResult<BookingOutcome>;
    // 指定のユーザーがジムクラスを予約中かを返す
    async fn is_booked(&self, user_id: UserId, gym_class_id: GymClassId) -> AppResult<bool>;
    // ジムクラスの参加者一覧を取得する
    async fn find_users_by_class_id(&self, gym_class_id: GymClassId)
        -> AppResult<Vec<BookingUser>>;
}
