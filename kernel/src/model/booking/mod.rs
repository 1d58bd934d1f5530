use crate::model::id::UserId;

pub mod event;

// トグル操作の結果。
// Booked は予約が作成されたこと、Unbooked は予約が削除されたことを表す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked,
    Unbooked,
}

// 参加者一覧の表示に使うユーザー情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingUser {
    pub user_id: UserId,
    pub user_name: String,
}
