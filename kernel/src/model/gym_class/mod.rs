use crate::model::{booking::BookingUser, id::GymClassId};
use chrono::{DateTime, Utc};
use derive_new::new;

pub mod event;

#[derive(Debug)]
pub struct GymClass {
    pub gym_class_id: GymClassId,
    pub gym_class_name: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub description: String,
    pub attendees: Vec<BookingUser>,
}

// 一覧取得の絞り込み条件。
// now はクエリ側で時計を読まずに済むよう、必ず呼び出し元から渡す
#[derive(Debug, Clone, Copy, new)]
pub struct GymClassListOptions {
    pub include_past: bool,
    pub now: DateTime<Utc>,
}
