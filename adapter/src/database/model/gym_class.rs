use chrono::{DateTime, Utc};
use kernel::model::{booking::BookingUser, gym_class::GymClass, id::GymClassId};

#[derive(sqlx::FromRow)]
pub struct GymClassRow {
    pub gym_class_id: GymClassId,
    pub gym_class_name: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub description: String,
}

// 参加者一覧は別クエリで取得するため、
// From トレイトの実装の代わりに引数をとる into_gym_class メソッドを定義する
impl GymClassRow {
    pub fn into_gym_class(self, attendees: Vec<BookingUser>) -> GymClass {
        let GymClassRow {
            gym_class_id,
            gym_class_name,
            started_at,
            duration_minutes,
            description,
        } = self;
        GymClass {
            gym_class_id,
            gym_class_name,
            started_at,
            duration_minutes,
            description,
            attendees,
        }
    }
}
