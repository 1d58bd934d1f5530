use kernel::model::{
    booking::BookingUser,
    id::{GymClassId, UserId},
};

// 参加者一覧を取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct ClassAttendeeRow {
    pub gym_class_id: GymClassId,
    pub user_id: UserId,
    pub user_name: String,
}

impl From<ClassAttendeeRow> for BookingUser {
    fn from(value: ClassAttendeeRow) -> Self {
        let ClassAttendeeRow {
            gym_class_id: _,
            user_id,
            user_name,
        } = value;
        BookingUser { user_id, user_name }
    }
}
