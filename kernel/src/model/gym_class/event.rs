use crate::model::id::{GymClassId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new)]
pub struct CreateGymClass {
    pub gym_class_name: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub description: String,
}

#[derive(Debug, new)]
pub struct UpdateGymClass {
    pub gym_class_id: GymClassId,
    pub gym_class_name: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub description: String,
    pub requested_user: UserId,
}

#[derive(Debug, new)]
pub struct DeleteGymClass {
    pub gym_class_id: GymClassId,
    pub requested_user: UserId,
}
