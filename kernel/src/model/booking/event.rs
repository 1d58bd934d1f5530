use crate::model::id::{GymClassId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new)]
pub struct ToggleBooking {
    pub gym_class_id: GymClassId,
    pub user_id: UserId,
    pub booked_at: DateTime<Utc>,
}
