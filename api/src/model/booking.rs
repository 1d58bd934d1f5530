use kernel::model::{
    booking::{BookingOutcome, BookingUser},
    id::{GymClassId, UserId},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeResponse {
    pub user_id: UserId,
    pub user_name: String,
}

impl From<BookingUser> for AttendeeResponse {
    fn from(value: BookingUser) -> Self {
        let BookingUser { user_id, user_name } = value;
        Self { user_id, user_name }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BookingOutcomeName {
    Booked,
    Unbooked,
}

impl From<BookingOutcome> for BookingOutcomeName {
    fn from(value: BookingOutcome) -> Self {
        match value {
            BookingOutcome::Booked => Self::Booked,
            BookingOutcome::Unbooked => Self::Unbooked,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingToggleResponse {
    pub gym_class_id: GymClassId,
    pub outcome: BookingOutcomeName,
}
