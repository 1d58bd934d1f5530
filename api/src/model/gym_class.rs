use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    gym_class::{
        event::{CreateGymClass, UpdateGymClass},
        GymClass,
    },
    id::{GymClassId, UserId},
};
use serde::{Deserialize, Serialize};

use crate::model::booking::AttendeeResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymClassListQuery {
    #[serde(default)]
    pub include_past: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGymClassRequest {
    #[garde(length(min = 1))]
    pub gym_class_name: String,
    #[garde(skip)]
    pub started_at: DateTime<Utc>,
    #[garde(range(min = 0))]
    pub duration_minutes: i32,
    #[garde(skip)]
    pub description: String,
}

impl From<CreateGymClassRequest> for CreateGymClass {
    fn from(value: CreateGymClassRequest) -> Self {
        let CreateGymClassRequest {
            gym_class_name,
            started_at,
            duration_minutes,
            description,
        } = value;
        CreateGymClass {
            gym_class_name,
            started_at,
            duration_minutes,
            description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGymClassRequest {
    #[garde(length(min = 1))]
    pub gym_class_name: String,
    #[garde(skip)]
    pub started_at: DateTime<Utc>,
    #[garde(range(min = 0))]
    pub duration_minutes: i32,
    #[garde(skip)]
    pub description: String,
}

#[derive(new)]
pub struct UpdateGymClassRequestWithIds(GymClassId, UserId, UpdateGymClassRequest);

impl From<UpdateGymClassRequestWithIds> for UpdateGymClass {
    fn from(value: UpdateGymClassRequestWithIds) -> Self {
        let UpdateGymClassRequestWithIds(
            gym_class_id,
            requested_user,
            UpdateGymClassRequest {
                gym_class_name,
                started_at,
                duration_minutes,
                description,
            },
        ) = value;
        UpdateGymClass {
            gym_class_id,
            gym_class_name,
            started_at,
            duration_minutes,
            description,
            requested_user,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymClassResponse {
    pub gym_class_id: GymClassId,
    pub gym_class_name: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub description: String,
    pub attendees: Vec<AttendeeResponse>,
}

impl From<GymClass> for GymClassResponse {
    fn from(value: GymClass) -> Self {
        let GymClass {
            gym_class_id,
            gym_class_name,
            started_at,
            duration_minutes,
            description,
            attendees,
        } = value;
        Self {
            gym_class_id,
            gym_class_name,
            started_at,
            duration_minutes,
            description,
            attendees: attendees.into_iter().map(AttendeeResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymClassesResponse {
    pub items: Vec<GymClassResponse>,
}

impl From<Vec<GymClass>> for GymClassesResponse {
    fn from(value: Vec<GymClass>) -> Self {
        Self {
            items: value.into_iter().map(GymClassResponse::from).collect(),
        }
    }
}
