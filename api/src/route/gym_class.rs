use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    booking::{show_my_booked_classes, show_my_history, toggle_booking},
    gym_class::{
        delete_gym_class, register_gym_class, show_gym_class, show_gym_class_list,
        update_gym_class,
    },
};

pub fn build_gym_class_routers() -> Router<AppRegistry> {
    let gym_class_routers = Router::new()
        .route("/", get(show_gym_class_list))
        .route("/", post(register_gym_class))
        .route("/bookings/me", get(show_my_booked_classes))
        .route("/history/me", get(show_my_history))
        .route("/:gym_class_id", get(show_gym_class))
        .route("/:gym_class_id", put(update_gym_class))
        .route("/:gym_class_id", delete(delete_gym_class))
        .route("/:gym_class_id/booking-toggle", post(toggle_booking));

    Router::new().nest("/gym-classes", gym_class_routers)
}
