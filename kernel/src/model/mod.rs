pub mod auth;
pub mod booking;
pub mod gym_class;
pub mod id;
pub mod role;
pub mod user;
