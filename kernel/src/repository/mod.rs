pub mod auth;
pub mod booking;
pub mod gym_class;
pub mod health;
pub mod user;
