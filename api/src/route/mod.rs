pub mod auth;
pub mod gym_class;
pub mod health;
pub mod user;
pub mod v1;
