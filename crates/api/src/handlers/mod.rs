pub mod auth;
pub mod calendar;
pub mod logs;
pub mod upload;
pub mod users;
