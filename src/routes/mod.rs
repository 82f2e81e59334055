pub mod blog;
pub mod booking;
pub mod chat;
pub mod deletion;
pub mod health;
pub mod vehicle;
