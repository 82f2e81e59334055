pub mod blog;
pub mod deletion;
pub mod options;
pub mod personal_info;
pub mod reservation;
pub mod session;
pub mod trip;
pub mod vehicle;
