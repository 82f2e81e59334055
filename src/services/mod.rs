pub mod blog_service;
pub mod chat_service;
pub mod distance_service;
pub mod notification_service;
pub mod payment;
pub mod pricing_service;
pub mod reservation_service;
