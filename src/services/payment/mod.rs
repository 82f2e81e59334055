pub mod cash;
pub mod interface;
pub mod paypal;
pub mod stripe;
