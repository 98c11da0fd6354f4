pub mod assets;
pub mod cache;
pub mod order_service;
pub mod orders;
pub mod roster;
pub mod sheets;
pub mod users;
