pub mod menu;
pub mod roster;
pub mod user;
