pub mod help;
pub mod inventory;
pub mod overview;
pub mod ship;
