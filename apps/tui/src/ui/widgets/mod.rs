pub mod badge;
pub mod hints;
pub mod modal;
pub mod popup;
pub mod tables;
