// Export our modules for use in the binary and integration tests
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event;
pub mod logging;
pub mod poller;
pub mod selection;
pub mod store;
pub mod terminal;
pub mod ui;
pub mod view;

pub use domain::{Drilldown, ShipStatus};
