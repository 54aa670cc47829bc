mod loop_handler;

pub use loop_handler::{drain_events, run, run_headless};
