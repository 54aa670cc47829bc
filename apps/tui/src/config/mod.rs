mod settings;

pub use settings::{
    ConsoleConfig, DEFAULT_LOG_FILE, DEFAULT_TIMEOUT, ENV_API_URL, ENV_DEBUG, ENV_LOG_FILE,
    ENV_POLL_INTERVAL_MS, ENV_TIMEOUT_MS,
};
