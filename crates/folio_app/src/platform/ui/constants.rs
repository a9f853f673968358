use std::time::Duration;

pub const QUIT_COMMAND: &str = "/quit";
pub const TOGGLE_COMMAND: &str = "/toggle";
pub const QUICK_REPLY_PREFIX: &str = "/quick ";
pub const ENTER_KEY: &str = "Enter";

/// How often the effect runner polls the engine for finished requests.
pub const ENGINE_POLL_INTERVAL: Duration = Duration::from_millis(20);
