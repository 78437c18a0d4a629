mod config;
mod element;
mod error;
mod format;
mod navigation;
mod parser;

pub use config::{Config, LoggingConfig, NavigationConfig};
pub use element::{Dialogue, ScriptElement};
pub use error::{Error, Result};
pub use format::format_inline;
pub use navigation::{DEFAULT_WINDOW_SIZE, NavCommand, Navigator, SubscriptionId, Window};

/// Parse Fountain-style screenplay text into a vector of elements.
pub fn parse(script: &str) -> Vec<ScriptElement> {
    parser::parse(script)
}

/// Parse a script and load it into a navigator configured from `config`.
pub fn follow_with_config(script: &str, config: &Config) -> Result<Navigator> {
    let mut navigator = Navigator::from_config(&config.navigation)?;
    navigator.load(parse(script));
    Ok(navigator)
}

/// Parse a script and load it into a navigator using the default config.
pub fn follow(script: &str) -> Result<Navigator> {
    follow_with_config(script, &Config::compiled_default())
}
