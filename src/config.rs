use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::board::SimulatedBoard;
use crate::http::command::CommandMatch;
use crate::http::handler::{DEFAULT_RECV_BUFFER_SIZE, MAX_RECV_BUFFER_SIZE};

/// Runtime configuration.
///
/// Defaults match the board firmware: port 80 on every interface, one TCP
/// segment per data event, permissive command matching. A YAML file named by
/// `CONFIG` may override any field; `LISTEN` overrides the bind address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen_addr: String,
    pub recv_buffer_size: usize,
    pub close_after_response: bool,
    pub command_match: CommandMatch,
    pub bind_attempts: u32,
    pub bind_retry_delay_ms: u64,
    pub board: BoardConfig,
}

/// Initial state of the simulated board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub button_a_pressed: bool,
    pub button_b_pressed: bool,
    /// Raw 12-bit code on the temperature channel. 876 reads about 27 °C.
    pub adc_raw: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:80".to_string(),
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            close_after_response: true,
            command_match: CommandMatch::Substring,
            bind_attempts: 3,
            bind_retry_delay_ms: 100,
            board: BoardConfig::default(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            button_a_pressed: false,
            button_b_pressed: false,
            adc_raw: 876,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` to resolve environment variables.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("CONFIG") {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("listen_addr must not be empty"));
        }
        if self.recv_buffer_size == 0 {
            return Err(ConfigError::Invalid("recv_buffer_size must be greater than zero"));
        }
        if self.recv_buffer_size > MAX_RECV_BUFFER_SIZE {
            return Err(ConfigError::Invalid("recv_buffer_size must not exceed 65536"));
        }
        if self.bind_attempts == 0 {
            return Err(ConfigError::Invalid("bind_attempts must be at least 1"));
        }
        if self.board.adc_raw > 0x0FFF {
            return Err(ConfigError::Invalid("board.adc_raw must fit in 12 bits"));
        }
        Ok(())
    }

    pub fn bind_retry_delay(&self) -> Duration {
        Duration::from_millis(self.bind_retry_delay_ms)
    }
}

impl BoardConfig {
    /// Builds a simulated board in the configured state.
    pub fn simulated(&self) -> SimulatedBoard {
        let board = SimulatedBoard::new(self.adc_raw);
        board.set_button_a_pressed(self.button_a_pressed);
        board.set_button_b_pressed(self.button_b_pressed);
        board
    }
}
