use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tictactoe_common::games::tictactoe::{DEFAULT_PLAYER_NAME, Difficulty};

use crate::config::Validate;

pub const DEFAULT_CONFIG_PATH: &str = "tictactoe_server.yaml";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Directory holding `index.html`.
    pub static_files_path: String,
    pub default_player_name: String,
    pub default_mode: Difficulty,
    /// Fixed seed for the bot's randomness; drawn at startup when absent.
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.bind_address
            .parse()
            .map_err(|e| format!("Invalid bind address '{}': {}", self.bind_address, e))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            static_files_path: ".".to_string(),
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
            default_mode: Difficulty::Easy,
            rng_seed: None,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if self.static_files_path.trim().is_empty() {
            return Err("Static files path cannot be empty".to_string());
        }
        if self.default_player_name.trim().is_empty() {
            return Err("Default player name cannot be empty".to_string());
        }
        Ok(())
    }
}
