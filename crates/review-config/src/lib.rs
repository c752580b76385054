pub mod config;
pub mod paths;

pub use config::{Config, HostawayConfig, ServerConfig};
pub use paths::PathManager;
