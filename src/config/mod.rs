// src/config/mod.rs

pub mod app;
pub mod environment;
pub mod loader;
pub mod validation;

pub use app::{ClientConfig, DEFAULT_BASE_URL};
pub use environment::EnvironmentConfig;
pub use loader::{apply_overrides, load_config, read_config, save_config};
pub use validation::ConfigValidator;
