pub mod env;
mod loader;

pub use env::{AppConfig, BackendConfig, DirectoryConfig};
pub use loader::load_config;
