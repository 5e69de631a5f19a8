//! Config Command
//!
//! Manage clientscope configuration.
//!
//! Usage:
//!   clientscope config show [-f json|yaml|toml]
//!   clientscope config path
//!   clientscope config init [-g] [--force]

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::load_config;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the effective configuration (merged from all sources)
pub fn show(config_path: Option<&Path>, format: &str) -> Result<()> {
    let config = load_config(config_path)?;
    println!("{}", ConfigLoader::render(&config, format)?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let dir = ConfigLoader::init_global(force)?;
    let out = Output::new();
    out.success("Initialized global configuration");
    out.info(&format!("Directory: {}", dir.display()));
    Ok(())
}

/// Initialize project configuration in the current directory
pub fn init_project(force: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    let config_path = ConfigLoader::init_project(&root, force)?;
    let out = Output::new();
    out.success("Initialized project configuration");
    out.info(&format!("Config: {}", config_path.display()));
    Ok(())
}
