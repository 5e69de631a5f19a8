//! CLI Common Utilities
//!
//! Shared configuration and collaborator setup for CLI commands.

use std::path::Path;

use crate::ai::provider::{SharedProvider, create_provider};
use crate::config::{Config, ConfigLoader};
use crate::search::{SharedSearch, create_search_provider};
use crate::types::Result;

/// Command execution context
///
/// Resolved configuration plus the two external collaborators built from it.
#[derive(Clone)]
pub struct CommandContext {
    pub config: Config,
    pub provider: SharedProvider,
    pub search: SharedSearch,
}

impl CommandContext {
    /// Load configuration (an explicit file replaces the layered lookup) and
    /// build providers.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)?;
        let provider = create_provider(&config.llm)?;
        let search = create_search_provider(&config.search)?;
        Ok(Self {
            config,
            provider,
            search,
        })
    }
}

/// Layered configuration, or a single file when one is given
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}
