//! Check Command
//!
//! Verifies that the configured LLM and search providers are reachable with
//! the current credentials.

use std::path::Path;

use tokio::runtime::Runtime;

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::types::{Result, ScopeError};

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let out = Output::new();
    let ctx = CommandContext::load(config_path)?;
    let rt = Runtime::new()?;

    out.header("Provider health");
    let (llm, search) = rt.block_on(async {
        futures::join!(ctx.provider.health_check(), ctx.search.health_check())
    });

    let llm_ok = report(
        &out,
        &format!("LLM ({}, {})", ctx.provider.name(), ctx.provider.model()),
        llm,
    );
    let search_ok = report(&out, &format!("Search ({})", ctx.search.name()), search);

    if llm_ok && search_ok {
        Ok(())
    } else {
        Err(ScopeError::Config(
            "one or more providers failed the health check".to_string(),
        ))
    }
}

fn report(out: &Output, label: &str, outcome: Result<bool>) -> bool {
    match outcome {
        Ok(true) => {
            out.success(&format!("{} reachable", label));
            true
        }
        Ok(false) => {
            out.warning(&format!("{} responded but reported unhealthy", label));
            false
        }
        Err(e) => {
            out.error(&format!("{}: {}", label, e));
            false
        }
    }
}
