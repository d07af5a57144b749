//! tasker init command implementation
//!
//! Creates an empty task store and, on request, a `.tasker.toml` next to it.

use std::path::PathBuf;

use crate::cli::StoreContext;
use crate::config::{Config, StoreConfig};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::InitOutcome;

/// Options for `tasker init`
pub(crate) struct InitOptions {
    pub write_config: bool,
    pub ctx: StoreContext,
    pub output: OutputOptions,
}

#[derive(serde::Serialize)]
struct InitReport {
    store: PathBuf,
    created: InitCreated,
}

#[derive(serde::Serialize)]
struct InitCreated {
    store: bool,
    config: bool,
}

pub(crate) fn run(options: InitOptions) -> Result<()> {
    let ctx = options.ctx;
    let created_store = ctx.store.init()? == InitOutcome::Created;
    let created_config = if options.write_config {
        ensure_config(&ctx)?
    } else {
        false
    };

    let store_path = ctx.store.path().to_path_buf();
    let header = if created_store {
        "Initialized task store"
    } else {
        "Task store already initialized"
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("Store", store_path.display().to_string());
    if created_config {
        human.push_summary("Config", ctx.config_path.display().to_string());
    } else if options.write_config {
        human.push_warning(format!(
            "{} already exists; left unchanged",
            ctx.config_path.display()
        ));
    }
    human.push_next_step("tasker add --name \"...\"");

    let report = InitReport {
        store: store_path,
        created: InitCreated {
            store: created_store,
            config: created_config,
        },
    };

    emit_success(options.output, "init", &report, Some(&human))
}

/// Write the effective store settings to the config path if nothing is there.
fn ensure_config(ctx: &StoreContext) -> Result<bool> {
    if ctx.config_path.exists() {
        return Ok(false);
    }

    // Keep the store path relative when it sits under the config directory.
    let store_path = ctx.store.path();
    let path = ctx
        .config_path
        .parent()
        .and_then(|base| store_path.strip_prefix(base).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or(store_path)
        .to_path_buf();

    let config = Config {
        store: StoreConfig {
            path,
            ..ctx.config.store.clone()
        },
    };
    config.save(&ctx.config_path)?;
    tracing::info!(path = %ctx.config_path.display(), "wrote config");
    Ok(true)
}
