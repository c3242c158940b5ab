//! goimportfmt - Batch normalizer for Go import blocks

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::path::Path;

use goimportfmt::process::resolve_root;
use goimportfmt::{
    init_logging, parse_args, walk_tree, CliArgs, Config, ConsoleReporter, GoImports, Result,
    RewriteMode, WalkOptions,
};

fn main() {
    let args = parse_args();
    init_logging(if args.debug {
        "debug"
    } else if args.silent {
        "warn"
    } else {
        "info"
    });

    if let Err(err) = run(&args) {
        tracing::error!("fail on doing format: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let root = resolve_root(&args.dir)?;
    let config = build_config(args, &root)?;

    let options = WalkOptions {
        exclusions: config.exclusions(),
        organize: config.organize_options(),
        mode: if args.list {
            RewriteMode::List
        } else {
            RewriteMode::Write
        },
    };

    let mut reporter = ConsoleReporter::stdout();
    let summary = walk_tree(&args.dir, &GoImports, &options, &mut reporter)?;

    if args.list {
        tracing::info!(
            processed = summary.processed(),
            would_rewrite = summary.would_rewrite,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            "done"
        );
    } else {
        tracing::info!(
            processed = summary.processed(),
            rewritten = summary.rewritten,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            "done"
        );
    }
    Ok(())
}

/// Build configuration from CLI args and config files
///
/// An explicit `--config` file replaces discovery; otherwise config files
/// are discovered from the scan root upward. CLI flags override both.
fn build_config(args: &CliArgs, root: &Path) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!(path = %config_path.display(), "using explicit config file");
        Config::from_toml_file(config_path).map_err(|e| {
            e.context(format!("failed to load config file {}", config_path.display()))
        })?
    } else {
        let discovered = Config::discover_config_files(root);
        if discovered.is_empty() {
            tracing::debug!(root = %root.display(), "no config files discovered");
        }
        for f in &discovered {
            tracing::debug!(path = %f.display(), "discovered config file");
        }
        Config::from_discovered_files(root)
    };

    // Override with CLI arguments
    if !args.exclude_dir.is_empty() {
        config.exclude_dir.clone_from(&args.exclude_dir);
    }
    if let Some(local) = &args.local {
        config.local_prefix = Some(local.clone());
    }

    tracing::debug!(?config, "configuration");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}
