//! Marginalia - a terminal rich-text editor with a selection toolbar.
//!
//! # Usage
//!
//! ```bash
//! marginalia
//! marginalia --user Grace --rate 80
//! marginalia --history-delay 250 --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use marginalia::app::App;
use marginalia::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use marginalia::editor::EditorOptions;
use marginalia::perf;
use marginalia::toolbar::Rate;

/// A terminal rich-text editor with a selection toolbar
#[derive(Parser, Debug)]
#[command(name = "marginalia", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Name shown in the header
    #[arg(long, value_name = "NAME")]
    user: Option<String>,

    /// Initial highlight rate (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    rate: Option<u8>,

    /// Window in milliseconds within which edits merge into one undo step
    #[arg(long, value_name = "MS")]
    history_delay: Option<u64>,

    /// Maximum number of undo steps kept
    #[arg(long, value_name = "N")]
    history_max_stack: Option<usize>,

    /// Record toolbar formatting in undo history too
    #[arg(long)]
    history_all_sources: bool,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed frame/event debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "configuration resolved");

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("MARGINALIA_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let mut app = App::new()
        .with_rate(effective.rate.map_or_else(Rate::default, Rate::new))
        .with_editor_options(EditorOptions {
            history: effective.history_options(),
        })
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );
    if let Some(user) = effective.user {
        app = app.with_user(user);
    }

    app.run().context("Application error")
}
