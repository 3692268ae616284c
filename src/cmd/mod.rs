//! Command module structure for etiquetas CLI

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use etiquetas::config::Config;
use etiquetas::reference::Table;
use etiquetas::session::Session;
use etiquetas::ui;

pub mod generate;
pub mod init;
pub mod tables;
pub mod util;
pub mod wizard;

/// Load the merged configuration.
pub fn load_config() -> Result<Config> {
    Config::load().context("Failed to load configuration")
}

/// Fetch every reference table and open a session, with a progress bar
/// while the tables load.
pub fn open_session(config: &Config, data_dir: Option<&Path>) -> Result<Session> {
    let source = config.reference_source(data_dir);

    let pb = if ui::is_quiet() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(Table::ALL.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );
    pb.set_message(format!("Loading {}", source.describe()));

    let session = Session::open(source.as_ref(), config.labels.to_rules(), &mut |table| {
        pb.inc(1);
        pb.set_message(table.to_string());
    });
    pb.finish_and_clear();

    session.with_context(|| format!("Failed to load reference tables from {}", source.describe()))
}
