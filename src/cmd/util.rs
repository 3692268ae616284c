//! `version`, `man` and `completion`.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, BIN_NAME};
use etiquetas::config::global_config_path;

pub fn cmd_version(verbose: bool) -> Result<()> {
    println!("{} {}", BIN_NAME, env!("CARGO_PKG_VERSION"));

    if verbose {
        println!("commit: {}", env!("GIT_SHA"));
        println!("built: {}", env!("BUILD_DATE"));
        match global_config_path() {
            Some(path) => println!("global config: {}", path.display()),
            None => println!("global config: unavailable"),
        }
    }

    Ok(())
}

/// Write `etiquetas.1` into `out_dir`, or the current directory.
pub fn cmd_man(out_dir: Option<&PathBuf>) -> Result<()> {
    let dir = out_dir.map(PathBuf::as_path).unwrap_or(Path::new("."));
    let mut page = Vec::new();
    clap_mangen::Man::new(Cli::command()).render(&mut page)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.1", BIN_NAME));
    std::fs::write(&path, page).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Man page written to: {}", path.display());
    Ok(())
}

pub fn cmd_completion(shell: Shell) -> Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, &mut std::io::stdout());
    Ok(())
}
