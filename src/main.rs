//! CLI entry point for etiquetas.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.quiet {
        std::env::set_var("ETIQUETAS_QUIET", "1");
    }
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Init { force, templates } => cmd::init::cmd_init(force, templates),
        Commands::Tables { table } => cmd::tables::cmd_tables(data_dir, table.as_deref()),
        Commands::Check { selection } => cmd::generate::cmd_check(data_dir, &selection),
        Commands::Preview { selection, json } => {
            cmd::generate::cmd_preview(data_dir, &selection, json)
        }
        Commands::Generate { selection, output } => {
            cmd::generate::cmd_generate(data_dir, &selection, &output)
        }
        Commands::Wizard { output } => cmd::wizard::cmd_wizard(data_dir, &output),
        Commands::Version { verbose } => cmd::util::cmd_version(verbose),
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
        Commands::Man { out_dir } => cmd::util::cmd_man(out_dir.as_ref()),
    }
}
