//! CLI argument definitions for etiquetas.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use etiquetas::label::LabelSelection;
use etiquetas::render::OutputFormat;

/// Executable name used for man pages and completion scripts
pub const BIN_NAME: &str = "etiquetas";

#[derive(Parser)]
#[command(name = BIN_NAME)]
#[command(version)]
#[command(about = "Labels for fresh, frozen and thawed fish products", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    etiquetas init              Write .etiquetas/config.md with defaults\n    etiquetas tables            List the options loaded from the reference tables\n    etiquetas wizard            Fill in a label interactively"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read reference tables from CSV files in DIR instead of the spreadsheet
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Label fields given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Read the selection from a YAML or JSON file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
    /// Product base name (PRODUCTOS.NOMBRE_BASE)
    #[arg(long)]
    pub product: Option<String>,
    /// Processing form, e.g. "Filete"
    #[arg(long)]
    pub form: Option<String>,
    /// Product state: fresco, congelado, descongelado
    #[arg(long)]
    pub state: Option<String>,
    /// Production method: capturado or acuicultura
    #[arg(long)]
    pub method: Option<String>,
    /// FAO catch zone (not needed for aquaculture)
    #[arg(long)]
    pub zone: Option<String>,
    /// Fishing gear (not needed for aquaculture)
    #[arg(long)]
    pub gear: Option<String>,
    /// Batch / lot code
    #[arg(long)]
    pub lot: Option<String>,
    /// Expiry date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_name = "DATE")]
    pub expiry: Option<String>,
    /// Freezing date, for frozen and thawed products
    #[arg(long, value_name = "DATE")]
    pub frozen_on: Option<String>,
    /// Thawing date, for thawed products
    #[arg(long, value_name = "DATE")]
    pub thawed_on: Option<String>,
    /// Distributor name (EXPEDIDORES.EXPEDIDOR)
    #[arg(long)]
    pub distributor: Option<String>,
}

impl SelectionArgs {
    /// Build the selection: file values first, then flags on top.
    pub fn to_selection(&self) -> Result<LabelSelection> {
        let mut selection = match &self.from {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read selection from {}", path.display()))?;
                serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse selection file {}", path.display()))?
            }
            None => LabelSelection::default(),
        };

        let overrides = [
            (&self.product, &mut selection.product),
            (&self.form, &mut selection.form),
            (&self.state, &mut selection.state),
            (&self.method, &mut selection.method),
            (&self.zone, &mut selection.zone),
            (&self.gear, &mut selection.gear),
            (&self.lot, &mut selection.lot),
            (&self.expiry, &mut selection.expiry_date),
            (&self.frozen_on, &mut selection.freeze_date),
            (&self.thawed_on, &mut selection.thaw_date),
            (&self.distributor, &mut selection.distributor),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }

        Ok(selection)
    }
}

/// Where a generated document goes
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Number of labels on the sheet (defaults to output.copies)
    #[arg(long, short = 'n')]
    pub copies: Option<usize>,
    /// Document format: html, text or json (defaults to output.format)
    #[arg(long, short)]
    pub format: Option<OutputFormat>,
    /// Output directory (defaults to output.dir)
    #[arg(long, short, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize etiquetas in the current directory
    Init {
        /// Overwrite an existing .etiquetas/config.md
        #[arg(long)]
        force: bool,
        /// Also copy the built-in label templates to .etiquetas/templates
        #[arg(long)]
        templates: bool,
    },
    /// List the options of the reference tables
    Tables {
        /// Only this table (e.g. ZONAS_FAO)
        table: Option<String>,
    },
    /// Validate a selection and list every missing field
    Check {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Print the label fields derived from a selection
    Preview {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print the fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a selection and write the label document
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fill in a label interactively, then write it
    Wizard {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show version information
    Version {
        /// Show additional build information
        #[arg(long, short)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate man page
    #[command(hide = true)]
    Man {
        /// Output directory for the man page (defaults to current directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}
