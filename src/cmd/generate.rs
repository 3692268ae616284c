//! Selection commands: check, preview and generate.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use etiquetas::config::Config;
use etiquetas::label::{LabelError, LabelFields};
use etiquetas::render::{
    renderer_for, DocumentRenderer, HtmlSheetRenderer, OutputFormat, TextRenderer,
};
use etiquetas::session::Session;
use etiquetas::ui::{self, colors};

use crate::cli::{OutputArgs, SelectionArgs};

/// Validate the selection and report every problem at once.
pub fn cmd_check(data_dir: Option<&Path>, args: &SelectionArgs) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config, data_dir)?;
    session.load_selection(args.to_selection()?);

    match session.submit(etiquetas::today()) {
        Ok(label) => {
            ui::success(&format!(
                "{} is complete",
                colors::identifier(&label.commercial_name)
            ));
            Ok(())
        }
        Err(e) => {
            report_label_error(&e);
            std::process::exit(1);
        }
    }
}

/// Print the derived fields.
pub fn cmd_preview(data_dir: Option<&Path>, args: &SelectionArgs, json: bool) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config, data_dir)?;
    session.load_selection(args.to_selection()?);

    let label = submit_or_exit(&mut session)?;
    if json {
        println!("{}", serde_json::to_string_pretty(label)?);
    } else {
        print!("{}", TextRenderer::summary(label));
    }
    Ok(())
}

/// Validate the selection and write the label document.
pub fn cmd_generate(
    data_dir: Option<&Path>,
    args: &SelectionArgs,
    output: &OutputArgs,
) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config, data_dir)?;
    session.load_selection(args.to_selection()?);

    submit_or_exit(&mut session)?;
    let path = write_document(&config, &session, output)?;
    ui::success(&format!("Label written to {}", colors::identifier(&path.display().to_string())));
    Ok(())
}

/// Submit the session's selection; on failure print the problems and exit 1.
pub(crate) fn submit_or_exit(session: &mut Session) -> Result<&LabelFields> {
    match session.submit(etiquetas::today()) {
        Ok(label) => Ok(label),
        Err(e) => {
            report_label_error(&e);
            std::process::exit(1);
        }
    }
}

pub(crate) fn report_label_error(error: &LabelError) {
    match error {
        LabelError::Incomplete(fields) => {
            eprintln!("{} {}", "✗".red(), colors::error("Missing mandatory fields:"));
            eprintln!("{}", ui::format::missing_fields(fields));
        }
        LabelError::InvalidDates(issues) => {
            for issue in issues {
                eprintln!("{} {}", "✗".red(), colors::error(&issue.to_string()));
            }
        }
        other => eprintln!("{} {}", "✗".red(), colors::error(&other.to_string())),
    }
}

/// Render the submitted label with the configured renderer, overridden
/// by `output`, and write it to the output directory.
pub(crate) fn write_document(
    config: &Config,
    session: &Session,
    output: &OutputArgs,
) -> Result<PathBuf> {
    let format = output.format.unwrap_or(config.output.format);
    let copies = output.copies.unwrap_or(config.output.copies);
    let dir = output.output.clone().unwrap_or_else(|| config.output_dir());

    let renderer = build_renderer(config, format)?;
    let document = session
        .render(renderer.as_ref(), copies)
        .context("Failed to render label")?;

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(&document.file_name);
    fs::write(&path, &document.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

fn build_renderer(config: &Config, format: OutputFormat) -> Result<Box<dyn DocumentRenderer>> {
    let renderer: Box<dyn DocumentRenderer> = match (format, config.template_dir()) {
        (OutputFormat::Html, Some(dir)) => {
            if !dir.exists() {
                ui::warn(&format!(
                    "Template directory {} not found, using built-in templates",
                    dir.display()
                ));
            }
            Box::new(
                HtmlSheetRenderer::with_template_dir(config.layout.clone(), &dir)
                    .with_context(|| format!("Failed to load templates from {}", dir.display()))?,
            )
        }
        (format, _) => renderer_for(format, &config.layout).context("Failed to set up renderer")?,
    };
    Ok(renderer)
}
