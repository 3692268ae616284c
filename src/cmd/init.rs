//! `etiquetas init`: write the project configuration.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use etiquetas::config::Config;
use etiquetas::paths::{CONFIG_FILE, PROJECT_DIR, TEMPLATES_DIR};
use etiquetas::render::html::embedded;
use etiquetas::ui;

pub fn cmd_init(force: bool, templates: bool) -> Result<()> {
    init_in(Path::new("."), force, templates)
}

fn init_in(root: &Path, force: bool, templates: bool) -> Result<()> {
    let config_path = root.join(CONFIG_FILE);

    if config_path.exists() && !force {
        if atty::is(atty::Stream::Stdin) {
            let should_overwrite = dialoguer::Confirm::new()
                .with_prompt(format!("{} already exists. Overwrite?", CONFIG_FILE))
                .default(false)
                .interact()?;
            if !should_overwrite {
                println!("{}", "Keeping existing configuration.".yellow());
                return Ok(());
            }
        } else {
            anyhow::bail!(
                "{} already exists. Use {} to overwrite.",
                CONFIG_FILE,
                "--force".cyan()
            );
        }
    }

    fs::create_dir_all(root.join(PROJECT_DIR))
        .with_context(|| format!("Failed to create {}", PROJECT_DIR))?;
    fs::write(&config_path, Config::default_markdown())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    ui::success(&format!("Created {}", CONFIG_FILE.cyan()));

    if templates {
        let dir = root.join(TEMPLATES_DIR);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", TEMPLATES_DIR))?;
        for (name, content) in [
            ("sheet.html", embedded::SHEET_HTML),
            ("label.html", embedded::LABEL_HTML),
        ] {
            let path = dir.join(name);
            if path.exists() && !force {
                ui::warn(&format!("{} exists, not overwritten", path.display()));
                continue;
            }
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        ui::success(&format!(
            "Copied label templates to {}; set output.template_dir to use them",
            TEMPLATES_DIR.cyan()
        ));
    }

    Ok(())
}
