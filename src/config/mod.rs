//! Configuration management for etiquetas projects.
//!
//! Configuration lives in the YAML frontmatter of a markdown file so the
//! body can carry notes for whoever maintains the labels.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::CONFIG_FILE;
use crate::reference::{DirSource, ReferenceSource, SheetSource};
use crate::render::SheetLayout;

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub layout: SheetLayout,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Split `---` delimited YAML frontmatter from the markdown body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    if !content.starts_with("---") {
        return (None, content);
    }

    let rest = &content[3..];
    if let Some(end) = rest.find("\n---") {
        let frontmatter = rest[..end].to_string();
        let body = rest[end + 4..].trim_start();
        (Some(frontmatter), body)
    } else {
        (None, content)
    }
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/etiquetas/config.md)
    /// 2. Project config (.etiquetas/config.md)
    ///
    /// Either file may be missing; built-in defaults fill the gaps.
    pub fn load() -> Result<Self> {
        Self::load_merged_from(global_config_path().as_deref(), Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        // An empty frontmatter block means "all defaults"
        let config: Config = if frontmatter.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?
        };

        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from the given global and project paths.
    /// Project values override global values.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;
        Ok(config)
    }

    /// Build the reference source the config points at. `data_dir`
    /// (from the command line) wins over `source.dir`.
    pub fn reference_source(&self, data_dir: Option<&Path>) -> Box<dyn ReferenceSource> {
        let dir = data_dir
            .map(Path::to_path_buf)
            .or_else(|| self.source.dir.as_deref().map(expand_path));

        match dir {
            Some(dir) => Box::new(DirSource::new(dir)),
            None => Box::new(SheetSource::new(
                &self.source.spreadsheet_id,
                self.source.gids.clone(),
                Duration::from_secs(self.source.timeout_secs),
            )),
        }
    }

    /// Output directory with `~` expanded
    pub fn output_dir(&self) -> PathBuf {
        expand_path(&self.output.dir)
    }

    pub fn template_dir(&self) -> Option<PathBuf> {
        self.output.template_dir.as_deref().map(expand_path)
    }

    /// Contents written by `etiquetas init`
    pub fn default_markdown() -> String {
        let mut gids: Vec<(&str, &str)> = DEFAULT_GIDS.to_vec();
        gids.sort();
        let gids: String = gids
            .iter()
            .map(|(name, gid)| format!("    {}: \"{}\"\n", name, gid))
            .collect();

        format!(
            r#"---
source:
  spreadsheet_id: {id}
  gids:
{gids}  # dir: ./datos        # read PRODUCTOS.csv, ZONAS_FAO.csv, ... from here instead
  timeout_secs: 30

labels:
  placeholder: "{placeholder}"
  agreement: substring        # or word_final
  traces_policy: keep         # or exclude_primary
  date_format: "%d/%m/%Y"
  feminine_stems: []

layout:
  page_width_mm: 210
  page_height_mm: 297
  label_width_mm: 90
  label_height_mm: 60
  margin_mm: 10
  gap_mm: 5

output:
  dir: ./etiquetas/
  format: html                # html, text or json
  copies: 1
---

# Etiquetas

Reference tables are read from the spreadsheet above, one tab per table.
"#,
            id = DEFAULT_SPREADSHEET_ID,
            gids = gids,
            placeholder = crate::domain::PLACEHOLDER,
        )
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Returns the path to the global config file at ~/.config/etiquetas/config.md
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("etiquetas").join("config.md"))
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub source: Option<PartialSourceConfig>,
    pub labels: Option<LabelsConfig>,
    pub layout: Option<SheetLayout>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialSourceConfig {
    pub spreadsheet_id: Option<String>,
    pub gids: Option<HashMap<String, String>>,
    pub dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        if frontmatter.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_source = self.source.unwrap_or_default();
        let project_source = project.source.unwrap_or_default();

        Config {
            source: SourceConfig {
                // Project value > global value > default
                spreadsheet_id: project_source
                    .spreadsheet_id
                    .or(global_source.spreadsheet_id)
                    .unwrap_or_else(defaults::default_spreadsheet_id),
                gids: project_source
                    .gids
                    .or(global_source.gids)
                    .unwrap_or_else(defaults::default_gids),
                dir: project_source.dir.or(global_source.dir),
                timeout_secs: project_source
                    .timeout_secs
                    .or(global_source.timeout_secs)
                    .unwrap_or_else(defaults::default_timeout_secs),
            },
            // Remaining sections: project overrides global, or use default
            labels: project.labels.or(self.labels).unwrap_or_default(),
            layout: project.layout.or(self.layout).unwrap_or_default(),
            output: project.output.or(self.output).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests;
