//! Validation of configuration values.

use anyhow::Result;
use chrono::NaiveDate;

use super::defaults::{LabelsConfig, OutputConfig, SourceConfig};
use super::Config;
use crate::domain::format_date;
use crate::reference::Table;

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;
        self.labels.validate()?;
        self.output.validate()?;
        self.layout
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid layout: {}", e))
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("source.timeout_secs must be greater than 0");
        }

        // A local directory makes the spreadsheet settings irrelevant
        if self.dir.is_some() {
            return Ok(());
        }

        if self.spreadsheet_id.trim().is_empty() {
            anyhow::bail!("source.spreadsheet_id is required when source.dir is not set");
        }

        for name in self.gids.keys() {
            if Table::from_sheet_name(name).is_none() {
                anyhow::bail!(
                    "source.gids: unknown sheet '{}'. Known sheets: {}",
                    name,
                    Table::ALL
                        .iter()
                        .map(|t| t.sheet_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }

        Ok(())
    }
}

impl LabelsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.placeholder.trim().is_empty() {
            anyhow::bail!("labels.placeholder must not be empty");
        }

        if self.date_format.trim().is_empty() {
            anyhow::bail!("labels.date_format must not be empty");
        }
        let sample = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap_or(NaiveDate::MIN);
        if format_date(sample, &self.date_format).is_none() {
            anyhow::bail!(
                "labels.date_format '{}' is not a valid date format",
                self.date_format
            );
        }

        if self.feminine_stems.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("labels.feminine_stems must not contain empty entries");
        }

        Ok(())
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            anyhow::bail!("output.dir must not be empty");
        }
        if self.copies == 0 {
            anyhow::bail!("output.copies must be greater than 0");
        }
        Ok(())
    }
}
