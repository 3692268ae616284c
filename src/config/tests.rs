use super::*;
use crate::domain::{AgreementMode, TracesPolicy};
use crate::render::OutputFormat;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_config() {
    let content = r#"---
source:
  dir: ./datos
labels:
  agreement: word_final
  traces_policy: exclude_primary
  feminine_stems: [rosada]
output:
  format: json
  copies: 4
---

# Notes
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.source.dir.as_deref(), Some("./datos"));
    assert_eq!(config.labels.agreement, AgreementMode::WordFinal);
    assert_eq!(config.labels.traces_policy, TracesPolicy::ExcludePrimary);
    assert_eq!(config.labels.feminine_stems, vec!["rosada".to_string()]);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.output.copies, 4);
    // untouched sections keep their defaults
    assert_eq!(config.layout, SheetLayout::default());
    assert_eq!(config.source.timeout_secs, 30);
}

#[test]
fn test_parse_empty_frontmatter_uses_defaults() {
    let config = Config::parse("---\n---\n").unwrap();
    assert_eq!(config.source.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
    assert_eq!(config.source.gids.len(), 8);
    assert_eq!(config.source.gids["EXPEDIDORES"], "1402611266");
    assert_eq!(config.labels.placeholder, crate::domain::PLACEHOLDER);
    assert_eq!(config.output.format, OutputFormat::Html);
}

#[test]
fn test_parse_without_frontmatter_fails() {
    let err = Config::parse("# just markdown").unwrap_err();
    assert!(err.to_string().contains("frontmatter"));
}

#[test]
fn test_default_markdown_round_trips() {
    let config = Config::parse(&Config::default_markdown()).unwrap();
    assert_eq!(config.source.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
    assert_eq!(config.source.gids, defaults::default_gids());
    assert_eq!(config.layout.per_page(), 8);
    assert_eq!(config.labels.date_format, "%d/%m/%Y");
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let content = "---\nsource:\n  timeout_secs: 0\n---\n";
    let err = Config::parse(content).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn test_validate_rejects_unknown_sheet() {
    let content = "---\nsource:\n  gids:\n    PRODUCTS: \"0\"\n---\n";
    let err = Config::parse(content).unwrap_err();
    assert!(err.to_string().contains("PRODUCTS"));
}

#[test]
fn test_validate_rejects_oversized_labels() {
    let content = "---\nlayout:\n  label_width_mm: 400\n---\n";
    let err = Config::parse(content).unwrap_err();
    assert!(err.to_string().contains("Invalid layout"));
}

#[test]
fn test_validate_rejects_bad_date_format() {
    let content = "---\nlabels:\n  date_format: \"%d/%Q\"\n---\n";
    assert!(Config::parse(content).is_err());
}

#[test]
fn test_validate_rejects_time_in_date_format() {
    for format in ["%d/%m/%Y %H:%M", "%Y-%m-%d %Z"] {
        let content = format!("---\nlabels:\n  date_format: \"{}\"\n---\n", format);
        let err = Config::parse(&content).unwrap_err();
        assert!(err.to_string().contains("labels.date_format"));
    }
}

#[test]
fn test_to_rules() {
    let content = "---\nlabels:\n  placeholder: \"--\"\n  agreement: word_final\n---\n";
    let rules = Config::parse(content).unwrap().labels.to_rules();
    assert_eq!(rules.placeholder, "--");
    assert_eq!(rules.agreement, AgreementMode::WordFinal);
    assert_eq!(rules.date_format, "%d/%m/%Y");
}

#[test]
fn test_load_merged_no_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_merged_from(
        Some(&tmp.path().join("global.md")),
        &tmp.path().join("config.md"),
    )
    .unwrap();
    assert_eq!(config.source.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
    assert_eq!(config.output.copies, 1);
}

#[test]
fn test_load_merged_project_overrides_global() {
    let tmp = TempDir::new().unwrap();
    let global_path = tmp.path().join("global.md");
    let project_path = tmp.path().join("config.md");

    fs::write(
        &global_path,
        r#"---
source:
  spreadsheet_id: global-sheet
  timeout_secs: 10
output:
  dir: /tmp/global
  format: text
---
"#,
    )
    .unwrap();
    fs::write(
        &project_path,
        r#"---
source:
  timeout_secs: 5
labels:
  traces_policy: exclude_primary
---
"#,
    )
    .unwrap();

    let config = Config::load_merged_from(Some(&global_path), &project_path).unwrap();
    // field-level merge inside `source`
    assert_eq!(config.source.spreadsheet_id, "global-sheet");
    assert_eq!(config.source.timeout_secs, 5);
    // section-level merge elsewhere
    assert_eq!(config.output.dir, "/tmp/global");
    assert_eq!(config.output.format, OutputFormat::Text);
    assert_eq!(config.labels.traces_policy, TracesPolicy::ExcludePrimary);
}

#[test]
fn test_load_merged_reports_broken_file() {
    let tmp = TempDir::new().unwrap();
    let project_path = tmp.path().join("config.md");
    fs::write(&project_path, "---\nsource: [unclosed\n---\n").unwrap();

    let err = Config::load_merged_from(None, &project_path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.md"));
}

#[test]
fn test_reference_source_prefers_data_dir() {
    let config = Config::parse("---\nsource:\n  dir: /srv/tablas\n---\n").unwrap();

    let source = config.reference_source(None);
    assert_eq!(source.describe(), "directory /srv/tablas");

    let source = config.reference_source(Some(Path::new("/tmp/other")));
    assert_eq!(source.describe(), "directory /tmp/other");

    let source = Config::default().reference_source(None);
    assert_eq!(source.describe(), format!("spreadsheet {}", DEFAULT_SPREADSHEET_ID));
}

#[test]
#[serial]
fn test_output_dir_expands_tilde() {
    let original = std::env::var("HOME").ok();
    std::env::set_var("HOME", "/home/etiquetas");

    let config = Config::parse("---\noutput:\n  dir: ~/labels\n---\n").unwrap();
    assert_eq!(config.output_dir(), PathBuf::from("/home/etiquetas/labels"));

    match original {
        Some(home) => std::env::set_var("HOME", home),
        None => std::env::remove_var("HOME"),
    }
}

#[test]
#[serial]
fn test_global_config_path() {
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    std::env::set_var("XDG_CONFIG_HOME", "/home/testuser/.config");

    let path = global_config_path().unwrap();
    if cfg!(target_os = "linux") {
        let expected = PathBuf::from("/home/testuser/.config")
            .join("etiquetas")
            .join("config.md");
        assert_eq!(path, expected);
    }
    assert!(path.ends_with("etiquetas/config.md"));

    match original {
        Some(dir) => std::env::set_var("XDG_CONFIG_HOME", dir),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
}
