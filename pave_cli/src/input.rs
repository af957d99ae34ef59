//! Design file loading.
//!
//! A design file holds one case, a list of cases, or a batch with shared
//! settings. The format follows the file extension (`.json` or `.toml`).

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pave_core::calculations::{DesignBatch, DesignCase};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            _ => bail!(
                "unsupported design file '{}': expected a .json or .toml extension",
                path.display()
            ),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DesignFile {
    Single(DesignCase),
    Cases(Vec<DesignCase>),
    Batch(DesignBatch),
}

impl From<DesignFile> for DesignBatch {
    fn from(file: DesignFile) -> Self {
        match file {
            DesignFile::Single(case) => DesignBatch::default().with_case(case),
            DesignFile::Cases(cases) => DesignBatch {
                cases,
                ..Default::default()
            },
            DesignFile::Batch(batch) => batch,
        }
    }
}

/// Parse design file content
pub fn parse_design(content: &str, format: FileFormat) -> Result<DesignBatch> {
    let file: DesignFile = match format {
        FileFormat::Json => serde_json::from_str(content).context("invalid JSON design file")?,
        FileFormat::Toml => toml::from_str(content).context("invalid TOML design file")?,
    };
    let batch = DesignBatch::from(file);
    if batch.cases.is_empty() {
        bail!("design file contains no cases (each case needs a \"type\" of Flexible or Rigid)");
    }
    Ok(batch)
}

/// Read and parse a design file
pub fn load_design_file(path: &Path) -> Result<DesignBatch> {
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read design file '{}'", path.display()))?;
    parse_design(&content, format).with_context(|| format!("in '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.json")).unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("b.TOML")).unwrap(), FileFormat::Toml);
        assert!(FileFormat::from_path(Path::new("c.yaml")).is_err());
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_single_json_case() {
        let batch = parse_design(
            r#"{"type": "Rigid", "label": "Apron", "w18": 5000000, "reliability": 95, "subgrade_k_pci": 150}"#,
            FileFormat::Json,
        )
        .unwrap();
        assert_eq!(batch.cases.len(), 1);
        assert_eq!(batch.cases[0].label(), "Apron");
        assert!(!batch.settings.throw_on_error);
    }

    #[test]
    fn test_json_case_list() {
        let batch = parse_design(
            r#"[
                {"type": "Flexible", "label": "A", "w18": 1000000, "reliability": 90, "resilient_modulus_psi": 7500},
                {"type": "Rigid", "label": "B", "w18": 5000000, "reliability": 95, "subgrade_k_pci": 150}
            ]"#,
            FileFormat::Json,
        )
        .unwrap();
        assert_eq!(batch.cases.len(), 2);
        assert_eq!(batch.cases[1].design_type(), "Rigid");
    }

    #[test]
    fn test_toml_batch() {
        let content = r#"
[settings]
throw_on_error = true

[settings.project]
engineer = "J. Doe"
job_id = "26-014"

[[cases]]
type = "Flexible"
label = "Main St"
w18 = 1000000.0
reliability = 90.0
resilient_modulus_psi = 7500.0

[cases.layers]
drainage = "fair"

[[cases]]
type = "Rigid"
label = "Apron"
w18 = 5000000.0
reliability = 95.0
subgrade_k_pci = 150.0
"#;
        let batch = parse_design(content, FileFormat::Toml).unwrap();
        assert!(batch.settings.throw_on_error);
        assert_eq!(batch.settings.project.as_ref().unwrap().job_id, "26-014");
        assert_eq!(batch.cases.len(), 2);
        assert_eq!(batch.cases[0].label(), "Main St");
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(parse_design("{}", FileFormat::Json).is_err());
        assert!(parse_design("not json", FileFormat::Json).is_err());
    }
}
