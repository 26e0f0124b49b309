//! Report renderers for classification results.
//!
//! [`records`] flattens classified packages into one row per finding with
//! the stable field names `package-name`, `package-version`, `license`,
//! `source`, `state`. [`render_json`] is the default machine-readable
//! output; [`terminal`] renders a colored table for humans.

pub mod terminal;

use anyhow::Result;
use serde::Serialize;

use crate::models::{LicenseSource, LicenseState, PackageLicenses};

/// Longest license text reproduced verbatim in a record. Longer texts are
/// cut; `sha256:` fingerprints are exempt so the digest stays usable as a
/// storage key.
const LICENSE_TEXT_LIMIT: usize = 48;

/// One report row: a single finding for a single package.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseRecord {
    #[serde(rename = "package-name")]
    pub package_name: String,
    #[serde(rename = "package-version")]
    pub package_version: String,
    pub license: String,
    pub source: LicenseSource,
    pub state: LicenseState,
}

/// Flatten classified packages into report records, one per finding.
pub fn records(packages: &[PackageLicenses]) -> Vec<LicenseRecord> {
    let mut rows = Vec::new();
    for package in packages {
        for finding in package.licenses() {
            rows.push(LicenseRecord {
                package_name: package.name.clone(),
                package_version: package.version.clone(),
                license: display_text(&finding.text),
                source: finding.source,
                state: finding.state,
            });
        }
    }
    rows
}

/// Render records as pretty-printed JSON.
pub fn render_json(records: &[LicenseRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

fn display_text(text: &str) -> String {
    if text.starts_with("sha256:") {
        return text.to_string();
    }
    text.chars().take(LICENSE_TEXT_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(license: Option<&str>, expression: Option<&str>) -> PackageLicenses {
        PackageLicenses::new(
            "example-package".into(),
            "1.0.0".into(),
            license.map(Into::into),
            expression.map(Into::into),
            vec![],
        )
    }

    #[test]
    fn test_record_field_names() {
        let packages = vec![package(None, Some("MIT"))];
        let rows = records(&packages);
        let value = serde_json::to_value(&rows).unwrap();

        let row = &value[0];
        assert_eq!(row["package-name"], "example-package");
        assert_eq!(row["package-version"], "1.0.0");
        assert_eq!(row["license"], "MIT");
        assert_eq!(row["source"], "Expression");
        assert_eq!(row["state"], "VALID");
        assert_eq!(row.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_one_record_per_finding() {
        let packages = vec![PackageLicenses::new(
            "example-package".into(),
            "1.0.0".into(),
            None,
            None,
            vec![
                "License :: OSI Approved :: MIT License".into(),
                "Operating System :: Unix".into(),
            ],
        )];
        let rows = records(&packages);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].license, "MIT License");
        assert_eq!(rows[1].license, "UNKNOWN");
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "word ".repeat(40);
        let packages = vec![package(Some(&text), None)];
        let rows = records(&packages);
        assert_eq!(rows[0].license.chars().count(), 48);
    }

    #[test]
    fn test_fingerprints_are_not_truncated() {
        let text = "x".repeat(600);
        let packages = vec![package(Some(&text), None)];
        let rows = records(&packages);

        let digest = rows[0].license.strip_prefix("sha256:").unwrap();
        assert_eq!(digest.len(), 64);
    }
}
