use std::path::Path;

use anyhow::{Context, Result};

use crate::models::PackageLicenses;

/// Scan a directory of `*.json` package metadata files.
///
/// Each file holds one JSON object with optional `name`, `version`,
/// `license`, `license_expression`, and `classifiers` fields; missing
/// fields take their defaults, and a JSON `null` license decodes to
/// absent. Files are visited in sorted path order so output is
/// deterministic. Other file types are ignored.
pub fn scan_directory(base: &Path) -> Result<Vec<PackageLicenses>> {
    let entries = std::fs::read_dir(base)
        .with_context(|| format!("can't read directory {}", base.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("can't read directory {}", base.display()))?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    let mut packages = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("can't read {}", path.display()))?;
        let package: PackageLicenses = serde_json::from_str(&content)
            .with_context(|| format!("invalid format {}", path.display()))?;
        packages.push(package);
    }
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("example-package.json"), "{}").unwrap();

        let results = scan_directory(dir.path()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "");
        assert_eq!(results[0].version, "");
        assert_eq!(results[0].license, None);
        assert_eq!(results[0].license_expression, None);
        assert!(results[0].classifiers.is_empty());
    }

    #[test]
    fn test_metadata() {
        let dir = tempdir().unwrap();
        let metadata = r#"{
            "name": "example-package",
            "version": "1.0.0",
            "license": "BSD",
            "license_expression": "MIT",
            "classifiers": ["Programming Language :: Python :: 3"]
        }"#;
        fs::write(dir.path().join("example-package.json"), metadata).unwrap();

        let results = scan_directory(dir.path()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "example-package");
        assert_eq!(results[0].version, "1.0.0");
        assert_eq!(results[0].license.as_deref(), Some("BSD"));
        assert_eq!(results[0].license_expression.as_deref(), Some("MIT"));
        assert_eq!(
            results[0].classifiers,
            vec!["Programming Language :: Python :: 3".to_string()]
        );
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("invalid.json"), r#"{"invalid json"}"#).unwrap();

        let err = scan_directory(dir.path()).unwrap_err();
        assert!(err.to_string().contains("invalid.json"));
    }

    #[test]
    fn test_invalid_object() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("invalid-object.json"), "[]").unwrap();

        assert!(scan_directory(dir.path()).is_err());
    }

    #[test]
    fn test_invalid_encoding() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("bad-encoding.json"),
            b"{\"text\": \"invalid utf-8 \x80\"}",
        )
        .unwrap();

        let err = scan_directory(dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad-encoding.json"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(scan_directory(&dir.path().join("does-not-exist")).is_err());
    }

    #[test]
    fn test_ignores_other_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "not metadata").unwrap();
        fs::write(dir.path().join("pkg.json"), r#"{"name": "pkg"}"#).unwrap();

        let results = scan_directory(dir.path()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "pkg");
    }

    #[test]
    fn test_sorted_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), r#"{"name": "b"}"#).unwrap();
        fs::write(dir.path().join("a.json"), r#"{"name": "a"}"#).unwrap();

        let results = scan_directory(dir.path()).unwrap();
        let names: Vec<_> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
