use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::PackageLicenses;

/// Scan a Python `site-packages` directory for installed distributions.
///
/// Each `<name>-<version>.dist-info/METADATA` file contributes one package.
/// Directories without a `METADATA` file are skipped; unreadable ones are
/// errors. Results are in sorted directory order.
pub fn scan_site_packages(dir: &Path) -> Result<Vec<PackageLicenses>> {
    let dist_info = Regex::new(r"^(?P<name>.+)-(?P<version>[^-]+)\.dist-info$")?;

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("can't read directory {}", dir.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("can't read directory {}", dir.display()))?;
        dirs.push(entry.path());
    }
    dirs.sort();

    let mut packages = Vec::new();
    for path in dirs {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(captures) = dist_info.captures(file_name) else {
            continue;
        };
        let metadata_file = path.join("METADATA");
        if !metadata_file.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&metadata_file)
            .with_context(|| format!("can't read {}", metadata_file.display()))?;
        packages.push(parse_metadata(
            &content,
            &captures["name"],
            &captures["version"],
        ));
    }
    Ok(packages)
}

/// Locate a site-packages directory: `$VIRTUAL_ENV` first, then `.venv`
/// under the working directory.
pub fn discover_site_packages() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(venv) = std::env::var("VIRTUAL_ENV") {
        roots.push(PathBuf::from(venv));
    }
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.join(".venv"));
    }
    roots.iter().find_map(|root| find_site_packages(root))
}

/// Resolve `site-packages` below one virtual-env root, covering both the
/// POSIX (`lib/pythonX.Y/site-packages`) and Windows (`Lib/site-packages`)
/// layouts.
fn find_site_packages(venv: &Path) -> Option<PathBuf> {
    let windows = venv.join("Lib").join("site-packages");
    if windows.is_dir() {
        return Some(windows);
    }
    for entry in std::fs::read_dir(venv.join("lib")).ok()?.flatten() {
        let candidate = entry.path().join("site-packages");
        if candidate.is_dir() {
            return Some(candidate);
        }
    }
    None
}

/// Parse the header block of a core-metadata (`METADATA`) file.
///
/// Headers are RFC 822 style: `Key: value`, continuation lines start with
/// whitespace and fold into the previous value, and the blank line before
/// the body ends parsing. `Classifier` repeats; a missing `License` header
/// decodes to absent, an empty one to the empty string.
fn parse_metadata(content: &str, fallback_name: &str, fallback_version: &str) -> PackageLicenses {
    let mut headers: Vec<(String, String)> = Vec::new();
    for line in content.lines() {
        if line.is_empty() {
            break;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some((_, value)) = headers.last_mut() {
                value.push('\n');
                value.push_str(line.trim_start());
            }
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    let mut name = fallback_name.to_string();
    let mut version = fallback_version.to_string();
    let mut license = None;
    let mut license_expression = None;
    let mut classifiers = Vec::new();

    for (key, value) in headers {
        match key.as_str() {
            "Name" => name = value,
            "Version" => version = value,
            "License" => license = Some(value),
            "License-Expression" => license_expression = Some(value),
            "Classifier" => classifiers.push(value),
            _ => {}
        }
    }

    PackageLicenses::new(name, version, license, license_expression, classifiers)
}
