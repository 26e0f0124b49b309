use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::license::{self, SpdxValidator};

/// Which metadata field produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LicenseSource {
    Classifier,
    Expression,
    License,
    Unknown,
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::Classifier => write!(f, "Classifier"),
            LicenseSource::Expression => write!(f, "Expression"),
            LicenseSource::License => write!(f, "License"),
            LicenseSource::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Verdict attached to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LicenseState {
    Ambiguous,
    Deprecated,
    Invalid,
    Valid,
    Unknown,
}

impl std::fmt::Display for LicenseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseState::Ambiguous => write!(f, "AMBIGUOUS"),
            LicenseState::Deprecated => write!(f, "DEPRECATED"),
            LicenseState::Invalid => write!(f, "INVALID"),
            LicenseState::Valid => write!(f, "VALID"),
            LicenseState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One normalized license finding.
///
/// `text` is a human-readable identifier, or `sha256:<64 hex chars>` when
/// the source text was too large to treat as an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub text: String,
    pub source: LicenseSource,
    pub state: LicenseState,
}

impl License {
    pub fn new(text: impl Into<String>, source: LicenseSource, state: LicenseState) -> Self {
        Self {
            text: text.into(),
            source,
            state,
        }
    }

    /// The fallback finding for packages that declare nothing usable.
    pub fn unknown() -> Self {
        Self::new("UNKNOWN", LicenseSource::Unknown, LicenseState::Unknown)
    }
}

/// One package's raw license metadata, as found on disk or on PyPI.
///
/// `name` and `version` are opaque identifying attributes. An absent
/// `license` or `license_expression` is `None`; an empty string counts as
/// present and still routes through its classification branch.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageLicenses {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub license_expression: Option<String>,
    #[serde(default)]
    pub classifiers: Vec<String>,
    #[serde(skip)]
    licenses: OnceLock<Vec<License>>,
}

impl PackageLicenses {
    pub fn new(
        name: String,
        version: String,
        license: Option<String>,
        license_expression: Option<String>,
        classifiers: Vec<String>,
    ) -> Self {
        Self {
            name,
            version,
            license,
            license_expression,
            classifiers,
            licenses: OnceLock::new(),
        }
    }

    /// Classified findings for this package, never empty.
    ///
    /// Computed on first access with the SPDX-backed validator and cached
    /// for the lifetime of the value; the inputs are immutable, so the
    /// cached result equals any recomputation.
    pub fn licenses(&self) -> &[License] {
        self.licenses.get_or_init(|| {
            license::classify(
                self.license.as_deref(),
                self.license_expression.as_deref(),
                &self.classifiers,
                &SpdxValidator,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_licenses_never_empty() {
        let package = PackageLicenses::new("pkg".into(), "1.0.0".into(), None, None, vec![]);
        assert!(!package.licenses().is_empty());
    }

    #[test]
    fn test_licenses_memoized() {
        let package = PackageLicenses::new(
            "pkg".into(),
            "1.0.0".into(),
            Some("MIT".into()),
            None,
            vec![],
        );
        let first = package.licenses().as_ptr();
        let second = package.licenses().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_deserialize_defaults() {
        let package: PackageLicenses = serde_json::from_str("{}").unwrap();
        assert_eq!(package.name, "");
        assert_eq!(package.version, "");
        assert_eq!(package.license, None);
        assert_eq!(package.license_expression, None);
        assert!(package.classifiers.is_empty());
    }

    #[test]
    fn test_deserialize_null_license_is_absent() {
        let package: PackageLicenses =
            serde_json::from_str(r#"{"name": "pkg", "license": null}"#).unwrap();
        assert_eq!(package.license, None);
    }

    #[test]
    fn test_display_tags() {
        assert_eq!(LicenseSource::Expression.to_string(), "Expression");
        assert_eq!(LicenseState::Valid.to_string(), "VALID");
        assert_eq!(LicenseState::Ambiguous.to_string(), "AMBIGUOUS");
    }
}
