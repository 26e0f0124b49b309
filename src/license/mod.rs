//! License classification: map raw package metadata to normalized findings.
//!
//! Precedence is strict and first match wins: the `License-Expression`
//! field, then the free-text `License` field, then the trove classifiers,
//! then a single UNKNOWN fallback. See [`classify`].
//!
//! - [`spdx`] — SPDX expression validation behind an injectable seam.
//! - [`trove`] — classifier taxonomy membership over embedded data files.

pub mod spdx;
pub mod trove;

use sha2::{Digest, Sha256};

use crate::models::{License, LicenseSource, LicenseState};

pub use spdx::{ExpressionValidator, SpdxValidator};

/// Free-text licenses at or above this length (in characters) are treated
/// as an embedded license file and reported by content fingerprint.
pub const FILE_DETECTION_CUTOFF: usize = 512;

const CLASSIFIER_PREFIX: &str = "License";
const CLASSIFIER_SEPARATOR: &str = "::";

/// Classify one package's metadata fields into an ordered list of findings.
///
/// Never returns an empty list and never fails: anomalies fold into
/// [`LicenseState`] verdicts. An empty-string field counts as present and
/// is still routed through its branch; only `None` falls through.
pub fn classify(
    license: Option<&str>,
    license_expression: Option<&str>,
    classifiers: &[String],
    validator: &dyn ExpressionValidator,
) -> Vec<License> {
    if let Some(found) = parse_license_expression(license_expression, validator) {
        return vec![found];
    }
    if let Some(found) = parse_license(license, validator) {
        return vec![found];
    }
    let found = parse_classifiers(classifiers);
    if !found.is_empty() {
        return found;
    }
    vec![License::unknown()]
}

fn parse_license_expression(
    expression: Option<&str>,
    validator: &dyn ExpressionValidator,
) -> Option<License> {
    let expression = expression?;
    let state = if validator.validate(expression) {
        LicenseState::Valid
    } else {
        LicenseState::Invalid
    };
    Some(License::new(expression, LicenseSource::Expression, state))
}

fn parse_license(license: Option<&str>, validator: &dyn ExpressionValidator) -> Option<License> {
    let license = license?;
    if validator.validate(license) {
        return Some(License::new(
            license,
            LicenseSource::License,
            LicenseState::Valid,
        ));
    }
    if license.chars().count() >= FILE_DETECTION_CUTOFF {
        let digest = hash_license(license);
        return Some(License::new(
            format!("sha256:{digest}"),
            LicenseSource::License,
            LicenseState::Ambiguous,
        ));
    }
    Some(License::new(
        license,
        LicenseSource::License,
        LicenseState::Ambiguous,
    ))
}

fn parse_classifiers(classifiers: &[String]) -> Vec<License> {
    let mut licenses = Vec::with_capacity(classifiers.len());
    for classifier in classifiers {
        if !is_license_classifier(classifier) {
            licenses.push(License::unknown());
            continue;
        }
        if trove::is_valid(classifier) {
            licenses.push(License::new(
                last_segment(classifier),
                LicenseSource::Classifier,
                LicenseState::Valid,
            ));
        } else if trove::is_deprecated(classifier) {
            licenses.push(License::new(
                last_segment(classifier),
                LicenseSource::Classifier,
                LicenseState::Deprecated,
            ));
        } else {
            licenses.push(License::new(
                classifier.clone(),
                LicenseSource::Classifier,
                LicenseState::Invalid,
            ));
        }
    }
    licenses
}

/// A license classifier starts with the `License` prefix followed by the
/// `::` separator (optionally whitespace-padded, as the taxonomy writes it).
fn is_license_classifier(classifier: &str) -> bool {
    classifier
        .strip_prefix(CLASSIFIER_PREFIX)
        .is_some_and(|rest| rest.trim_start().starts_with(CLASSIFIER_SEPARATOR))
}

/// The segment after the last `::` separator, trimmed.
fn last_segment(classifier: &str) -> String {
    classifier
        .rsplit(CLASSIFIER_SEPARATOR)
        .next()
        .unwrap_or(classifier)
        .trim()
        .to_string()
}

/// Fingerprint over the UTF-8 bytes of the original text, never a trimmed
/// or truncated form.
fn hash_license(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
