//! Async HTTP client for the PyPI JSON API.
//!
//! [`pypi`] exposes `fetch_package` for one package and `fetch_packages`
//! for a concurrent batch, both returning decoded
//! [`PackageLicenses`](crate::models::PackageLicenses). Network and HTTP
//! failures are errors naming the package, never silent downgrades.

pub mod pypi;
