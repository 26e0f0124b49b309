use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::Deserialize;

use crate::models::PackageLicenses;

const PYPI_PACKAGE_URL: &str = "https://pypi.org/pypi";

/// Request timeout in seconds; override with `PYPI_TIMEOUT`.
fn pypi_timeout() -> f64 {
    std::env::var("PYPI_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|t: &f64| t.is_finite() && *t > 0.0)
        .unwrap_or(10.0)
}

/// Attempts per package; override with `PYPI_RETRIES`.
fn pypi_retries() -> u32 {
    std::env::var("PYPI_RETRIES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3)
}

/// The subset of the PyPI `info` object the scanner consumes.
/// Reference: <https://docs.pypi.org/api/json/>.
#[derive(Debug, Deserialize)]
struct PackageResponse {
    info: PackageInfo,
}

#[derive(Debug, Deserialize)]
struct PackageInfo {
    name: String,
    version: String,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    license_expression: Option<String>,
    #[serde(default)]
    classifiers: Vec<String>,
}

/// Build the shared PyPI session: explicit timeout, redirects disabled.
pub fn client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs_f64(pypi_timeout()))
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(concat!("license-scanner/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Fetch one package's metadata, retrying failed attempts.
pub async fn fetch_package(client: &Client, name: &str) -> Result<PackageLicenses> {
    let url = format!("{PYPI_PACKAGE_URL}/{name}/json");
    let attempts = pypi_retries().max(1);

    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_fetch(client, &url).await {
            Ok(package) => return Ok(package),
            Err(_) if attempt < attempts => continue,
            Err(err) => {
                return Err(err).with_context(|| format!("can't fetch {name} from PyPI"));
            }
        }
    }
}

async fn try_fetch(client: &Client, url: &str) -> Result<PackageLicenses> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?;

    let data: PackageResponse = response.json().await?;
    let info = data.info;
    Ok(PackageLicenses::new(
        info.name,
        info.version,
        info.license,
        info.license_expression,
        info.classifiers,
    ))
}

/// Fetch a batch of packages concurrently, with a progress bar on stderr
/// unless `quiet`.
pub async fn fetch_packages(names: &[String], quiet: bool) -> Result<Vec<PackageLicenses>> {
    let client = client()?;

    let pb = if !quiet {
        let pb = ProgressBar::new(names.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let futures: Vec<_> = names
        .iter()
        .map(|name| {
            let client = client.clone();
            let pb = pb.clone();
            async move {
                let result = fetch_package(&client, name).await;
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                result
            }
        })
        .collect();

    let results = join_all(futures).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    results.into_iter().collect()
}
