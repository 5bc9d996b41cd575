// src/fetch/mod.rs

use reqwest::Client;
use std::{fmt, path::PathBuf, str::FromStr};
use tokio::fs;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{LoadError, Result};

/// Where a tabular source lives: on disk or behind an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Path(PathBuf),
    Url(Url),
}

impl SourceLocation {
    /// Short label used in logs and error messages.
    pub fn name(&self) -> String {
        match self {
            SourceLocation::Path(p) => p.display().to_string(),
            SourceLocation::Url(u) => u.to_string(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for SourceLocation {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(s)
                .map_err(|e| LoadError::Config(format!("invalid source URL {}: {}", s, e)))?;
            Ok(SourceLocation::Url(url))
        } else {
            Ok(SourceLocation::Path(PathBuf::from(s)))
        }
    }
}

impl From<PathBuf> for SourceLocation {
    fn from(p: PathBuf) -> Self {
        SourceLocation::Path(p)
    }
}

impl From<&std::path::Path> for SourceLocation {
    fn from(p: &std::path::Path) -> Self {
        SourceLocation::Path(p.to_path_buf())
    }
}

impl From<Url> for SourceLocation {
    fn from(u: Url) -> Self {
        SourceLocation::Url(u)
    }
}

/// Read the whole source into memory. No retry, no timeout.
#[instrument(level = "debug", skip(client, location), fields(source = %location))]
pub async fn fetch_source(client: &Client, location: &SourceLocation) -> Result<Vec<u8>> {
    let bytes = match location {
        SourceLocation::Path(path) => fs::read(path).await.map_err(|source| LoadError::Io {
            location: location.name(),
            source,
        })?,
        SourceLocation::Url(url) => {
            let http_err = |source: reqwest::Error| LoadError::Http {
                url: url.to_string(),
                source,
            };
            let resp = client
                .get(url.as_str())
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(http_err)?;
            resp.bytes().await.map_err(http_err)?.to_vec()
        }
    };
    debug!(bytes = bytes.len(), "fetched");
    Ok(bytes)
}
