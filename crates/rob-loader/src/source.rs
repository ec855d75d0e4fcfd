//! Where the export lives and how to fetch its bytes.

use std::{fmt, io, path::PathBuf, time::Duration};

use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{LoadError, Result};

pub const DEFAULT_BUCKET: &str = "rob-oliver";
pub const DEFAULT_KEY: &str = "data/deployment/rob.csv";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Location of the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
  File {
    path: PathBuf,
  },
  /// A publicly readable S3 object, fetched without request signing.
  S3 {
    #[serde(default = "default_bucket")]
    bucket:   String,
    #[serde(default = "default_key")]
    key:      String,
    #[serde(default)]
    region:   Option<String>,
    /// Path-style endpoint override, e.g. for an S3-compatible store.
    #[serde(default)]
    endpoint: Option<String>,
  },
}

fn default_bucket() -> String { DEFAULT_BUCKET.to_owned() }

fn default_key() -> String { DEFAULT_KEY.to_owned() }

impl Default for Source {
  fn default() -> Self {
    Self::S3 {
      bucket:   default_bucket(),
      key:      default_key(),
      region:   None,
      endpoint: None,
    }
  }
}

impl Source {
  /// The HTTPS URL of an S3 object; `None` for local files.
  pub fn object_url(&self) -> Option<String> {
    match self {
      Self::File { .. } => None,
      Self::S3 { bucket, key, region, endpoint } => Some(match (endpoint, region) {
        (Some(endpoint), _) => {
          format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
        }
        (None, Some(region)) => {
          format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
        }
        (None, None) => format!("https://{bucket}.s3.amazonaws.com/{key}"),
      }),
    }
  }
}

impl fmt::Display for Source {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::File { path } => write!(f, "{}", path.display()),
      Self::S3 { bucket, key, .. } => write!(f, "s3://{bucket}/{key}"),
    }
  }
}

// ─── Fetching ────────────────────────────────────────────────────────────────

/// Read the raw export from `source`.
pub async fn fetch(source: &Source) -> Result<Bytes> {
  match source {
    Source::File { path } => tokio::fs::read(path)
      .await
      .map(Bytes::from)
      .map_err(|e| classify_io(source, e)),
    Source::S3 { .. } => {
      let url = source.object_url().unwrap_or_default();
      fetch_http(source, &url).await
    }
  }
}

fn classify_io(source: &Source, error: io::Error) -> LoadError {
  let location = source.to_string();
  match error.kind() {
    io::ErrorKind::NotFound => LoadError::NotFound { location },
    io::ErrorKind::PermissionDenied => LoadError::AccessDenied { location },
    _ => LoadError::Io { location, source: error },
  }
}

async fn fetch_http(source: &Source, url: &str) -> Result<Bytes> {
  let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

  tracing::debug!(%url, "fetching case export");
  let resp = client.get(url).send().await?;

  let location = source.to_string();
  match resp.status() {
    StatusCode::NOT_FOUND => Err(LoadError::NotFound { location }),
    StatusCode::FORBIDDEN => Err(LoadError::AccessDenied { location }),
    status if !status.is_success() => Err(LoadError::Remote {
      location,
      status: status.as_u16(),
    }),
    _ => Ok(resp.bytes().await?),
  }
}
