use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{StatusCode, multipart};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Non-success answer from the server, rendered the way the CLI reports it.
#[derive(thiserror::Error, Debug)]
#[error("Error {}: {body}", .status.as_u16())]
pub struct ApiError {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct Uploaded {
    pub filename: String,
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    pub size: i64,
    pub uploaded_at: String,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: reqwest::Client::new() }
    }

    fn url(&self, route: &str, filename: Option<&str>) -> String {
        match filename {
            Some(name) => format!("{}/{}/{}", self.base_url, route, urlencoding::encode(name)),
            None => format!("{}/{}", self.base_url, route),
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError { status, body }.into())
    }

    pub async fn upload(&self, path: &Path) -> Result<Uploaded> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} has no usable file name", path.display()))?
            .to_string();
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let part = multipart::Part::bytes(data).file_name(name);
        let form = multipart::Form::new().part("file", part);
        let url = self.url("upload", None);
        log::debug!("POST {}", url);

        let resp = self.http.post(&url).multipart(form).send().await?;
        let uploaded = Self::check(resp).await?.json::<Uploaded>().await?;
        Ok(uploaded)
    }

    /// Streams the file to `out` (default: `./<name>`), returning where it went.
    pub async fn download(&self, name: &str, out: Option<&Path>) -> Result<PathBuf> {
        let url = self.url("download", Some(name));
        log::debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        let mut resp = Self::check(resp).await?;

        let target = out.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(name));
        let mut file = tokio::fs::File::create(&target)
            .await
            .with_context(|| format!("Failed to create {}", target.display()))?;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(target)
    }

    pub async fn list(&self) -> Result<Vec<FileEntry>> {
        let url = self.url("list", None);
        log::debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        let files = Self::check(resp).await?.json::<Vec<FileEntry>>().await?;
        Ok(files)
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let url = self.url("delete", Some(name));
        log::debug!("DELETE {}", url);

        let resp = self.http.delete(&url).send().await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError { status, body }.into())
    }

    /// Never fails: the outcome, good or bad, is the returned text.
    pub async fn ping(&self) -> String {
        let url = self.url("health", None);
        match self.http.get(&url).timeout(PING_TIMEOUT).send().await {
            Ok(resp) if resp.status().is_success() => "OK".to_string(),
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                format!("{status}:{body}")
            }
            Err(e) => e.to_string(),
        }
    }
}

pub fn render_listing(files: &[FileEntry]) -> String {
    if files.is_empty() {
        return "No files on the server yet".to_string();
    }

    let mut out = String::from("Uploaded At           Size (bytes)  Filename");
    for file in files {
        let uploaded_at = file.uploaded_at.get(..19).unwrap_or(&file.uploaded_at);
        out.push_str(&format!("\n{}    {:>9} B  {}", uploaded_at, file.size, file.filename));
    }
    out
}
