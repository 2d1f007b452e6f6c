//! arXiv search and PDF download.
//!
//! Queries the arXiv Atom API, parses the feed with a handful of
//! regexes (the feed layout is small and stable) and downloads each
//! result's PDF into the papers directory. PDFs already on disk are
//! reused. A fixed delay follows every download to stay within
//! arXiv's rate limits.

use super::{DocumentSource, SourceBatch};
use crate::core::config::SourceConfig;
use crate::core::error::{PaperRagError, Result};
use crate::core::types::Document;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

static ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<entry>(.*?)</entry>").unwrap());
static ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<id>(.*?)</id>").unwrap());
static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<title>(.*?)</title>").unwrap());
static SUMMARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<summary>(.*?)</summary>").unwrap());
static PUBLISHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<published>(.*?)</published>").unwrap());
static AUTHOR_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<author>\s*<name>(.*?)</name>").unwrap());
static CATEGORY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<category\b[^>]*\bterm="([^"]+)""#).unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<link\b[^>]*>").unwrap());
static HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bhref="([^"]+)""#).unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// One parsed feed entry
#[derive(Debug, Clone, PartialEq)]
pub struct ArxivEntry {
    pub arxiv_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub published: DateTime<Utc>,
    pub categories: Vec<String>,
    pub pdf_url: String,
}

impl ArxivEntry {
    /// Local file name: dots (and old-style slashes) become underscores
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.arxiv_id.replace(['.', '/'], "_"))
    }

    fn into_document(self, pdf_path: PathBuf) -> Document {
        Document {
            arxiv_id: self.arxiv_id,
            title: self.title,
            authors: self.authors,
            abstract_text: self.summary,
            published: self.published,
            categories: self.categories,
            pdf_path,
        }
    }
}

/// Build the arXiv `search_query` expression
pub fn search_expression(query: &str, category: Option<&str>) -> String {
    match category {
        Some(cat) if !cat.trim().is_empty() => format!("cat:{} AND {}", cat.trim(), query),
        _ => query.to_string(),
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(&unescape(text), " ").trim().to_string()
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn parse_entry(body: &str) -> Result<ArxivEntry> {
    let id_url = capture(&ID, body)
        .map(str::trim)
        .ok_or_else(|| PaperRagError::FetchFailed("feed entry without <id>".to_string()))?;

    // http://arxiv.org/abs/2301.00001v1 or http://arxiv.org/abs/hep-th/9901001v1
    let arxiv_id = match id_url.split_once("/abs/") {
        Some((_, id)) => id.to_string(),
        None => id_url.rsplit('/').next().unwrap_or(id_url).to_string(),
    };

    let title = capture(&TITLE, body).map(normalize).unwrap_or_default();
    let summary = capture(&SUMMARY, body).map(normalize).unwrap_or_default();

    let published_raw = capture(&PUBLISHED, body).map(str::trim).ok_or_else(|| {
        PaperRagError::FetchFailed(format!("{arxiv_id}: entry without <published>"))
    })?;
    let published = DateTime::parse_from_rfc3339(published_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PaperRagError::FetchFailed(format!("{arxiv_id}: bad timestamp: {e}")))?;

    let authors = AUTHOR_NAME
        .captures_iter(body)
        .map(|c| normalize(&c[1]))
        .collect();

    let categories = CATEGORY
        .captures_iter(body)
        .map(|c| c[1].to_string())
        .collect();

    let pdf_url = LINK
        .find_iter(body)
        .map(|m| m.as_str())
        .find(|tag| tag.contains(r#"title="pdf""#))
        .and_then(|tag| capture(&HREF, tag))
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://arxiv.org/pdf/{arxiv_id}"));

    Ok(ArxivEntry {
        arxiv_id,
        title,
        authors,
        summary,
        published,
        categories,
        pdf_url,
    })
}

/// Parse an Atom feed into entries; malformed entries are returned
/// as errors in place so the caller can count them
pub fn parse_feed(xml: &str) -> Vec<Result<ArxivEntry>> {
    ENTRY
        .captures_iter(xml)
        .map(|c| parse_entry(&c[1]))
        .collect()
}

/// Document source backed by the arXiv API
pub struct ArxivSource {
    http: Client,
    api_url: String,
    papers_dir: PathBuf,
    download_delay: Duration,
}

impl ArxivSource {
    pub fn new(config: &SourceConfig, papers_dir: impl Into<PathBuf>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("paper-rag/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            papers_dir: papers_dir.into(),
            download_delay: Duration::from_secs(config.download_delay_secs),
        })
    }

    pub fn papers_dir(&self) -> &Path {
        &self.papers_dir
    }

    async fn fetch_feed(&self, expression: &str, max_results: usize) -> Result<String> {
        let max = max_results.to_string();
        let resp = self
            .http
            .get(&self.api_url)
            .query(&[
                ("search_query", expression),
                ("start", "0"),
                ("max_results", max.as_str()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await
            .map_err(|e| PaperRagError::FetchFailed(format!("arXiv search failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PaperRagError::FetchFailed(format!(
                "arXiv search returned {status}"
            )));
        }

        Ok(resp.text().await?)
    }

    async fn download(&self, url: &str, path: &Path) -> Result<()> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PaperRagError::FetchFailed(format!("{url} returned {status}")));
        }

        let bytes = resp.bytes().await?;
        save_pdf(path, &bytes).await
    }
}

/// Write to `<name>.pdf.part` and rename into place so an interrupted
/// download is never reused. The partial file is removed on failure.
async fn save_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    let partial = path.with_extension("pdf.part");
    let written = match tokio::fs::write(&partial, bytes).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
            tracing::debug!("Could not remove {:?}: {}", partial, cleanup);
        }
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl DocumentSource for ArxivSource {
    fn name(&self) -> &str {
        "arxiv"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        category: Option<&str>,
    ) -> Result<SourceBatch> {
        let expression = search_expression(query, category);
        tracing::info!("Searching arXiv for: {}", expression);

        let xml = self.fetch_feed(&expression, max_results).await?;
        tokio::fs::create_dir_all(&self.papers_dir).await?;

        let mut batch = SourceBatch::default();
        for parsed in parse_feed(&xml) {
            batch.stats.found += 1;

            let entry = match parsed {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping malformed feed entry: {}", e);
                    batch.stats.failed += 1;
                    continue;
                }
            };

            let path = self.papers_dir.join(entry.file_name());
            if path.exists() {
                tracing::info!("Already downloaded: {}", entry.title);
                batch.stats.already_present += 1;
                batch.documents.push(entry.into_document(path));
                continue;
            }

            tracing::info!("Downloading: {}", entry.title);
            match self.download(&entry.pdf_url, &path).await {
                Ok(()) => {
                    batch.stats.downloaded += 1;
                    batch.documents.push(entry.into_document(path));
                    tokio::time::sleep(self.download_delay).await;
                }
                Err(e) => {
                    if e.is_recoverable() {
                        tracing::warn!("Error downloading {}: {}", entry.title, e);
                    } else {
                        tracing::error!("Error saving {}: {}", entry.title, e);
                    }
                    batch.stats.failed += 1;
                }
            }
        }

        tracing::info!(
            "Found {} papers: {} downloaded, {} already present, {} failed",
            batch.stats.found,
            batch.stats.downloaded,
            batch.stats.already_present,
            batch.stats.failed
        );

        Ok(batch)
    }
}
