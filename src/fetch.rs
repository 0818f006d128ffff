use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::info;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Polite pause before each problem-page request. The one-time contest
/// metadata fetch and the login check pass `Duration::ZERO` instead.
pub const REQUEST_DELAY: Duration = Duration::from_secs(3);

static SCREEN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"var\s+userScreenName\s*=\s*"([^"]*)"\s*;"#).unwrap());

pub type CookieMap = HashMap<String, String>;

/// Page retrieval seam. The pipeline only ever talks to this trait, so
/// tests can count and stub fetches without touching the network.
#[async_trait]
pub trait PageSource {
    async fn fetch(&self, url: &str, delay: Duration) -> Result<String>;
}

/// reqwest-backed source: browser-like UA, 10 s timeout, optional session
/// cookies. One request at a time, each preceded by `delay`.
pub struct HttpSource {
    client: reqwest::Client,
    cookie_header: Option<String>,
}

impl HttpSource {
    pub fn new(cookies: Option<CookieMap>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        let cookie_header = cookies.map(|map| {
            map.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ")
        });

        Ok(Self {
            client,
            cookie_header,
        })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str, delay: Duration) -> Result<String> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut request = self.client.get(url);
        if let Some(header) = &self.cookie_header {
            request = request.header(reqwest::header::COOKIE, header);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request failed: {}", url))?
            .error_for_status()
            .with_context(|| format!("bad status from {}", url))?;

        Ok(response.text().await?)
    }
}

/// Session cookies from a JSON object file. A missing file is guest access,
/// not an error; a present but unparseable file is.
pub fn load_cookies(path: &Path) -> Result<Option<CookieMap>> {
    if !path.exists() {
        info!("{} not found, accessing as guest", path.display());
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read cookie file: {}", path.display()))?;
    let map: CookieMap = serde_json::from_str(&text)
        .with_context(|| format!("invalid cookie file: {}", path.display()))?;
    info!("cookies loaded from {}", path.display());
    Ok(Some(map))
}

/// Logged-in screen name from the top page's inline script; an empty name
/// means the session is not authenticated.
pub fn screen_name(html: &str) -> Option<String> {
    SCREEN_NAME_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
        .filter(|name| !name.is_empty())
}

// ── Tests ──
