use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Wikipedia client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// MediaWiki action API endpoint
    #[serde(default = "WikiConfig::default_api_url")]
    pub api_url: String,

    /// Request timeout (seconds)
    #[serde(default = "WikiConfig::default_timeout")]
    pub timeout: u64,

    /// User-Agent header
    #[serde(default = "WikiConfig::default_user_agent")]
    pub user_agent: String,

    /// Maximum response size (bytes)
    #[serde(default = "WikiConfig::default_max_size")]
    pub max_size: usize,

    /// Resolve titles through search first, so `ada lovelace` finds `Ada Lovelace`
    #[serde(default = "WikiConfig::default_auto_suggest")]
    pub auto_suggest: bool,
}

impl WikiConfig {
    fn default_api_url() -> String {
        "https://en.wikipedia.org/w/api.php".to_string()
    }

    const fn default_timeout() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        format!("wikibot/{} (infobox question bot)", env!("CARGO_PKG_VERSION"))
    }

    const fn default_max_size() -> usize {
        5_000_000 // 5MB, long articles render large
    }

    const fn default_auto_suggest() -> bool {
        true
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            timeout: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
            max_size: Self::default_max_size(),
            auto_suggest: Self::default_auto_suggest(),
        }
    }
}

/// Source of rendered article HTML.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Rendered HTML of the page best matching `title`, or `None` if there is
    /// no such page.
    async fn page_html(&self, title: &str) -> Result<Option<String>>;
}

/// `PageSource` backed by the `MediaWiki` action API.
pub struct WikiClient {
    client: Client,
    config: WikiConfig,
}

impl WikiClient {
    pub fn new(config: WikiConfig) -> Result<Self> {
        url::Url::parse(&config.api_url)
            .with_context(|| format!("Invalid wiki api_url: {}", config.api_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value> {
        let url = url::Url::parse_with_params(&self.config.api_url, params)
            .context("Failed to build API URL")?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .header("Accept", "application/json")
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Wiki API returned HTTP {status}");
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read response")?;

        if bytes.len() > self.config.max_size {
            bail!(
                "Response too large: {} bytes (max: {})",
                bytes.len(),
                self.config.max_size
            );
        }

        serde_json::from_slice(&bytes).context("Wiki API returned invalid JSON")
    }

    /// Best title for a free-form subject, falling back to the subject itself.
    async fn resolve_title(&self, subject: &str) -> Result<String> {
        if !self.config.auto_suggest {
            return Ok(subject.to_string());
        }

        let body = self
            .get_json(&[
                ("action", "opensearch"),
                ("search", subject),
                ("limit", "1"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .await?;

        Ok(first_search_title(&body).map_or_else(
            || {
                debug!("No search suggestion for '{subject}'");
                subject.to_string()
            },
            ToString::to_string,
        ))
    }
}

#[async_trait]
impl PageSource for WikiClient {
    async fn page_html(&self, title: &str) -> Result<Option<String>> {
        let title = self.resolve_title(title).await?;
        info!("Fetching page '{title}'");

        let body = self
            .get_json(&[
                ("action", "parse"),
                ("page", title.as_str()),
                ("prop", "text"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .await?;

        parse_page_html(&body)
    }
}

/// First title of an `opensearch` response: `[query, [titles], [descriptions], [urls]]`.
fn first_search_title(body: &Value) -> Option<&str> {
    body.get(1)?.as_array()?.first()?.as_str()
}

/// Page HTML from a `parse` response (`formatversion=2`).
fn parse_page_html(body: &Value) -> Result<Option<String>> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_str).unwrap_or("unknown");
        if code == "missingtitle" {
            return Ok(None);
        }
        let message = error.get("info").and_then(Value::as_str).unwrap_or(code);
        bail!("Wiki API error: {message}");
    }

    body.pointer("/parse/text")
        .and_then(Value::as_str)
        .map(|html| Some(html.to_string()))
        .context("Wiki API response has no page text")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wiki_config_default() {
        let config = WikiConfig::default();
        assert_eq!(config.timeout, 10);
        assert!(config.auto_suggest);
        assert!(config.user_agent.contains("wikibot"));
        assert!(config.api_url.ends_with("api.php"));
    }

    #[test]
    fn test_wiki_config_partial_json() {
        let Ok(config) = serde_json::from_str::<WikiConfig>(r#"{"timeout": 3}"#) else {
            panic!("partial config should deserialize");
        };
        assert_eq!(config.timeout, 3);
        assert_eq!(config.max_size, 5_000_000);
    }

    #[test]
    fn test_wiki_client_new() {
        assert!(WikiClient::new(WikiConfig::default()).is_ok());
        let bad = WikiConfig {
            api_url: "not a url".to_string(),
            ..WikiConfig::default()
        };
        assert!(WikiClient::new(bad).is_err());
    }

    #[test]
    fn test_first_search_title() {
        let body = json!(["ada lovelace", ["Ada Lovelace"], [""], ["https://en.wikipedia.org/wiki/Ada_Lovelace"]]);
        assert_eq!(first_search_title(&body), Some("Ada Lovelace"));
        assert_eq!(first_search_title(&json!(["zzzz", [], [], []])), None);
    }

    #[test]
    fn test_parse_page_html() {
        let body = json!({"parse": {"title": "Mars", "pageid": 14640471, "text": "<div>Mars</div>"}});
        assert!(matches!(parse_page_html(&body), Ok(Some(ref html)) if html == "<div>Mars</div>"));

        let missing = json!({"error": {"code": "missingtitle", "info": "The page you specified doesn't exist."}});
        assert!(matches!(parse_page_html(&missing), Ok(None)));

        let failed = json!({"error": {"code": "ratelimited", "info": "Slow down"}});
        assert!(parse_page_html(&failed).is_err());
    }
}
