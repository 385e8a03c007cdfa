pub mod error;

pub use error::{RenderError, Result};

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Instructions for a single render: where to navigate, which selector
/// to wait for, and how many progressive-load scroll rounds to run
/// before snapshotting the document.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[builder(setter(into))]
    pub url: String,

    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<String>,

    #[builder(default = 30_000)]
    pub wait_timeout_ms: u64,

    /// Fixed round count; there is no "stop when no new content" logic.
    #[builder(default)]
    pub scroll_rounds: u32,

    #[builder(default = 2_000)]
    pub scroll_pause_ms: u64,
}

/// An isolated browsing context on the render service. State inside one
/// context never leaks into another.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextHandle {
    pub id: String,
}

/// Final HTML snapshot of a rendered page, with structural projection
/// helpers. `Html` is parsed on demand and never held across awaits.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: String,
    pub html: String,
}

impl RenderedPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Run a pure per-block projection over every element matching
    /// `selector`. The projection sees one block at a time; lookups
    /// inside it are scoped to that block.
    pub fn project_all<T>(
        &self,
        selector: &str,
        projection: impl Fn(&ElementRef<'_>) -> T,
    ) -> Result<Vec<T>> {
        let sel = parse_selector(selector)?;
        let doc = Html::parse_document(&self.html);
        Ok(doc.select(&sel).map(|el| projection(&el)).collect())
    }

    /// Read an attribute from the first element matching `selector`.
    pub fn first_attr(&self, selector: &str, attr: &str) -> Result<String> {
        let sel = parse_selector(selector)?;
        let doc = Html::parse_document(&self.html);
        doc.select(&sel)
            .find_map(|el| el.value().attr(attr).map(str::to_string))
            .ok_or_else(|| RenderError::NotFound {
                selector: selector.to_string(),
            })
    }

    /// Resolve a possibly-relative href against the page URL. Returns
    /// the href unchanged if either side fails to parse.
    pub fn resolve_href(&self, href: &str) -> String {
        match url::Url::parse(&self.url).and_then(|base| base.join(href)) {
            Ok(abs) => abs.to_string(),
            Err(_) => href.to_string(),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| RenderError::Selector(format!("{selector}: {e}")))
}

/// Client for a browserless-style rendering service with session
/// support: stateless renders via /content, isolated contexts via
/// /context for lookups that must not share browsing state.
pub struct RenderClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RenderClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let mut endpoint = format!("{}{path}", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }

    /// Render a page in the shared outer session.
    pub async fn content(&self, req: &RenderRequest) -> Result<RenderedPage> {
        self.render_at("/content", req).await
    }

    /// Open an isolated browsing context.
    pub async fn open_context(&self) -> Result<ContextHandle> {
        let resp = self
            .client
            .post(self.endpoint("/context"))
            .send()
            .await
            .map_err(|e| RenderError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<ContextHandle>()
            .await
            .map_err(|e| RenderError::Network(e.to_string()))
    }

    /// Render a page inside an isolated context.
    pub async fn content_in_context(
        &self,
        ctx: &ContextHandle,
        req: &RenderRequest,
    ) -> Result<RenderedPage> {
        self.render_at(&format!("/context/{}/content", ctx.id), req)
            .await
    }

    /// Tear a context down. Callers invoke this unconditionally after a
    /// lookup attempt, success or failure.
    pub async fn close_context(&self, ctx: ContextHandle) -> Result<()> {
        let resp = self
            .client
            .delete(self.endpoint(&format!("/context/{}", ctx.id)))
            .send()
            .await
            .map_err(|e| RenderError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn render_at(&self, path: &str, req: &RenderRequest) -> Result<RenderedPage> {
        let resp = self
            .client
            .post(self.endpoint(path))
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    RenderError::Navigation {
                        url: req.url.clone(),
                        message: e.to_string(),
                    }
                } else {
                    RenderError::Network(e.to_string())
                }
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::REQUEST_TIMEOUT
            || status == reqwest::StatusCode::GATEWAY_TIMEOUT
        {
            return Err(RenderError::Timeout {
                url: req.url.clone(),
                selector: req.wait_for_selector.clone().unwrap_or_default(),
            });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let html = resp
            .text()
            .await
            .map_err(|e| RenderError::Network(e.to_string()))?;

        tracing::debug!(url = req.url.as_str(), bytes = html.len(), "Page rendered");
        Ok(RenderedPage::new(req.url.clone(), html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <article><h2>First</h2><a href="/p/1">read</a></article>
          <article><h2>Second</h2></article>
          <a href="https://www.linkedin.com/in/someone">profile</a>
        </body></html>
    "#;

    fn page() -> RenderedPage {
        RenderedPage::new("https://medium.com/search?q=ai", PAGE)
    }

    #[test]
    fn project_all_is_scoped_per_block() {
        let titles = page()
            .project_all("article", |block| {
                let sel = Selector::parse("h2").unwrap();
                block
                    .select(&sel)
                    .next()
                    .map(|el| el.text().collect::<String>())
            })
            .unwrap();

        assert_eq!(
            titles,
            vec![Some("First".to_string()), Some("Second".to_string())]
        );
    }

    #[test]
    fn first_attr_returns_first_match() {
        let href = page()
            .first_attr(r#"a[href*="linkedin.com"]"#, "href")
            .unwrap();
        assert_eq!(href, "https://www.linkedin.com/in/someone");
    }

    #[test]
    fn first_attr_reports_not_found() {
        let err = page().first_attr("a.missing", "href").unwrap_err();
        assert!(matches!(err, RenderError::NotFound { .. }));
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let err = page().first_attr("[[[", "href").unwrap_err();
        assert!(matches!(err, RenderError::Selector(_)));
    }

    #[test]
    fn resolve_href_joins_relative_links() {
        assert_eq!(
            page().resolve_href("/p/1"),
            "https://medium.com/p/1".to_string()
        );
        assert_eq!(
            page().resolve_href("https://other.com/x"),
            "https://other.com/x".to_string()
        );
    }

    #[test]
    fn render_request_serializes_camel_case() {
        let req = RenderRequest::builder()
            .url("https://example.com")
            .wait_for_selector("article")
            .scroll_rounds(3u32)
            .build();

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["waitForSelector"], "article");
        assert_eq!(json["scrollRounds"], 3);
        assert_eq!(json["waitTimeoutMs"], 30_000);
    }
}
