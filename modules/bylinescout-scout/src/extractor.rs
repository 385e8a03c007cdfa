//! Extraction stage: drive the render accessor to load the search
//! surface, trigger progressive loading, and project every article
//! block into a `Candidate`.

use anyhow::Result;
use scraper::{ElementRef, Selector};
use tracing::info;

use bylinescout_common::{Candidate, PipelineConfig};
use render_client::{RenderError, RenderRequest, RenderedPage};

use crate::traits::PageRenderer;

/// Content-block container on the search surface.
const ARTICLE_BLOCK: &str = "article";
const TITLE: &str = "h2";
const CLAPS: &str = r#"button[aria-label*="clap"]"#;

/// Load the search surface and extract all candidate articles.
///
/// A failure here is fatal for the run: without the initial load there
/// is nothing to rank or enrich, so the error propagates.
pub async fn extract(
    renderer: &dyn PageRenderer,
    config: &PipelineConfig,
) -> Result<Vec<Candidate>> {
    info!(url = config.search_url.as_str(), "Loading search surface");

    let req = RenderRequest::builder()
        .url(config.search_url.clone())
        .wait_for_selector(ARTICLE_BLOCK)
        .wait_timeout_ms(config.wait_timeout_ms)
        .scroll_rounds(config.scroll_rounds)
        .scroll_pause_ms(config.scroll_pause_ms)
        .build();

    let page = renderer.content(&req).await?;
    let candidates = project_candidates(&page)?;

    info!(found = candidates.len(), "Extracted candidate articles");
    Ok(candidates)
}

/// Project every article block in the rendered document. Candidates
/// without a usable title are dropped here; everything downstream can
/// assume `is_usable()`.
pub fn project_candidates(page: &RenderedPage) -> std::result::Result<Vec<Candidate>, RenderError> {
    let raw = page.project_all(ARTICLE_BLOCK, |block| project_block(page, block))?;
    Ok(raw.into_iter().filter(Candidate::is_usable).collect())
}

/// Pure per-block projection. Every lookup is scoped to the block, and
/// every miss yields `None` rather than an error, so the projection is
/// total over arbitrary markup.
fn project_block(page: &RenderedPage, block: &ElementRef<'_>) -> Candidate {
    let author_anchor = first_href(block, |href| href.contains("/@"));
    let content_anchor = first_href(block, |href| !href.contains("/@"));

    Candidate {
        title: select_text(block, TITLE),
        claps: select_text(block, CLAPS),
        author: author_anchor
            .as_ref()
            .map(|(_, text)| text.clone())
            .filter(|t| !t.is_empty()),
        content_url: content_anchor.map(|(href, _)| page.resolve_href(&href)),
        author_profile_url: author_anchor.map(|(href, _)| page.resolve_href(&href)),
    }
}

/// Trimmed text of the first descendant matching `selector`, if any.
fn select_text(block: &ElementRef<'_>, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let el = block.select(&sel).next()?;
    let text = el.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// First descendant anchor whose href satisfies `pred`, as
/// (href, trimmed text).
fn first_href(
    block: &ElementRef<'_>,
    pred: impl Fn(&str) -> bool,
) -> Option<(String, String)> {
    let sel = Selector::parse("a[href]").ok()?;
    block.select(&sel).find_map(|a| {
        let href = a.value().attr("href")?;
        pred(href).then(|| {
            (
                href.to_string(),
                a.text().collect::<String>().trim().to_string(),
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> RenderedPage {
        RenderedPage::new("https://medium.com/search?q=ai", html)
    }

    #[test]
    fn projects_full_blocks() {
        let html = r#"
            <article>
              <h2>Transformers Explained</h2>
              <button aria-label="42 claps">42</button>
              <a href="/@ada">Ada Lovelace</a>
              <a href="/p/transformers">read more</a>
            </article>
        "#;

        let candidates = project_candidates(&page(html)).unwrap();
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.title.as_deref(), Some("Transformers Explained"));
        assert_eq!(c.claps.as_deref(), Some("42"));
        assert_eq!(c.author.as_deref(), Some("Ada Lovelace"));
        assert_eq!(
            c.author_profile_url.as_deref(),
            Some("https://medium.com/@ada")
        );
        assert_eq!(
            c.content_url.as_deref(),
            Some("https://medium.com/p/transformers")
        );
    }

    #[test]
    fn missing_fields_become_none_not_errors() {
        let html = r#"<article><h2>Bare Title</h2></article>"#;
        let candidates = project_candidates(&page(html)).unwrap();
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.title.as_deref(), Some("Bare Title"));
        assert!(c.claps.is_none());
        assert!(c.author.is_none());
        assert!(c.content_url.is_none());
        assert!(c.author_profile_url.is_none());
    }

    #[test]
    fn titleless_blocks_are_dropped() {
        let html = r#"
            <article><a href="/@x">X</a></article>
            <article><h2>Kept</h2></article>
        "#;
        let candidates = project_candidates(&page(html)).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title.as_deref(), Some("Kept"));
    }

    #[test]
    fn field_lookups_do_not_leak_across_blocks() {
        let html = r#"
            <article><h2>First</h2><a href="/@ada">Ada</a></article>
            <article><h2>Second</h2></article>
        "#;
        let candidates = project_candidates(&page(html)).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].author.as_deref(), Some("Ada"));
        assert!(candidates[1].author.is_none(), "author leaked across blocks");
    }

    #[test]
    fn author_and_content_anchors_are_distinguished() {
        // Author anchor first in document order; content link must
        // still be the first non-profile anchor.
        let html = r#"
            <article>
              <h2>Order</h2>
              <a href="/@ada">Ada</a>
              <a href="/@ada/followers">followers</a>
              <a href="/p/1">story</a>
            </article>
        "#;
        let candidates = project_candidates(&page(html)).unwrap();
        let c = &candidates[0];
        assert_eq!(
            c.author_profile_url.as_deref(),
            Some("https://medium.com/@ada")
        );
        assert_eq!(c.content_url.as_deref(), Some("https://medium.com/p/1"));
    }
}
