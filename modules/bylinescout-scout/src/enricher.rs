//! Enrichment stage: resolve a LinkedIn profile for each distinct
//! author via a site-scoped web search inside an isolated browsing
//! context. Failure is contained per author; a failed lookup means
//! that author is simply absent from the output.

use futures::{stream, StreamExt};
use tracing::{info, warn};

use bylinescout_common::{ArticleRef, AuthorEnrichment, Candidate, PipelineConfig};
use render_client::{RenderError, RenderRequest};

use crate::rank::articles_for;
use crate::traits::PageRenderer;

const SEARCH_SURFACE: &str = "https://www.google.com/search";

/// Search-surface URL for one author, narrowed to the target domain.
pub fn search_url_for(author: &str, target_domain: &str) -> String {
    let query = format!("{author} site:{target_domain}");
    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("q", &query)
        .finish();
    format!("{SEARCH_SURFACE}?{encoded}")
}

/// Look up every author through a bounded pool. `buffered` preserves
/// input order, so output order always equals identity order; with
/// concurrency 1 this is exactly a sequential loop where no lookup
/// begins before the previous one has fully completed.
pub async fn enrich_all(
    renderer: &dyn PageRenderer,
    authors: &[String],
    ranked: &[Candidate],
    config: &PipelineConfig,
) -> Vec<AuthorEnrichment> {
    let results: Vec<Option<AuthorEnrichment>> =
        stream::iter(authors.iter().map(|author| enrich_one(renderer, author, ranked, config)))
            .buffered(config.enrich_concurrency.max(1))
            .collect()
            .await;

    results.into_iter().flatten().collect()
}

/// One author's lookup. Never propagates an error: any failure is
/// logged and converted into `None`.
async fn enrich_one(
    renderer: &dyn PageRenderer,
    author: &str,
    ranked: &[Candidate],
    config: &PipelineConfig,
) -> Option<AuthorEnrichment> {
    info!(author, "Searching for profile");

    match lookup_profile(renderer, author, config).await {
        Ok(linkedin_url) => {
            info!(author, url = linkedin_url.as_str(), "Profile resolved");
            Some(AuthorEnrichment {
                author: author.to_string(),
                linkedin_url,
                articles: articles_for(ranked, author)
                    .into_iter()
                    .map(ArticleRef::from)
                    .collect(),
            })
        }
        Err(err) => {
            warn!(author, error = %err, "Profile lookup failed, skipping author");
            None
        }
    }
}

/// Run the lookup inside a context owned exclusively by this attempt.
/// The context is torn down on both paths; a close failure is only
/// logged since the lookup result is already decided.
async fn lookup_profile(
    renderer: &dyn PageRenderer,
    author: &str,
    config: &PipelineConfig,
) -> Result<String, RenderError> {
    let ctx = renderer.open_context().await?;
    let result = profile_in_context(renderer, &ctx, author, config).await;
    if let Err(err) = renderer.close_context(ctx).await {
        warn!(author, error = %err, "Failed to close lookup context");
    }
    result
}

async fn profile_in_context(
    renderer: &dyn PageRenderer,
    ctx: &render_client::ContextHandle,
    author: &str,
    config: &PipelineConfig,
) -> Result<String, RenderError> {
    let result_anchor = format!(r#"a[href*="{}"]"#, config.target_domain);

    let req = RenderRequest::builder()
        .url(search_url_for(author, &config.target_domain))
        .wait_for_selector(result_anchor.clone())
        .wait_timeout_ms(config.wait_timeout_ms)
        .build();

    let page = renderer.content_in_context(ctx, &req).await?;

    // First domain-matching hit wins; the site: filter in the query
    // already narrowed the field.
    page.first_attr(&result_anchor, "href")
}
