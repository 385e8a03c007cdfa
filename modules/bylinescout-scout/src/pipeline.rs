//! The linear pipeline: extract → rank → dedup authors → enrich →
//! report. Extraction failure aborts the run; enrichment failures are
//! contained per author inside the enricher.

use anyhow::Result;
use tracing::info;

use bylinescout_common::{PipelineConfig, Report};

use crate::stats::ScoutStats;
use crate::traits::PageRenderer;
use crate::{enricher, extractor, rank};

pub async fn run(
    renderer: &dyn PageRenderer,
    config: &PipelineConfig,
) -> Result<(Report, ScoutStats)> {
    let mut stats = ScoutStats::default();

    let candidates = extractor::extract(renderer, config).await?;
    stats.candidates_found = candidates.len() as u32;

    let ranked = rank::rank(candidates, config.top_k);
    stats.ranked = ranked.len() as u32;
    info!(ranked = ranked.len(), "Ranked top articles");

    let authors = rank::distinct_authors(&ranked, config.top_m);
    stats.authors_tried = authors.len() as u32;

    let enriched = enricher::enrich_all(renderer, &authors, &ranked, config).await;
    stats.authors_resolved = enriched.len() as u32;
    stats.authors_failed = stats.authors_tried - stats.authors_resolved;

    Ok((Report::new(enriched), stats))
}
