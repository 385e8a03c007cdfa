use anyhow::{Context, Result};

/// Default search surface: Medium's AI search results.
pub const DEFAULT_SEARCH_URL: &str = "https://medium.com/search?q=artificial%20intelligence";

/// Tunables threaded through the pipeline entry point. Defaults match
/// the reference behavior; nothing here is read from the environment
/// except via the explicit `AppConfig` overrides.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub search_url: String,
    /// Domain the secondary lookup is narrowed to.
    pub target_domain: String,
    pub scroll_rounds: u32,
    /// Ranked articles kept after sorting.
    pub top_k: usize,
    /// Distinct authors looked up on the secondary surface.
    pub top_m: usize,
    pub wait_timeout_ms: u64,
    pub scroll_pause_ms: u64,
    /// Parallel enrichment lookups. 1 reproduces the strictly
    /// sequential reference behavior.
    pub enrich_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            target_domain: "linkedin.com".to_string(),
            scroll_rounds: 3,
            top_k: 20,
            top_m: 10,
            wait_timeout_ms: 30_000,
            scroll_pause_ms: 2_000,
            enrich_concurrency: 1,
        }
    }
}

/// Environment-specific values: where the render service lives and
/// where the report goes. Everything else stays in `PipelineConfig`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub renderer_url: String,
    pub renderer_token: Option<String>,
    pub output_path: String,
    pub search_url: Option<String>,
    pub enrich_concurrency: Option<usize>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            renderer_url: std::env::var("RENDERER_URL")
                .context("RENDERER_URL is required (base URL of the render service)")?,
            renderer_token: std::env::var("RENDERER_TOKEN").ok(),
            output_path: std::env::var("OUTPUT_PATH").unwrap_or_else(|_| "authors.json".to_string()),
            search_url: std::env::var("SEARCH_URL").ok(),
            enrich_concurrency: std::env::var("ENRICH_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok()),
        })
    }

    pub fn log_redacted(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => {
                    let n = v.len().min(5);
                    format!("{}...({} chars)", &v[..n], v.len())
                }
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  RENDERER_URL: {}", self.renderer_url);
        tracing::info!("  RENDERER_TOKEN: {}", preview_opt(&self.renderer_token));
        tracing::info!("  OUTPUT_PATH: {}", self.output_path);
    }

    /// Pipeline tunables with env overrides applied on top of the
    /// reference defaults.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut cfg = PipelineConfig::default();
        if let Some(url) = &self.search_url {
            cfg.search_url = url.clone();
        }
        if let Some(n) = self.enrich_concurrency {
            cfg.enrich_concurrency = n.max(1);
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.scroll_rounds, 3);
        assert_eq!(cfg.top_k, 20);
        assert_eq!(cfg.top_m, 10);
        assert_eq!(cfg.enrich_concurrency, 1);
        assert_eq!(cfg.target_domain, "linkedin.com");
    }
}
