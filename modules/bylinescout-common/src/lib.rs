pub mod config;
pub mod types;

pub use config::{AppConfig, PipelineConfig};
pub use types::{ArticleRef, AuthorEnrichment, Candidate, Report};
