//! Domain types for the extraction → ranking → enrichment pipeline.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Placeholder values used only at the serialization boundary, for
/// compatibility with the report's downstream consumers. Pipeline
/// logic works with optionals, never with these strings.
pub const NO_TITLE: &str = "No title";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const NO_URL: &str = "No URL";
pub const NO_AUTHOR_PROFILE: &str = "No author profile";

/// One discovered article, possibly incomplete. Each field is absent
/// when its structural lookup matched nothing in the article block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub title: Option<String>,
    /// Raw popularity signal as displayed on the page, e.g. "1.2K"
    /// or "42 claps". Parsed lossily at ranking time.
    pub claps: Option<String>,
    pub author: Option<String>,
    pub content_url: Option<String>,
    pub author_profile_url: Option<String>,
}

impl Candidate {
    /// A candidate without a title carries no usable identity and is
    /// excluded from every downstream stage.
    pub fn is_usable(&self) -> bool {
        self.title.is_some()
    }

    /// Authorship identity used for dedup and article grouping.
    /// Authorless candidates share one "Unknown author" identity,
    /// matching the report's output contract.
    pub fn author_or_unknown(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// One article reference inside an enrichment result. Field names are
/// part of the external output contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleRef {
    pub article_title: String,
    pub medium_url: String,
}

impl From<&Candidate> for ArticleRef {
    fn from(c: &Candidate) -> Self {
        Self {
            article_title: c.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
            medium_url: c.content_url.clone().unwrap_or_else(|| NO_URL.to_string()),
        }
    }
}

/// One successfully resolved author. Authors whose lookup failed have
/// no entry at all; there is no placeholder/error record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorEnrichment {
    pub author: String,
    pub linkedin_url: String,
    pub articles: Vec<ArticleRef>,
}

/// The final output document. Created once at the end of the run,
/// written exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    /// ISO-8601 generation timestamp.
    pub generated_at: String,
    pub authors: Vec<AuthorEnrichment>,
}

impl Report {
    pub fn new(authors: Vec<AuthorEnrichment>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            authors,
        }
    }
}
