pub mod enricher;
pub mod extractor;
pub mod pipeline;
pub mod rank;
pub mod stats;
pub mod traits;
pub mod writer;
