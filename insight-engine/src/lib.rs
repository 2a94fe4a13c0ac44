//! Keyword-based sentiment classification and the aggregate views derived
//! from a classified post collection.

pub mod aggregator;
pub mod classifier;
pub mod communities;
pub mod composer;
pub mod text;
pub mod word_cloud;

pub use aggregator::{aggregate, Aggregate, GroupCount};
pub use classifier::{classify, ingest};
pub use communities::suggest_communities;
pub use composer::compose;
pub use word_cloud::{word_cloud, WordCloudEntry};

#[cfg(test)]
mod tests;
