use crate::api::RedditApiClient;
use crate::simulator::SimulatedSource;
use themetracer_core::{CoreError, PostPage, SearchQuery, SourceConfig};
use tracing::debug;

/// Where posts come from. Chosen from an explicit [`SourceConfig`] each time
/// a source is built; callers never see which variant answered.
#[derive(Debug)]
pub enum PostSource {
    Live(RedditApiClient),
    Simulated(SimulatedSource),
}

impl PostSource {
    pub fn from_config(config: &SourceConfig) -> Result<Self, CoreError> {
        let source = if config.use_live_source {
            PostSource::Live(RedditApiClient::from_config(config)?)
        } else {
            PostSource::Simulated(SimulatedSource::from_config(config))
        };
        debug!("Built {} post source", source.kind());
        Ok(source)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, PostSource::Live(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PostSource::Live(_) => "live",
            PostSource::Simulated(_) => "simulated",
        }
    }

    pub async fn fetch(
        &self,
        query: &SearchQuery,
        limit: u32,
        after: Option<&str>,
    ) -> Result<PostPage, CoreError> {
        match self {
            PostSource::Live(client) => client.fetch_posts(query, limit, after).await,
            PostSource::Simulated(simulator) => simulator.fetch_posts(query, limit, after).await,
        }
    }
}
