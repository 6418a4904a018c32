//! The seam between orchestration and concrete extraction.

use crate::rendered::RenderedExtractor;
use crate::static_page::StaticExtractor;
use crate::strategy::{Strategy, StrategySelector};
use crate::{ExtractError, TitleOutcome};
use async_trait::async_trait;
use url::Url;

/// Source of raw titles for target pages.
///
/// The batch orchestrator only knows this trait, so tests can drive it with
/// scripted fetchers and no network.
#[async_trait]
pub trait TitleFetcher: Send + Sync {
    /// One attempt to read a title from `url`.
    async fn title_for(&self, url: &Url) -> Result<TitleOutcome, ExtractError>;
}

/// Production fetcher: consults the strategy selector and routes each URL
/// to static or rendered extraction.
pub struct SiteAwareFetcher {
    selector: StrategySelector,
    static_page: StaticExtractor,
    rendered: RenderedExtractor,
}

impl SiteAwareFetcher {
    pub fn new(
        selector: StrategySelector,
        static_page: StaticExtractor,
        rendered: RenderedExtractor,
    ) -> Self {
        Self {
            selector,
            static_page,
            rendered,
        }
    }
}

#[async_trait]
impl TitleFetcher for SiteAwareFetcher {
    async fn title_for(&self, url: &Url) -> Result<TitleOutcome, ExtractError> {
        let strategy = self.selector.select(url);
        tracing::debug!(
            target: "extract.route",
            host = url.host_str().unwrap_or("-"),
            ?strategy,
            "extract.strategy_selected"
        );
        match strategy {
            Strategy::Static => self.static_page.extract(url).await,
            Strategy::Rendered => self.rendered.extract(url).await,
        }
    }
}
