//! Title discovery from a plain HTTP response body.

use crate::normalize::squash_whitespace;
use crate::{ExtractError, TitleOutcome};
use headwire_http::PageClient;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Fetches a page over HTTP and reads its title from the raw markup.
///
/// Candidates are evaluated in strict priority order; the first non-empty
/// one wins:
///
/// 1. `og:title` meta content
/// 2. `twitter:title` meta content
/// 3. first `<h1>` text
/// 4. `<title>` text
#[derive(Clone)]
pub struct StaticExtractor {
    client: PageClient,
    timeout: Duration,
    selectors: TitleSelectors,
}

impl StaticExtractor {
    pub fn new(client: PageClient, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            selectors: TitleSelectors::new(),
        }
    }

    /// One extraction attempt against `url`.
    ///
    /// Transport failures and non-2xx statuses surface as [`ExtractError`]
    /// for the retry layer; a fully-read page with no title signal resolves
    /// to [`TitleOutcome::NotFound`].
    pub async fn extract(&self, url: &Url) -> Result<TitleOutcome, ExtractError> {
        let html = self.client.get_html(url, Some(self.timeout)).await?;
        let outcome = self.selectors.first_title(&html);
        tracing::debug!(
            target: "extract.static",
            host = url.host_str().unwrap_or("-"),
            found = outcome.is_found(),
            "static.extract.done"
        );
        Ok(outcome)
    }
}

/// Pre-parsed selectors for the candidate chain.
#[derive(Clone)]
struct TitleSelectors {
    og_title: Selector,
    twitter_title: Selector,
    h1: Selector,
    title: Selector,
}

impl TitleSelectors {
    fn new() -> Self {
        Self {
            og_title: Selector::parse(r#"meta[property="og:title"]"#).expect("og:title selector"),
            twitter_title: Selector::parse(r#"meta[name="twitter:title"]"#)
                .expect("twitter:title selector"),
            h1: Selector::parse("h1").expect("h1 selector"),
            title: Selector::parse("title").expect("title selector"),
        }
    }

    /// Walk the candidate chain over a parsed document.
    ///
    /// `Html::parse_document` is forgiving, so malformed markup degrades to
    /// missing candidates rather than an error.
    fn first_title(&self, html: &str) -> TitleOutcome {
        let document = Html::parse_document(html);

        let candidates = [
            meta_content(&document, &self.og_title),
            meta_content(&document, &self.twitter_title),
            element_text(&document, &self.h1),
            element_text(&document, &self.title),
        ];

        for candidate in candidates.into_iter().flatten() {
            let outcome = TitleOutcome::from_text(squash_whitespace(&candidate));
            if outcome.is_found() {
                return outcome;
            }
        }
        TitleOutcome::NotFound
    }
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

fn element_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}
