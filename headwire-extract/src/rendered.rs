//! Title discovery from a fully rendered page.

use crate::normalize::squash_whitespace;
use crate::{ExtractError, TitleOutcome};
use headwire_drivers::headwire_browser::driver::BrowserDriver;
use headwire_drivers::headwire_browser::page::BrowserPage;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;
use uuid::Uuid;

/// Bounded, best-effort wait for the headline element to hydrate.
const HEADING_WAIT: Duration = Duration::from_secs(5);

/// DOM selectors read in priority order once the page has rendered.
const TEXT_CANDIDATES: [&str; 3] = ["h1", ".headline", "[role='heading']"];

/// Drives a headless browser to read titles from pages that construct
/// their content client-side.
///
/// Every call owns an isolated browser session which is torn down on all
/// exit paths; a leaked session keeps a browser process alive. When every
/// candidate fails, the rendered markup and a screenshot are written to the
/// debug directory for offline inspection.
pub struct RenderedExtractor {
    headless: bool,
    nav_timeout: Duration,
    debug_dir: PathBuf,
}

impl RenderedExtractor {
    pub fn new(headless: bool, nav_timeout: Duration, debug_dir: impl Into<PathBuf>) -> Self {
        Self {
            headless,
            nav_timeout,
            debug_dir: debug_dir.into(),
        }
    }

    /// One extraction attempt against `url`.
    ///
    /// Session-creation failures, navigation timeouts, and driver errors
    /// surface as [`ExtractError`] for the retry layer; a rendered page with
    /// no title signal resolves to [`TitleOutcome::NotFound`].
    pub async fn extract(&self, url: &Url) -> Result<TitleOutcome, ExtractError> {
        let mut driver = BrowserDriver::new(self.headless)
            .await
            .map_err(|e| ExtractError::Browser(e.to_string()))?;

        let outcome = self.extract_with(&mut driver, url).await;

        // Teardown runs no matter how extraction went.
        if let Err(err) = driver.close().await {
            tracing::warn!(
                target: "extract.rendered",
                error = %err,
                "browser.session.close_failed"
            );
        }

        outcome
    }

    async fn extract_with(
        &self,
        driver: &mut BrowserDriver,
        url: &Url,
    ) -> Result<TitleOutcome, ExtractError> {
        let page = timeout(self.nav_timeout, driver.goto(url.as_str()))
            .await
            .map_err(|_| ExtractError::Timeout)?
            .map_err(|e| ExtractError::Browser(e.to_string()))?;

        // Some pages hydrate the headline well after load; pages that never
        // render one still proceed to extraction.
        let appeared = page
            .wait_for("h1", HEADING_WAIT)
            .await
            .map_err(browser_err)?;
        if !appeared {
            tracing::debug!(
                target: "extract.rendered",
                host = url.host_str().unwrap_or("-"),
                "rendered.heading_wait.elapsed"
            );
        }

        if let Some(title) = self.first_candidate(&page).await? {
            tracing::debug!(
                target: "extract.rendered",
                host = url.host_str().unwrap_or("-"),
                "rendered.extract.found"
            );
            return Ok(TitleOutcome::Found(title));
        }

        self.dump_debug_artifacts(&page, url).await;
        Ok(TitleOutcome::NotFound)
    }

    /// Walk the rendered-DOM candidate chain, returning the first non-empty
    /// signal: heading text, content-class text, heading-role text, og:title
    /// meta, and finally the browser's own page title.
    async fn first_candidate(&self, page: &BrowserPage) -> Result<Option<String>, ExtractError> {
        for selector in TEXT_CANDIDATES {
            if let Some(text) = page.text_of(selector).await.map_err(browser_err)? {
                let text = squash_whitespace(&text);
                if !text.is_empty() {
                    return Ok(Some(text));
                }
            }
        }

        if let Some(content) = page
            .attr_of("meta[property='og:title']", "content")
            .await
            .map_err(browser_err)?
        {
            let content = squash_whitespace(&content);
            if !content.is_empty() {
                return Ok(Some(content));
            }
        }

        let doc_title = squash_whitespace(&page.title().await.map_err(browser_err)?);
        if !doc_title.is_empty() {
            return Ok(Some(doc_title));
        }

        Ok(None)
    }

    /// Side-channel snapshot for pages where every candidate failed: the
    /// full rendered markup plus a viewport screenshot. Best-effort — a
    /// failed dump is logged, never escalated.
    async fn dump_debug_artifacts(&self, page: &BrowserPage, url: &Url) {
        let stem = artifact_stem(url);
        if let Err(err) = tokio::fs::create_dir_all(&self.debug_dir).await {
            tracing::warn!(
                target: "extract.rendered",
                error = %err,
                dir = %self.debug_dir.display(),
                "rendered.debug.dir_failed"
            );
            return;
        }

        match page.source().await {
            Ok(html) => {
                let path = self.debug_dir.join(format!("{stem}.html"));
                write_artifact(&path, html.as_bytes()).await;
            }
            Err(err) => {
                tracing::warn!(target: "extract.rendered", error = %err, "rendered.debug.source_failed");
            }
        }

        match page.screenshot_png().await {
            Ok(png) => {
                let path = self.debug_dir.join(format!("{stem}.png"));
                write_artifact(&path, &png).await;
            }
            Err(err) => {
                tracing::warn!(target: "extract.rendered", error = %err, "rendered.debug.screenshot_failed");
            }
        }
    }
}

fn browser_err(err: anyhow::Error) -> ExtractError {
    ExtractError::Browser(err.to_string())
}

fn artifact_stem(url: &Url) -> String {
    let host = url.host_str().unwrap_or("page").replace('.', "_");
    format!("{host}-{}", Uuid::new_v4())
}

async fn write_artifact(path: &Path, bytes: &[u8]) {
    match tokio::fs::write(path, bytes).await {
        Ok(()) => {
            tracing::info!(
                target: "extract.rendered",
                path = %path.display(),
                "rendered.debug.artifact_written"
            );
        }
        Err(err) => {
            tracing::warn!(
                target: "extract.rendered",
                error = %err,
                path = %path.display(),
                "rendered.debug.write_failed"
            );
        }
    }
}
