use anyhow::Result;
use fantoccini::{error::CmdError, Client, Locator};
use std::time::Duration;

/// High-level page wrapper providing the queries the rendered extractor
/// needs: element text, attribute reads, bounded waits, and page capture.
pub struct BrowserPage {
    pub(crate) client: Client,
}

impl BrowserPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Navigate to `url`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(anyhow::Error::from)?;
        Ok(())
    }

    /// Return the full page HTML source.
    pub async fn source(&self) -> Result<String> {
        self.client.source().await.map_err(anyhow::Error::from)
    }

    /// Return the page title via the browser's own title API.
    pub async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Visible text of the first element matching `selector`, or `None`
    /// when no such element exists in the rendered DOM.
    pub async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(element) => Ok(Some(element.text().await.map_err(anyhow::Error::from)?)),
            Err(err) if err.is_no_such_element() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Attribute value of the first element matching `selector`, or `None`
    /// when the element or the attribute is absent.
    pub async fn attr_of(&self, selector: &str, attribute: &str) -> Result<Option<String>> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(element) => element.attr(attribute).await.map_err(anyhow::Error::from),
            Err(err) if err.is_no_such_element() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Wait up to `within` for an element matching `selector` to appear.
    ///
    /// Best-effort: returns `false` on timeout instead of failing, since
    /// some pages never render the awaited element and are still readable.
    pub async fn wait_for(&self, selector: &str, within: Duration) -> Result<bool> {
        match self
            .client
            .wait()
            .at_most(within)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(true),
            Err(CmdError::WaitTimeout) => Ok(false),
            Err(err) if err.is_no_such_element() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Capture a PNG screenshot of the current viewport.
    pub async fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await.map_err(anyhow::Error::from)
    }
}
