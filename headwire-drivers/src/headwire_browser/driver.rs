use crate::headwire_browser::page::BrowserPage;
use anyhow::Result;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use webdriver::capabilities::Capabilities;

const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Thin wrapper around a `fantoccini` WebDriver client.
///
/// Each driver owns one isolated browser session; callers are expected to
/// [`close`](BrowserDriver::close) it on every exit path, since an orphaned
/// session keeps a browser process alive.
pub struct BrowserDriver {
    pub client: Client,
}

impl BrowserDriver {
    /// Create a new driver connected to a running WebDriver service.
    ///
    /// Connects to `HEADWIRE_WEBDRIVER_URL` if set, otherwise
    /// `http://localhost:9515` (Chromedriver).
    pub async fn new(headless: bool) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = browser_arguments();
        if headless {
            args.push("--headless=new".to_string());
            args.push("--disable-gpu".to_string());
        }
        chrome_opts.insert("args".to_string(), json!(args));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let endpoint = std::env::var("HEADWIRE_WEBDRIVER_URL")
            .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string());

        tracing::debug!(
            target: "browser.driver",
            %endpoint,
            headless,
            "browser.session.connect"
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&endpoint)
            .await?;

        Ok(Self { client })
    }

    /// Navigate to `url` and return a [`BrowserPage`] for the loaded document.
    pub async fn goto(&mut self, url: &str) -> Result<BrowserPage> {
        let mut page = BrowserPage::new(self.client.clone());
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// Chrome command-line arguments for an extraction session.
fn browser_arguments() -> Vec<String> {
    vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
        "--window-size=1366,900".to_string(),
    ]
}
