//! Driver layer for browser automation.
//!
//! This crate exposes the headless-browser driver and page helpers used by
//! the rendered-extraction path to read pages that only produce a headline
//! after script execution.
//!
//! - [`headwire_browser::driver::BrowserDriver`]: WebDriver client wrapper
//! - [`headwire_browser::page::BrowserPage`]: DOM queries, waits, capture
pub mod headwire_browser;
