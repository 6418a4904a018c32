use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// One news-article record from an uploaded batch.
///
/// Records are open maps: besides the `url` field (and an optional
/// `short_url` preferred as the fetch target), they carry arbitrary
/// metadata — category, source, date, sentiment — which passes through the
/// pipeline untouched. Enrichment inserts a `title` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsRecord(pub Map<String, Value>);

impl NewsRecord {
    /// The address the pipeline should fetch for this record.
    ///
    /// Prefers `short_url` when present and parseable, then `url`. Returns
    /// `None` when neither field holds a usable address; such records are
    /// marked with the sentinel title without invoking any extractor.
    pub fn target_url(&self) -> Option<Url> {
        ["short_url", "url"]
            .into_iter()
            .filter_map(|key| self.field_str(key))
            .find_map(|raw| Url::parse(raw).ok())
    }

    /// The enriched title, if one has been set.
    pub fn title(&self) -> Option<&str> {
        self.field_str("title")
    }

    /// Insert or overwrite the `title` field.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.0
            .insert("title".to_string(), Value::String(title.into()));
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
