//! `{PLACEHOLDER}` substitution for SVG card templates.
//!
//! Placeholders are upper-snake-case names in braces (`{MEMBER_NAME}`).
//! Everything else in the template, including lowercase braces inside
//! `<style>` blocks, is copied through byte for byte.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Z][A-Z0-9_]*)\}").expect("placeholder pattern compiles")
});

/// An immutable SVG template, loaded once and shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: Arc<str>,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Arc::from(source.into()),
        }
    }

    /// The unpopulated template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Substitute every placeholder. Placeholders without a value render empty.
    #[must_use]
    pub fn render(&self, values: &TemplateValues) -> String {
        PLACEHOLDER
            .replace_all(&self.source, |caps: &Captures<'_>| {
                values.get(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned()
    }

    /// Names of all placeholders in the template, in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&self.source) {
            let name = &caps[1];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// Values for [`Template::render`].
///
/// [`text`](Self::text) values are XML-escaped; [`markup`](Self::markup)
/// values are inserted verbatim and must already be well-formed.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    values: BTreeMap<String, String>,
}

impl TemplateValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, key: &str, value: impl AsRef<str>) -> Self {
        let escaped = htmlize::escape_attribute(value.as_ref()).into_owned();
        self.values.insert(key.to_string(), escaped);
        self
    }

    #[must_use]
    pub fn markup(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
