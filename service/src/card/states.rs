//! State and territory names by code, loaded once from `states.json`.
//!
//! The file maps each code to its names per language:
//!
//! ```json
//! { "CA": { "en": "California", "zh": "加州" } }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::congress::Lang;

use super::error::DerivationError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateName {
    pub en: String,
    pub zh: String,
}

/// Read-only state-name lookup shared by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTable {
    names: HashMap<String, StateName>,
}

impl StateTable {
    /// Parse a state table from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is not a code → names map.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            names: serde_json::from_str(json)?,
        })
    }

    /// Localized name of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`DerivationError::UnknownState`] for codes not in the table.
    pub fn name(&self, code: &str, lang: Lang) -> Result<&str, DerivationError> {
        let names = self
            .names
            .get(code)
            .ok_or_else(|| DerivationError::UnknownState(code.to_string()))?;
        Ok(match lang {
            Lang::En => &names.en,
            Lang::Zh => &names.zh,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, StateName)> for StateTable {
    fn from_iter<I: IntoIterator<Item = (String, StateName)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_localizes() {
        let table = StateTable::from_json(
            r#"{"CA": {"en": "California", "zh": "加州"}, "PR": {"en": "Puerto Rico", "zh": "波多黎各"}}"#,
        )
        .expect("parse");
        assert_eq!(table.len(), 2);
        assert_eq!(table.name("CA", Lang::En).expect("CA"), "California");
        assert_eq!(table.name("PR", Lang::Zh).expect("PR"), "波多黎各");
    }

    #[test]
    fn unknown_code_is_derivation_error() {
        let table = StateTable::default();
        assert_eq!(
            table.name("ZZ", Lang::En),
            Err(DerivationError::UnknownState("ZZ".to_string()))
        );
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(StateTable::from_json(r#"{"CA": "California"}"#).is_err());
    }

    #[test]
    fn bundled_table_covers_every_code() {
        let json = include_str!("../../assets/states.json");
        let table = StateTable::from_json(json).expect("bundled table parses");
        for code in [
            "AL", "AK", "AZ", "CA", "NY", "TX", "WY", "DC", "PR", "GU", "AS", "VI", "MP", "PI",
            "DK",
        ] {
            assert!(table.name(code, Lang::En).is_ok(), "{code} missing");
            assert!(table.name(code, Lang::Zh).is_ok(), "{code} missing");
        }
    }
}
