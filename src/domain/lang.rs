//! Language-tagged strings and language fallback resolution

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display text that is either a single scalar or keyed by 2-letter language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LangString {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl LangString {
    pub fn plain(value: impl Into<String>) -> Self {
        Self::Plain(value.into())
    }

    /// Build a localized string from `(language, text)` pairs.
    pub fn localized<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Localized(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        )
    }

    /// Text for exactly `language`. Plain strings have no language.
    pub fn get(&self, language: &str) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Localized(map) => map.get(language).map(String::as_str),
        }
    }

    /// Resolve against a list of fallback languages, in order.
    ///
    /// Plain strings resolve to themselves. A localized string without any of
    /// the requested languages resolves to `None`; use [`Self::resolve_or_raw`]
    /// when some text is always wanted.
    pub fn resolve<S: AsRef<str>>(&self, fallback_languages: &[S]) -> Option<&str> {
        match self {
            Self::Plain(value) => Some(value.as_str()),
            Self::Localized(map) => fallback_languages
                .iter()
                .find_map(|lang| map.get(lang.as_ref()))
                .map(String::as_str),
        }
    }

    /// Like [`Self::resolve`], falling back to the raw rendering.
    pub fn resolve_or_raw<S: AsRef<str>>(&self, fallback_languages: &[S]) -> String {
        self.resolve(fallback_languages)
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// True if any language variant (or the scalar) equals `value`.
    pub fn contains_value(&self, value: &str) -> bool {
        self.values().any(|v| v == value)
    }

    pub fn values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Plain(value) => Box::new(std::iter::once(value.as_str())),
            Self::Localized(map) => Box::new(map.values().map(String::as_str)),
        }
    }
}

impl fmt::Display for LangString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => write!(f, "{value}"),
            Self::Localized(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for LangString {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for LangString {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

/// Resolve a JSON value that might be a language-tagged object.
///
/// Objects holding one of the fallback languages as a string yield that string;
/// anything else is returned unchanged.
pub fn resolve_lang_value<S: AsRef<str>>(value: &Value, fallback_languages: &[S]) -> Value {
    if let Value::Object(map) = value {
        for lang in fallback_languages {
            if let Some(text @ Value::String(_)) = map.get(lang.as_ref()) {
                return text.clone();
            }
        }
    }
    value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_localized_string_when_resolving_then_first_available_language_wins() {
        let name = LangString::localized([("fr", "Sport"), ("de", "Bewegung")]);
        assert_eq!(name.resolve(&["it", "de", "fr"]), Some("Bewegung"));
        assert_eq!(name.resolve(&["en"]), None);
        assert_eq!(name.resolve_or_raw(&["en"]), "{de: Bewegung, fr: Sport}");
    }

    #[test]
    fn given_plain_string_when_resolving_then_returns_scalar() {
        let name = LangString::plain("n/a");
        assert_eq!(name.resolve::<&str>(&[]), Some("n/a"));
        assert_eq!(name.get("de"), None);
    }

    #[test]
    fn given_json_lang_object_when_resolving_value_then_returns_string_or_raw() {
        let value = json!({"de": "Mathematik", "fr": "Mathématiques"});
        assert_eq!(resolve_lang_value(&value, &["fr"]), json!("Mathématiques"));
        assert_eq!(resolve_lang_value(&value, &["rm"]), value);
        assert_eq!(resolve_lang_value(&json!(3), &["de"]), json!(3));
    }

    #[test]
    fn given_untagged_json_when_deserializing_then_picks_variant() {
        let plain: LangString = serde_json::from_value(json!("educa")).unwrap();
        let localized: LangString = serde_json::from_value(json!({"de": "educa"})).unwrap();
        assert_eq!(plain, LangString::plain("educa"));
        assert!(localized.contains_value("educa"));
    }
}
