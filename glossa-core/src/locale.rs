//! Locale value consumed by analyzers and message compilers
//!
//! Accepts both ICU style names (`en_GB`, `de_DE@collation=phonebook`) and
//! BCP-47 tags (`en-GB`). Language, script and region are validated through
//! `icu_locale_core`; variants and keywords are kept as given. Languages of
//! four to eight letters are well formed but have no ICU4X identifier, so they
//! keep their name and load root data.

use crate::error::LocaleError;
use icu_locale_core::LanguageIdentifier;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Locale identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    id: LanguageIdentifier,
    /// Language subtag ICU4X cannot represent; `id` then carries `und`
    extended_language: Option<String>,
    variant: String,
    keywords: BTreeMap<String, String>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::root()
    }
}

impl Locale {
    /// The root locale (`und`)
    pub fn root() -> Self {
        Self {
            id: LanguageIdentifier::UNKNOWN,
            extended_language: None,
            variant: String::new(),
            keywords: BTreeMap::new(),
        }
    }

    /// Parse a locale tag
    pub fn from_tag(tag: &str) -> Result<Self, LocaleError> {
        let tag = tag.trim();
        let (base, keywords) = match tag.split_once('@') {
            Some((base, suffix)) => (base, parse_keywords(suffix)?),
            None => (tag, BTreeMap::new()),
        };

        let mut parts = base.split(['_', '-']).filter(|part| !part.is_empty());
        let Some(language) = parts.next() else {
            return Ok(Self {
                keywords,
                ..Self::root()
            });
        };

        let mut script = None;
        let mut region = None;
        let mut variants = Vec::new();
        for part in parts {
            if script.is_none() && region.is_none() && variants.is_empty() && is_script(part) {
                script = Some(part);
            } else if region.is_none() && variants.is_empty() && is_region(part) {
                region = Some(part);
            } else {
                variants.push(part.to_ascii_uppercase());
            }
        }

        let invalid = || LocaleError::InvalidTag {
            tag: tag.to_string(),
        };
        let (id, extended_language) = match build_identifier(language, script, region) {
            Some(id) => (id, None),
            None if is_extended_language(language) => {
                let id = build_identifier("und", script, region).ok_or_else(invalid)?;
                log::warn!("no locale data for language '{language}' in '{tag}', using root");
                (id, Some(language.to_ascii_lowercase()))
            }
            None => return Err(invalid()),
        };

        Ok(Self {
            id,
            extended_language,
            variant: variants.join("_"),
            keywords,
        })
    }

    /// Build a locale from its components; empty components are skipped
    pub fn from_parts<I, K, V>(
        language: &str,
        region: &str,
        variant: &str,
        keywords: I,
    ) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut name = language.to_string();
        if !region.is_empty() {
            name.push('_');
            name.push_str(region);
        }
        if !variant.is_empty() {
            // Keep the region slot so a variant is never read as a region
            if region.is_empty() {
                name.push('_');
            }
            name.push('_');
            name.push_str(variant);
        }

        let mut locale = Self::from_tag(&name)?;
        for (key, value) in keywords {
            let key: String = key.into();
            let value: String = value.into();
            if key.trim().is_empty() || value.trim().is_empty() {
                return Err(LocaleError::InvalidKeyword {
                    keyword: format!("{key}={value}"),
                });
            }
            locale
                .keywords
                .insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }
        Ok(locale)
    }

    /// Language subtag, lowercase
    pub fn language(&self) -> &str {
        self.extended_language
            .as_deref()
            .unwrap_or_else(|| self.id.language.as_str())
    }

    /// Script subtag, if any
    pub fn script(&self) -> Option<&str> {
        self.id.script.as_ref().map(|script| script.as_str())
    }

    /// Region subtag, uppercase; empty when absent
    pub fn region(&self) -> &str {
        self.id.region.as_ref().map_or("", |region| region.as_str())
    }

    /// Variant, uppercase and `_`-joined; empty when absent
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Keywords from the `@key=value` suffix
    pub fn keywords(&self) -> &BTreeMap<String, String> {
        &self.keywords
    }

    /// Whether this is the root locale
    pub fn is_root(&self) -> bool {
        self.id == LanguageIdentifier::UNKNOWN
            && self.extended_language.is_none()
            && self.variant.is_empty()
    }

    /// Language, script and region as an ICU4X identifier
    ///
    /// The language is `und` when [`Locale::language`] has no ICU4X form.
    pub fn language_identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// Canonical ICU style name, e.g. `en_GB_POSIX@collation=phonebook`
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Convert to an ICU4X locale, carrying keywords as `-u-` extensions
    pub fn to_icu(&self) -> icu_locale_core::Locale {
        let mut extensions = String::new();
        for (key, value) in &self.keywords {
            match unicode_key(key) {
                Some(ukey) => {
                    extensions.push('-');
                    extensions.push_str(ukey);
                    extensions.push('-');
                    extensions.push_str(&value.to_ascii_lowercase());
                }
                None => log::debug!("dropping locale keyword '{key}' with no unicode extension key"),
            }
        }

        if extensions.is_empty() {
            return icu_locale_core::Locale::from(self.id.clone());
        }

        let tag = format!("{}-u{}", self.id, extensions);
        match icu_locale_core::Locale::try_from_str(&tag) {
            Ok(locale) => locale,
            Err(err) => {
                log::warn!("ignoring locale keywords of '{self}': {err}");
                icu_locale_core::Locale::from(self.id.clone())
            }
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language())?;
        if let Some(script) = self.script() {
            write!(f, "_{script}")?;
        }
        if !self.region().is_empty() {
            write!(f, "_{}", self.region())?;
        }
        if !self.variant.is_empty() {
            if self.region().is_empty() {
                f.write_str("_")?;
            }
            write!(f, "_{}", self.variant)?;
        }
        for (i, (key, value)) in self.keywords.iter().enumerate() {
            f.write_str(if i == 0 { "@" } else { ";" })?;
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(id: LanguageIdentifier) -> Self {
        Self {
            id,
            extended_language: None,
            variant: String::new(),
            keywords: BTreeMap::new(),
        }
    }
}

fn parse_keywords(suffix: &str) -> Result<BTreeMap<String, String>, LocaleError> {
    let mut keywords = BTreeMap::new();
    for entry in suffix.split(';').filter(|entry| !entry.trim().is_empty()) {
        let (key, value) = entry
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .ok_or_else(|| LocaleError::InvalidKeyword {
                keyword: entry.to_string(),
            })?;
        keywords.insert(key.to_ascii_lowercase(), value.to_string());
    }
    Ok(keywords)
}

fn build_identifier(
    language: &str,
    script: Option<&str>,
    region: Option<&str>,
) -> Option<LanguageIdentifier> {
    let mut tag = language.to_string();
    for subtag in [script, region].into_iter().flatten() {
        tag.push('-');
        tag.push_str(subtag);
    }
    LanguageIdentifier::try_from_str(&tag).ok()
}

fn is_extended_language(part: &str) -> bool {
    (4..=8).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_script(part: &str) -> bool {
    part.len() == 4 && part.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region(part: &str) -> bool {
    (part.len() == 2 && part.bytes().all(|b| b.is_ascii_alphabetic()))
        || (part.len() == 3 && part.bytes().all(|b| b.is_ascii_digit()))
}

fn unicode_key(keyword: &str) -> Option<&str> {
    match keyword {
        "numbers" => Some("nu"),
        "collation" => Some("co"),
        "calendar" => Some("ca"),
        "currency" => Some("cu"),
        "hours" => Some("hc"),
        key if key.len() == 2 => Some(key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_only() {
        let locale = Locale::from_tag("en").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), "");
        assert_eq!(locale.variant(), "");
        assert!(locale.keywords().is_empty());
        assert_eq!(locale.name(), "en");
    }

    #[test]
    fn test_icu_and_bcp47_separators() {
        let icu = Locale::from_tag("en_GB").unwrap();
        let bcp = Locale::from_tag("en-gb").unwrap();
        assert_eq!(icu, bcp);
        assert_eq!(icu.region(), "GB");
        assert_eq!(bcp.to_string(), "en_GB");
    }

    #[test]
    fn test_keywords_suffix() {
        let locale = Locale::from_tag("de_DE@collation=phonebook").unwrap();
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.region(), "DE");
        assert_eq!(
            locale.keywords().get("collation").map(String::as_str),
            Some("phonebook")
        );
        assert_eq!(locale.to_string(), "de_DE@collation=phonebook");
    }

    #[test]
    fn test_from_parts_with_variant() {
        let locale = Locale::from_parts("es", "ES", "Traditional_POSIX", Vec::<(String, String)>::new())
            .unwrap();
        assert_eq!(locale.variant(), "TRADITIONAL_POSIX");
        assert_eq!(locale.to_string(), "es_ES_TRADITIONAL_POSIX");
    }

    #[test]
    fn test_from_parts_variant_without_region() {
        let locale = Locale::from_parts("en", "", "POSIX", Vec::<(String, String)>::new()).unwrap();
        assert_eq!(locale.region(), "");
        assert_eq!(locale.variant(), "POSIX");
        assert_eq!(locale.to_string(), "en__POSIX");
        assert_eq!(Locale::from_tag("en__POSIX").unwrap(), locale);
    }

    #[test]
    fn test_multiple_keywords_sorted() {
        let locale = Locale::from_parts(
            "en",
            "GB",
            "",
            [("currency", "USD"), ("collation", "phonebook")],
        )
        .unwrap();
        assert_eq!(locale.to_string(), "en_GB@collation=phonebook;currency=USD");
    }

    #[test]
    fn test_invalid_tag() {
        let result = Locale::from_tag(&"x".repeat(100));
        assert!(matches!(result, Err(LocaleError::InvalidTag { .. })));
    }

    #[test]
    fn test_long_language_falls_back_to_root_data() {
        let locale = Locale::from_tag("invalid_LOCALE").unwrap();
        assert_eq!(locale.language(), "invalid");
        assert_eq!(locale.variant(), "LOCALE");
        assert_eq!(locale.to_string(), "invalid__LOCALE");
        assert_eq!(locale.language_identifier().language.as_str(), "und");
        assert!(!locale.is_root());
        assert_eq!(locale.to_icu().to_string(), "und");

        let locale = Locale::from_tag("klingon-US").unwrap();
        assert_eq!(locale.name(), "klingon_US");
        assert_eq!(locale.to_icu().to_string(), "und-US");

        assert!(Locale::from_tag("abcdefghi").is_err());
        assert!(Locale::from_tag("abc1de").is_err());
    }

    #[test]
    fn test_invalid_keyword() {
        let result = Locale::from_tag("en@collation");
        assert!(matches!(result, Err(LocaleError::InvalidKeyword { .. })));
    }

    #[test]
    fn test_empty_tag_is_root() {
        let locale = Locale::from_tag("").unwrap();
        assert!(locale.is_root());
        assert_eq!(locale.language(), "und");
    }

    #[test]
    fn test_to_icu_maps_numbering_system() {
        let locale = Locale::from_tag("en_GB@numbers=arab").unwrap();
        assert_eq!(locale.to_icu().to_string(), "en-GB-u-nu-arab");
    }

    #[test]
    fn test_to_icu_drops_unknown_keywords() {
        let locale = Locale::from_tag("en@something=else").unwrap();
        assert_eq!(locale.to_icu().to_string(), "en");
    }
}
