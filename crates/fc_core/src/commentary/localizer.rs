//! Commentary localization
//!
//! Fluent (FTL) bundles per locale with an `en-US` fallback.

use std::collections::HashMap;
use std::path::Path;

use fluent::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use once_cell::sync::Lazy;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use super::locales::{self, DEFAULT_LOCALE};
use crate::error::CoreError;

static FALLBACK_LANGID: Lazy<LanguageIdentifier> =
    Lazy::new(|| DEFAULT_LOCALE.parse().unwrap_or_default());

pub struct CommentaryLocalizer {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl Default for CommentaryLocalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentaryLocalizer {
    /// Empty localizer; every lookup misses until a locale is loaded.
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            current_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Localizer with the shipped `en-US` and `id-ID` templates.
    pub fn with_builtin() -> Self {
        let mut localizer = Self::new();
        for (locale, source) in locales::builtin() {
            if let Err(err) = localizer.load_locale(locale, source) {
                warn!(locale, error = %err, "built-in commentary locale failed to load");
            }
        }
        localizer
    }

    /// Loads `<locale>.ftl` files found in `dir`, replacing built-in bundles.
    pub fn load_from_dir(&mut self, dir: &Path, locales: &[&str]) -> Result<usize, CoreError> {
        let mut loaded = 0;
        for locale in locales {
            let path = dir.join(format!("{locale}.ftl"));
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                self.load_locale(locale, &content)?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    pub fn load_locale(&mut self, locale: &str, ftl_content: &str) -> Result<(), CoreError> {
        let resource = FluentResource::try_new(ftl_content.to_string())
            .map_err(|(_, errors)| CoreError::ParseError(format!("{locale}: {} FTL errors", errors.len())))?;

        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|_| CoreError::ParseError(format!("Invalid locale: {locale}")))?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        // plain text output, no bidi isolation marks around placeables
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|_| CoreError::ParseError(format!("{locale}: duplicate message ids")))?;

        self.bundles.insert(locale.to_string(), bundle);
        Ok(())
    }

    pub fn set_locale(&mut self, locale: &str) -> Result<(), CoreError> {
        if !self.bundles.contains_key(locale) {
            return Err(CoreError::NotFound(format!("Locale {locale} not loaded")));
        }
        self.current_locale = locale.to_string();
        Ok(())
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    /// Best loaded match for the requested tags, e.g. `["id"]` → `"id-ID"`.
    pub fn negotiate_locale(&self, requested: &[&str]) -> String {
        let available: Vec<LanguageIdentifier> =
            self.bundles.keys().filter_map(|k| k.parse().ok()).collect();
        let requested: Vec<LanguageIdentifier> =
            requested.iter().filter_map(|l| l.parse().ok()).collect();

        let negotiated = negotiate_languages(
            &requested,
            &available,
            Some(&*FALLBACK_LANGID),
            NegotiationStrategy::Filtering,
        );

        negotiated.first().map(|l| l.to_string()).unwrap_or_else(|| self.fallback_locale.clone())
    }

    /// Number of consecutive `{prefix}-{n}` messages, starting at 1.
    pub fn variant_count(&self, prefix: &str) -> usize {
        let Some(bundle) = self.active_bundle(prefix, 1) else {
            return 0;
        };
        (1..).take_while(|n| bundle.has_message(&format!("{prefix}-{n}"))).count()
    }

    /// Formats `key` in the current locale, then the fallback locale.
    /// `None` when the message is missing or formatting reported errors.
    pub fn format(&self, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let mut candidates = vec![self.current_locale.as_str()];
        if self.current_locale != self.fallback_locale {
            candidates.push(self.fallback_locale.as_str());
        }
        candidates.into_iter().find_map(|locale| {
            let bundle = self.bundles.get(locale)?;
            let pattern = bundle.get_message(key)?.value()?;
            let mut errors = vec![];
            let text = bundle.format_pattern(pattern, args, &mut errors);
            errors.is_empty().then(|| text.into_owned())
        })
    }

    /// Bundle that owns `{prefix}-{first}`: current locale first, then fallback.
    fn active_bundle(&self, prefix: &str, first: usize) -> Option<&FluentBundle<FluentResource>> {
        let key = format!("{prefix}-{first}");
        [self.current_locale.as_str(), self.fallback_locale.as_str()]
            .into_iter()
            .filter_map(|locale| self.bundles.get(locale))
            .find(|bundle| bundle.has_message(&key))
    }
}

/// Builds Fluent arguments from string pairs.
pub fn args<'a>(pairs: &[(&'a str, String)]) -> FluentArgs<'a> {
    let mut out = FluentArgs::new();
    for (key, value) in pairs {
        out.set(*key, FluentValue::from(value.clone()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads_both_locales() {
        let mut localizer = CommentaryLocalizer::with_builtin();
        assert!(localizer.set_locale("id-ID").is_ok());
        assert!(localizer.set_locale("fr-FR").is_err());
    }

    #[test]
    fn test_format_with_args() {
        let localizer = CommentaryLocalizer::with_builtin();
        let a = args(&[("player", "Evan Dimas".to_string()), ("team", "the visitors".to_string())]);
        let text = localizer.format("goal-1", Some(&a)).unwrap();
        assert_eq!(text, "GOAL! Evan Dimas finds the net for the visitors!");
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        let localizer = CommentaryLocalizer::with_builtin();
        assert!(localizer.format("goal-1", None).is_none());
        assert!(localizer.format("no-such-key", None).is_none());
    }

    #[test]
    fn test_fallback_to_english() {
        let mut localizer = CommentaryLocalizer::with_builtin();
        localizer.load_locale("ms-MY", "fallback = Permainan diteruskan.\n").unwrap();
        localizer.set_locale("ms-MY").unwrap();
        assert_eq!(localizer.format("fallback", None).unwrap(), "Permainan diteruskan.");
        assert_eq!(localizer.format("side-home", None).unwrap(), "the home side");
    }

    #[test]
    fn test_locale_negotiation() {
        let localizer = CommentaryLocalizer::with_builtin();
        assert_eq!(localizer.negotiate_locale(&["id"]), "id-ID");
        assert_eq!(localizer.negotiate_locale(&["ja-JP"]), "en-US");
    }

    #[test]
    fn test_variant_count() {
        let mut localizer = CommentaryLocalizer::with_builtin();
        assert_eq!(localizer.variant_count("goal"), 3);
        assert_eq!(localizer.variant_count("offside"), 0);
        assert_eq!(localizer.variant_count("offside-anon"), 2);
        localizer.set_locale("id-ID").unwrap();
        assert_eq!(localizer.variant_count("goal-anon"), 1);
    }

    #[test]
    fn test_rejects_bad_ftl() {
        let mut localizer = CommentaryLocalizer::new();
        assert!(localizer.load_locale("en-US", "= broken").is_err());
        assert!(localizer.load_locale("not a locale!", "a = b").is_err());
    }
}
