//! Stands in for the host's locale configuration (spec §4.8): the crate
//! has no config system of its own, so callers inject a `LocaleProvider`
//! wherever a default language is needed. `HostLocale` mirrors what
//! `setlocale(LC_MESSAGES, "")` would read on a POSIX host.

/// A language/territory pair, e.g. `en`/`US` from the POSIX tag `en_US.UTF-8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefLanguage {
    pub language: String,
    pub territory: Option<String>,
}

/// Supplies a default language when a Text/SmartPoster constructor isn't
/// given one explicitly. Implement this to plug in an actual host
/// configuration system instead of `HostLocale`'s environment-variable
/// reading.
pub trait LocaleProvider {
    /// Raw locale tag, e.g. `"en_US.UTF-8"`.
    fn system_locale(&self) -> Option<String>;

    /// `system_locale()` parsed into language/territory. The default
    /// implementation strips a `.codeset` suffix and an `@modifier`
    /// suffix, then splits on `_`; `"C"`, `"POSIX"`, and an empty value
    /// all mean "no language preference".
    fn system_language(&self) -> Option<NdefLanguage> {
        let raw = self.system_locale()?;
        parse_locale_tag(&raw)
    }
}

fn parse_locale_tag(raw: &str) -> Option<NdefLanguage> {
    let without_modifier = raw.split('@').next().unwrap_or(raw);
    let without_codeset = without_modifier.split('.').next().unwrap_or(without_modifier);
    if without_codeset.is_empty() || without_codeset.eq_ignore_ascii_case("C") || without_codeset.eq_ignore_ascii_case("POSIX") {
        return None;
    }
    match without_codeset.split_once('_') {
        Some((language, territory)) if !language.is_empty() => {
            Some(NdefLanguage { language: language.to_string(), territory: Some(territory.to_string()) })
        }
        _ => Some(NdefLanguage { language: without_codeset.to_string(), territory: None }),
    }
}

/// Reads `LC_ALL` then `LANG`, the same precedence `setlocale` uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostLocale;

impl LocaleProvider for HostLocale {
    fn system_locale(&self) -> Option<String> {
        std::env::var("LC_ALL").ok().filter(|v| !v.is_empty()).or_else(|| std::env::var("LANG").ok().filter(|v| !v.is_empty()))
    }
}
