use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the root-node attribute carrying the text direction.
pub const DIR_ATTRIBUTE: &str = "dir";

/// Name of the root-node attribute carrying the language code.
pub const LANG_ATTRIBUTE: &str = "lang";

/// Errors raised at the locale boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The code is not one of `en`, `fr`, `ar`
    #[error("unsupported locale code: {0:?} (expected one of en, fr, ar)")]
    Unsupported(String),
}

/// Supported interface languages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Ar,
}

impl Locale {
    /// All supported locales in menu order
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Fr, Locale::Ar];

    /// Language code written to the `lang` attribute
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Ar => "ar",
        }
    }

    /// Display name in the language itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fr => "Français",
            Locale::Ar => "العربية",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Locale::Ar => TextDirection::Rtl,
            Locale::En | Locale::Fr => TextDirection::Ltr,
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction() == TextDirection::Rtl
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            "ar" => Ok(Locale::Ar),
            _ => Err(LocaleError::Unsupported(s.to_string())),
        }
    }
}

/// Layout direction of the document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value written to the `dir` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current interface language.
///
/// The right-to-left flag is never stored: it is always computed from the
/// active locale, so the two cannot drift apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocaleState {
    current_locale: Locale,
}

impl LocaleState {
    pub fn new(locale: Locale) -> Self {
        Self {
            current_locale: locale,
        }
    }

    pub fn current_locale(&self) -> Locale {
        self.current_locale
    }

    pub fn is_rtl(&self) -> bool {
        self.current_locale.is_rtl()
    }

    pub fn direction(&self) -> TextDirection {
        self.current_locale.direction()
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.current_locale = locale;
    }
}
