//! Supported content languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine languages the platforms publish in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
    Es,
    De,
    Pt,
    Ru,
    Zh,
    Ar,
    Hi,
}

impl Language {
    /// Every supported language, in generation order.
    pub const ALL: [Language; 9] = [
        Language::Fr,
        Language::En,
        Language::Es,
        Language::De,
        Language::Pt,
        Language::Ru,
        Language::Zh,
        Language::Ar,
        Language::Hi,
    ];

    /// Languages tried, in order, when a translation is missing.
    pub const DEFAULT_CHAIN: [Language; 2] = [Language::En, Language::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Ar => "ar",
            Language::Hi => "hi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Language::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unsupported language code '{}'", s.trim()))
    }
}
