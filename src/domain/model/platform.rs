use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A brand whose keyword space is seeded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    SosExpat,
    Ulixai,
    UlysseAi,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::SosExpat, Platform::Ulixai, Platform::UlysseAi];

    /// Natural key of the `platforms` table; also the workbook file stem.
    pub fn slug(self) -> &'static str {
        match self {
            Platform::SosExpat => "sos-expat",
            Platform::Ulixai => "ulixai",
            Platform::UlysseAi => "ulysse-ai",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::SosExpat => "SOS-Expat",
            Platform::Ulixai => "Ulixai",
            Platform::UlysseAi => "Ulysse.AI",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.slug() == wanted || p.display_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown platform '{}' (expected one of: sos-expat, ulixai, ulysse-ai)",
                    s.trim()
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slug_or_display_name() {
        assert_eq!("ulysse-ai".parse::<Platform>(), Ok(Platform::UlysseAi));
        assert_eq!("SOS-Expat".parse::<Platform>(), Ok(Platform::SosExpat));
        assert!("expat.com".parse::<Platform>().is_err());
    }
}
