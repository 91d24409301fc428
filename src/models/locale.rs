use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display language for every message the analyzer produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Th,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Th => "th",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "th" | "thai" => Ok(Locale::Th),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" TH ".parse::<Locale>(), Ok(Locale::Th));
        assert_eq!("thai".parse::<Locale>(), Ok(Locale::Th));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Locale::Th).unwrap(), "\"th\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
