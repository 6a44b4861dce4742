use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which separation backend to run: the spectrogram-masking model (spleeter)
/// or the waveform-domain model (demucs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparationMethod {
    Spleeter,
    Demucs,
}

impl SeparationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeparationMethod::Spleeter => "spleeter",
            SeparationMethod::Demucs => "demucs",
        }
    }
}

impl FromStr for SeparationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spleeter" => Ok(SeparationMethod::Spleeter),
            "demucs" => Ok(SeparationMethod::Demucs),
            _ => Err(format!("Invalid separation method: {}", s)),
        }
    }
}

impl fmt::Display for SeparationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_known_names_when_parsed_then_methods_round_trip() {
        for method in [SeparationMethod::Spleeter, SeparationMethod::Demucs] {
            assert_eq!(method.as_str().parse::<SeparationMethod>(), Ok(method));
        }
    }

    #[test]
    fn given_unknown_name_when_parsed_then_returns_error() {
        assert!("umx".parse::<SeparationMethod>().is_err());
    }
}
