use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PYTHON_VERSION: &str = "3.11";

/// Strictness preset for the generated `pyrightconfig.json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Strict,
    Standard,
    Basic,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Strict, Level::Standard, Level::Basic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Strict => "strict",
            Level::Standard => "standard",
            Level::Basic => "basic",
        }
    }

    pub fn config(&self) -> PyrightConfig {
        let base = PyrightConfig {
            type_checking_mode: *self,
            python_version: PYTHON_VERSION.to_string(),
            report_missing_type_stubs: None,
            report_missing_imports: None,
        };
        match self {
            Level::Strict => PyrightConfig {
                report_missing_type_stubs: Some(false),
                report_missing_imports: Some(false),
                ..base
            },
            Level::Standard => PyrightConfig {
                report_missing_type_stubs: Some(false),
                ..base
            },
            Level::Basic => base,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown level '{s}': expected strict, standard or basic"))
    }
}

/// The subset of pyright settings the presets write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyrightConfig {
    pub type_checking_mode: Level,
    pub python_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_missing_type_stubs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_missing_imports: Option<bool>,
}

impl PyrightConfig {
    /// Two-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut s = serde_json::to_string_pretty(self)?;
        s.push('\n');
        Ok(s)
    }
}
