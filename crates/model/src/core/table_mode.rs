use serde::Serialize;
use std::{fmt, str::FromStr};

/// How the destination table is prepared before loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    /// Create the table only if it is absent; existing rows are kept.
    #[default]
    Append,
    /// Drop any existing table and create it empty.
    Replace,
}

impl TableMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableMode::Append => "append",
            TableMode::Replace => "replace",
        }
    }
}

impl fmt::Display for TableMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(TableMode::Append),
            "replace" => Ok(TableMode::Replace),
            other => Err(format!(
                "unknown table mode '{other}' (expected 'append' or 'replace')"
            )),
        }
    }
}
