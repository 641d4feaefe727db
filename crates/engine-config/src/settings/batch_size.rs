use crate::settings::error::SettingsError;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Number of rows committed per transaction. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchSize(usize);

impl BatchSize {
    pub const DEFAULT: BatchSize = BatchSize(1000);

    /// Above this a single transaction holds a lot of uncommitted work.
    pub const LARGE: usize = 100_000;

    pub fn new(size: i64) -> Result<Self, SettingsError> {
        if size <= 0 {
            return Err(SettingsError::InvalidBatchSize(size.to_string()));
        }
        usize::try_from(size)
            .map(BatchSize)
            .map_err(|_| SettingsError::InvalidBatchSize(size.to_string()))
    }

    pub const fn get(&self) -> usize {
        self.0
    }

    pub fn is_large(&self) -> bool {
        self.0 > Self::LARGE
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchSize {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s
            .trim()
            .parse::<i64>()
            .map_err(|_| SettingsError::InvalidBatchSize(s.to_string()))?;
        BatchSize::new(size)
    }
}
