//! Grid column preference.

use serde::{Deserialize, Serialize};

/// Number of product grid columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ViewColumns {
    Two,
    Three,
    #[default]
    Four,
}

/// A column count outside `{2, 3, 4}`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("grid view must have 2, 3 or 4 columns (got {0})")]
pub struct ViewColumnsError(pub u8);

impl ViewColumns {
    /// Parse from URL parameter value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<u8>().ok().and_then(|n| Self::try_from(n).ok())
    }

    /// Column count.
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
        }
    }
}

impl TryFrom<u8> for ViewColumns {
    type Error = ViewColumnsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(ViewColumnsError(other)),
        }
    }
}

impl From<ViewColumns> for u8 {
    fn from(view: ViewColumns) -> Self {
        view.count()
    }
}
