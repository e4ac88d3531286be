//! Decode history types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Claims, TokenStatus};

/// One recorded decode attempt. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub token: String,
    pub status: TokenStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Claims>,
    /// Epoch milliseconds, assigned by the store on append.
    #[serde(default)]
    pub decoded_at: u64,
}

impl HistoryEntry {
    pub fn valid(token: impl Into<String>, payload: Claims) -> Self {
        Self {
            token: token.into(),
            status: TokenStatus::Valid,
            payload: Some(payload),
            decoded_at: 0,
        }
    }

    pub fn invalid(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            status: TokenStatus::Invalid,
            payload: None,
            decoded_at: 0,
        }
    }

    /// Case-insensitive substring match over the token and serialized payload.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        if self.token.to_lowercase().contains(needle) {
            return true;
        }
        self.payload
            .as_ref()
            .and_then(|p| serde_json::to_string(p).ok())
            .is_some_and(|json| json.to_lowercase().contains(needle))
    }
}

/// Status filter for history queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    Valid,
    Invalid,
}

impl HistoryFilter {
    pub fn accepts(&self, status: TokenStatus) -> bool {
        match self {
            Self::All => true,
            Self::Valid => status == TokenStatus::Valid,
            Self::Invalid => status == TokenStatus::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

/// Ordering of history query results by `decoded_at`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

/// Error returned when parsing a filter or sort option fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown option: {0}")]
pub struct UnknownOption(pub String);

impl FromStr for HistoryFilter {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "valid" => Ok(Self::Valid),
            "invalid" => Ok(Self::Invalid),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Parameters of a history query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub filter: HistoryFilter,
    pub search: String,
    pub order: SortOrder,
}
