use serde::{Deserialize, Serialize};
use validator::Validate;

/// Largest page a list request may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, never reused
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year; any integer is accepted
    pub year: i64,
    pub genre: Option<String>,
}

/// Request model for creating a new book. Any `id` in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, max = 50))]
    pub title: String,
    #[validate(length(min = 1, max = 50))]
    pub author: String,
    pub year: i64,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub genre: Option<String>,
}

/// Offset/limit pagination for the list endpoint.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ListParams {
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "ListParams::default_limit")]
    #[validate(range(max = 100))]
    pub limit: u32,
}

impl ListParams {
    fn default_limit() -> u32 {
        MAX_PAGE_SIZE
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::default_limit(),
        }
    }
}
