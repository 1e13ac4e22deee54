//! Two-phase pagination cursor.
//!
//! Offset paging is only reliable below the service's offset ceiling. Once
//! the ceiling is reached the cursor switches, exactly once, to the
//! continuation token returned by the last offset page and never goes back.

use serde::{Deserialize, Serialize};

use crate::service::PagePosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchPhase {
    Offset,
    Token,
}

impl FetchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offset => "offset",
            Self::Token => "token",
        }
    }
}

/// What the fetch loop should do after a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    /// Request the next page in the current phase.
    Continue,
    /// The ceiling was reached; the next page uses the continuation token.
    SwitchedToToken,
    /// The result set is drained. Do not issue another request.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    pub offset: usize,
    pub continuation_token: Option<String>,
    pub phase: FetchPhase,
}

impl PaginationCursor {
    pub fn new() -> Self {
        Self {
            offset: 0,
            continuation_token: None,
            phase: FetchPhase::Offset,
        }
    }

    /// Position for the next request.
    pub fn position(&self) -> PagePosition {
        match (self.phase, &self.continuation_token) {
            (FetchPhase::Token, Some(token)) => PagePosition::Token(token.clone()),
            _ => PagePosition::Offset(self.offset),
        }
    }

    /// Record a received page and decide whether to continue.
    ///
    /// A short page always ends the fetch. In the offset phase continuation
    /// tokens are ignored until `offset_ceiling` is reached; a full page at
    /// the ceiling without a token also ends the fetch.
    pub fn advance(
        &mut self,
        rows: usize,
        page_size: usize,
        next_token: Option<String>,
        offset_ceiling: usize,
    ) -> CursorStep {
        self.offset += rows;
        if rows < page_size {
            return CursorStep::Exhausted;
        }
        match self.phase {
            FetchPhase::Offset if self.offset < offset_ceiling => CursorStep::Continue,
            FetchPhase::Offset => match next_token {
                Some(token) => {
                    self.phase = FetchPhase::Token;
                    self.continuation_token = Some(token);
                    CursorStep::SwitchedToToken
                }
                None => CursorStep::Exhausted,
            },
            FetchPhase::Token => match next_token {
                Some(token) => {
                    self.continuation_token = Some(token);
                    CursorStep::Continue
                }
                None => {
                    self.continuation_token = None;
                    CursorStep::Exhausted
                }
            },
        }
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new()
    }
}
