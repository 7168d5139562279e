pub mod annotate;
pub mod cli;
pub mod config;
pub mod engine;
pub mod services;

pub use config::Config;
pub use engine::Assistant;

/// One flagged region reported by the grammar service.
///
/// `offset` and `length` count Unicode scalar values against the exact text
/// that was checked. Matches may overlap each other; the annotation engine
/// resolves overlaps, callers never have to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub offset: usize,
    pub length: usize,
    pub message: String,
    pub replacements: Vec<String>,
    pub rule: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub match_count: usize,
    pub fixed_count: usize,
    pub reports: Vec<MatchReport>,
}

/// A match positioned for display: 1-indexed line/column plus a context
/// excerpt, derived from the flagged segments of one checked text.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Half-open character range in the checked text.
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub message: String,
    pub replacements: Vec<String>,
    pub context: String,
}
