//! Text stages run on spans before they are tokenized.
//!
//! A stage is a `Cow<str>` → `Cow<str>` transform with a cheap pre-check;
//! when `needs_apply` says no, the input is passed through without copying.
//! The codec runs NFD ahead of the segmenter and NFC + ligature expansion
//! ahead of letter/codepoint tokenization.

pub mod expand_ligatures;
pub mod normalization;

pub use expand_ligatures::ExpandLigatures;
pub use normalization::{NFC, NFD, NfcStage, NfdStage};

use std::borrow::Cow;
use thiserror::Error;

/// Public error type for every stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("stage `{0}` failed: {1}")]
    Failed(&'static str, String),
}

/// A single text transform.
pub trait Stage: Send + Sync {
    /// Human-readable name, used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `Ok(false)` skips the whole stage.
    fn needs_apply(&self, text: &str) -> Result<bool, StageError>;

    /// Allocation-aware transformation. Must always be correct, even when
    /// `needs_apply` would have returned `false`.
    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError>;
}
