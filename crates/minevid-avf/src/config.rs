//! Decoder configuration and validation.

use crate::error::ConfigError;

// ── SkinKeyMatch ───────────────────────────────────────────────────

/// How the trailing key/value reader decides which pair holds the skin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkinKeyMatch {
    /// Capture the value of the pair keyed `Skin`.
    #[default]
    Exact,
    /// Capture the value of every pair whose key is *not* `Skin`, minus
    /// its first character, keeping the last one. Matches older readers
    /// that inverted the key comparison.
    LegacyInverted,
}

// ── DecoderConfig ──────────────────────────────────────────────────

/// Tunables for [`Decoder`](crate::Decoder).
///
/// Defaults take the skin from the `Skin` key, bound every text field to
/// 1000 characters and skip mines that fall outside the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of characters read for any delimited text field
    /// (timestamps, keys, values, program name). Default: 1000.
    pub max_field_len: usize,
    /// Fail with [`ErrorKind::MineOutOfBounds`](crate::ErrorKind::MineOutOfBounds)
    /// on mine coordinates outside the board instead of ignoring them.
    /// Default: false.
    pub strict_mine_bounds: bool,
    /// Skin key comparison. Default: [`SkinKeyMatch::Exact`].
    pub skin_key_match: SkinKeyMatch,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_field_len: 1000,
            strict_mine_bounds: false,
            skin_key_match: SkinKeyMatch::Exact,
        }
    }
}

impl DecoderConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_field_len == 0 {
            return Err(ConfigError::ZeroFieldLength);
        }
        Ok(())
    }
}
