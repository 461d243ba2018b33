//! Error types for AVF decoding.

use std::error::Error;
use std::fmt;

/// The decoding phase that was active when a failure occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Version byte, reserved bytes, mode byte and custom dimensions.
    Header,
    /// Mine coordinate pairs.
    Board,
    /// Landmark scanning: timestamp, 3BV, elapsed time and the trailing
    /// key/value section.
    Metadata,
    /// Fixed 8-byte mouse event records.
    EventStream,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Board => "board",
            Self::Metadata => "metadata",
            Self::EventStream => "event stream",
        };
        f.write_str(name)
    }
}

/// Why a decode failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The cursor ran past the end of the buffer before the phase completed.
    UnexpectedEndOfInput,
    /// The header mode byte maps to no known board layout.
    UnrecognizedMode {
        /// The raw mode byte as stored in the file.
        code: u8,
    },
    /// A control byte used to discriminate format variants has an
    /// unrecognized value.
    MalformedLandmark {
        /// The byte that was found.
        found: u8,
    },
    /// A mine coordinate lies outside the board. Only reported when
    /// [`DecoderConfig::strict_mine_bounds`](crate::DecoderConfig::strict_mine_bounds)
    /// is set.
    MineOutOfBounds {
        /// 1-based row byte as stored in the file.
        row: u8,
        /// 1-based column byte as stored in the file.
        col: u8,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Self::UnrecognizedMode { code } => {
                write!(f, "unrecognized mode byte {code}")
            }
            Self::MalformedLandmark { found } => {
                write!(f, "malformed landmark: control byte {found}")
            }
            Self::MineOutOfBounds { row, col } => {
                write!(f, "mine at row {row}, column {col} lies outside the board")
            }
        }
    }
}

/// A fatal decode failure.
///
/// Carries the phase, the reason and the byte offset of the cursor at the
/// moment of failure. No partial record is ever produced alongside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Phase that failed.
    pub phase: Phase,
    /// Reason for the failure.
    pub kind: ErrorKind,
    /// Byte offset into the input buffer.
    pub offset: usize,
}

impl ParseError {
    /// Build an error for the given phase, reason and offset.
    pub fn new(phase: Phase, kind: ErrorKind, offset: usize) -> Self {
        Self {
            phase,
            kind,
            offset,
        }
    }

    /// Whether the failure was caused by running out of input.
    pub fn is_end_of_input(&self) -> bool {
        self.kind == ErrorKind::UnexpectedEndOfInput
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} phase failed at byte {:#x}: {}",
            self.phase, self.offset, self.kind
        )
    }
}

impl Error for ParseError {}

/// Errors detected during [`DecoderConfig::validate()`](crate::DecoderConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_field_len` must allow at least one character.
    ZeroFieldLength,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFieldLength => write!(f, "max_field_len must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
