//! Decoder for Minesweeper Arbiter `.avf` replay files (versions 0.35 to 0.52.x).
//!
//! Turns the raw bytes of one recording into a [`ReplayRecord`]: board
//! layout, mine positions, mouse events and the embedded text metadata.
//! The format carries no offsets, lengths or tags, so decoding is a single
//! forward pass that locates most fields by scanning for literal markers.
//!
//! # Architecture
//!
//! - [`ByteCursor`](cursor::ByteCursor) is the only reader of the buffer
//! - [`header`], [`board`], [`metadata`] and [`events`] decode one phase each
//! - [`Decoder`] runs the phases in order; [`decode`] uses default settings
//! - [`decode_batch`] decodes many files on a worker pool
//!
//! # Format
//!
//! ```text
//! [version] [reserved x4] [mode+2] (custom: [w-1] [h-1] [mines u16 BE])
//! [row col] x mines
//! ... [qm] . '[' . . timestamp '|' ... 'B' 3bv 'T' secs '.' hun ']'
//! ... <sentinel> [8-byte event] ... [terminator]
//! ... "cs=" [17 bytes] key:value\r ... player\r program "0.VV" spacer suffix ...
//! ```
//!
//! Any failure is fatal and reported as a [`ParseError`] carrying the phase
//! and byte offset; no partial record is returned.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod board;
pub mod config;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod events;
pub mod header;
pub mod metadata;
pub mod types;

pub use batch::{decode_batch, resolved_worker_count};
pub use config::{DecoderConfig, SkinKeyMatch};
pub use decoder::{decode, Decoder};
pub use error::{ConfigError, ErrorKind, ParseError, Phase};
pub use types::{BoardLayout, EventSample, GameMode, MineGrid, ReplayRecord};
