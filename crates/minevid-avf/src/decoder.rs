//! Phase orchestration.
//!
//! [`Decoder`] runs the phases in their only valid order over one
//! [`ByteCursor`]: header, board, start text, score, event stream, trailer.
//! Each phase starts exactly where the previous one stopped.

use crate::board::decode_board;
use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::error::{ConfigError, ParseError};
use crate::events::decode_events;
use crate::header::decode_header;
use crate::metadata::{decode_score, decode_start, decode_trailer};
use crate::types::ReplayRecord;

/// A validated decoder configuration.
///
/// Decoding holds no state between calls, so one `Decoder` can be shared
/// across threads.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Validate `config` and build a decoder.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a complete AVF file.
    pub fn decode(&self, bytes: &[u8]) -> Result<ReplayRecord, ParseError> {
        let span = tracing::debug_span!("avf_decode", len = bytes.len());
        let _enter = span.enter();

        let result = self.decode_phases(&mut ByteCursor::new(bytes));
        if let Err(e) = &result {
            tracing::debug!("decode failed: {e}");
        }
        result
    }

    fn decode_phases(&self, cursor: &mut ByteCursor<'_>) -> Result<ReplayRecord, ParseError> {
        let config = &self.config;

        let header = decode_header(cursor)?;
        tracing::debug!(
            offset = cursor.position(),
            "header: version 0.{} {:?} {}x{} with {} mines",
            header.version,
            header.mode,
            header.layout.width,
            header.layout.height,
            header.layout.mines
        );

        let mine_grid = decode_board(cursor, &header.layout, config)?;

        let start = decode_start(cursor, header.mode, config)?;
        let score = decode_score(cursor, config)?;
        tracing::debug!(
            offset = cursor.position(),
            "score: 3BV {} in {}.{:02}s",
            score.bbbv,
            score.elapsed_seconds,
            score.elapsed_hundredths
        );

        let events = decode_events(cursor)?;
        tracing::debug!(offset = cursor.position(), "{} events", events.len());

        let trailer = decode_trailer(cursor, config)?;
        tracing::debug!(
            offset = cursor.position(),
            "trailer: {} properties, program {:?}",
            trailer.properties.len(),
            trailer.program
        );

        Ok(ReplayRecord {
            version: header.version,
            mode: header.mode,
            width: header.layout.width,
            height: header.layout.height,
            mine_count: header.layout.mines,
            mine_grid,
            question_marks: start.question_marks,
            custom_dimensions: start.custom_dimensions,
            start_timestamp: start.start_timestamp,
            bbbv: score.bbbv,
            elapsed_seconds: score.elapsed_seconds,
            elapsed_hundredths: score.elapsed_hundredths,
            player_name: trailer.player_name,
            skin: trailer.skin,
            program: trailer.program,
            version_spacer: trailer.version_spacer,
            version_suffix: trailer.version_suffix,
            properties: trailer.properties,
            events,
        })
    }
}

/// Decode a complete AVF file with the default configuration.
///
/// # Examples
///
/// ```
/// use minevid_avf::{decode, ErrorKind, Phase};
///
/// // Version 52, reserved bytes, then mode byte 9 (mode 7: unknown).
/// let err = decode(&[52, 0, 0, 0, 0, 9]).unwrap_err();
/// assert_eq!(err.phase, Phase::Header);
/// assert_eq!(err.kind, ErrorKind::UnrecognizedMode { code: 9 });
/// ```
pub fn decode(bytes: &[u8]) -> Result<ReplayRecord, ParseError> {
    Decoder::default().decode(bytes)
}
