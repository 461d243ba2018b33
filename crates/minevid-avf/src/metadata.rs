//! Landmark scanning: the text embedded around the event stream.
//!
//! The format stores no offsets for its text fields, so each one is found
//! by scanning forward for a literal marker. Two passes run on either side
//! of the event stream:
//!
//! ```text
//! ... [qm] [?] '[' [level] [?] (custom: dims '|') timestamp '|' ... 'B' 3bv 'T' secs '.' hun ']'
//! <event stream>
//! ... "cs=" [17 bytes] Key: value \r ... player \r program '0' .VV [spacer] [tail ...]
//! ```
//!
//! Numeric fields are parsed leniently: anything that is not a number
//! becomes zero, as every historical reader of the format does.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::config::{DecoderConfig, SkinKeyMatch};
use crate::cursor::{ByteCursor, CR};
use crate::error::{ErrorKind, ParseError, Phase};
use crate::types::GameMode;

/// Control byte preceding the timestamp when question marks are enabled.
pub const QUESTION_MARKS_ON: u8 = 17;
/// Control byte preceding the timestamp when question marks are disabled.
pub const QUESTION_MARKS_OFF: u8 = 127;

/// Literal introducing the trailing text section.
pub const TRAILER_MARKER: [u8; 3] = *b"cs=";
/// Bytes between `cs=` and the first key/value pair. Constant across all
/// recordings seen so far; not derivable from the surrounding structure.
pub const CS_FILLER_LEN: usize = 17;
/// Bytes of minor version text (`.52`) following the program name.
pub const VERSION_NUMBER_LEN: usize = 3;
/// Bytes read for the version suffix. Longer than any known suffix.
pub const VERSION_TAIL_LEN: usize = 10;

const SKIN_KEY: &str = "Skin";

/// Digits accumulate into an inline buffer; real fields fit in 8 bytes.
type Digits = SmallVec<[u8; 8]>;

// ── Start section ───────────────────────────────────────────────

/// Fields found ahead of the 3BV marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartInfo {
    /// Whether question marks were enabled.
    pub question_marks: bool,
    /// Custom-game dimension string (e.g. `W8H8M10`).
    pub custom_dimensions: Option<String>,
    /// Start timestamp, verbatim.
    pub start_timestamp: String,
}

/// Scan for the opening bracket and read the timestamp block.
///
/// The control byte sits two bytes ahead of the first `[`. After the
/// bracket one byte is absorbed by the scan window and one more is
/// discarded before the timestamp text begins.
pub fn decode_start(
    cursor: &mut ByteCursor<'_>,
    mode: GameMode,
    config: &DecoderConfig,
) -> Result<StartInfo, ParseError> {
    cursor.set_phase(Phase::Metadata);

    let mut window = [0u8; 4];
    while window[3] != b'[' {
        window = [window[1], window[2], window[3], cursor.next_byte()?];
    }
    let bracket = cursor.position() - 1;
    window = [window[1], window[2], window[3], cursor.next_byte()?];

    let question_marks = match window[0] {
        QUESTION_MARKS_ON => true,
        QUESTION_MARKS_OFF => false,
        found => {
            let offset = bracket.saturating_sub(2);
            return Err(cursor.error_at(ErrorKind::MalformedLandmark { found }, offset));
        }
    };

    cursor.next_byte()?;

    let custom_dimensions = match mode {
        GameMode::Custom => Some(cursor.read_until(b'|', config.max_field_len)?),
        _ => None,
    };
    let start_timestamp = cursor.read_until(b'|', config.max_field_len)?;

    Ok(StartInfo {
        question_marks,
        custom_dimensions,
        start_timestamp,
    })
}

// ── Score section ───────────────────────────────────────────────

/// 3BV and elapsed time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    /// 3BV as stored.
    pub bbbv: u32,
    /// Stored seconds minus one.
    pub elapsed_seconds: i64,
    /// Hundredths.
    pub elapsed_hundredths: u32,
}

/// Read `B<3bv>T<secs>.<hun>]`, skipping anything before the `B`.
///
/// Leaves the cursor just past the closing bracket, where the event stream
/// scan begins.
pub fn decode_score(
    cursor: &mut ByteCursor<'_>,
    config: &DecoderConfig,
) -> Result<Score, ParseError> {
    cursor.set_phase(Phase::Metadata);

    while cursor.next_byte()? != b'B' {}

    let bbbv = lenient_number(&read_digits(cursor, &[b'T'], config.max_field_len)?);
    let seconds = lenient_number(&read_digits(cursor, &[b'.', b','], config.max_field_len)?);
    let hundredths = lenient_number(&read_digits(cursor, &[b']'], config.max_field_len)?);

    Ok(Score {
        bbbv,
        elapsed_seconds: seconds as i64 - 1,
        elapsed_hundredths: hundredths,
    })
}

/// Accumulate bytes until one of `stops` is read (consumed, not kept).
///
/// Bytes beyond `max_len` are consumed but dropped.
fn read_digits(
    cursor: &mut ByteCursor<'_>,
    stops: &[u8],
    max_len: usize,
) -> Result<Digits, ParseError> {
    let mut digits = Digits::new();
    loop {
        let byte = cursor.next_byte()?;
        if stops.contains(&byte) {
            return Ok(digits);
        }
        if digits.len() < max_len {
            digits.push(byte);
        }
    }
}

/// Parse the leading decimal digits of `bytes`, ignoring leading
/// whitespace. Empty, non-numeric or overflowing input yields zero.
pub fn lenient_number(bytes: &[u8]) -> u32 {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let digits = &bytes[start..];
    let end = digits
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    std::str::from_utf8(&digits[..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

// ── Trailer section ─────────────────────────────────────────────

/// Text fields at the end of the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trailer {
    /// Every non-empty key/value pair, keys and values trimmed.
    pub properties: IndexMap<String, String>,
    /// Skin name.
    pub skin: String,
    /// Player name: the colon-less line that ends the key/value block.
    pub player_name: String,
    /// Recording program name.
    pub program: String,
    /// `.` or space between minor version and suffix.
    pub version_spacer: char,
    /// Version suffix.
    pub version_suffix: String,
}

/// One line of the key/value block.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Pair {
    /// `key:value\r`, or a bare `key\r` with an empty value.
    Entry { key: String, value: String },
    /// A line containing `<` in its key; the rest of the line is dropped.
    Escape,
}

/// Read one key/value line.
fn read_pair(cursor: &mut ByteCursor<'_>, max_len: usize) -> Result<Pair, ParseError> {
    let mut key = String::new();
    let mut terminator = None;
    for _ in 0..max_len {
        let byte = cursor.next_byte()?;
        match byte {
            b'<' => {
                while cursor.next_byte()? != CR {}
                return Ok(Pair::Escape);
            }
            b':' | CR => {
                terminator = Some(byte);
                break;
            }
            _ => key.push(char::from(byte)),
        }
    }

    let mut value = String::new();
    if terminator != Some(CR) {
        for _ in 0..max_len {
            let byte = cursor.next_byte()?;
            if byte == CR {
                break;
            }
            value.push(char::from(byte));
        }
    }
    Ok(Pair::Entry { key, value })
}

/// Drop the single separator character that follows the colon.
fn strip_separator(value: &str) -> &str {
    value.strip_prefix([' ', '\t']).unwrap_or(value)
}

/// Scan for `cs=` and read the key/value block, program and version.
pub fn decode_trailer(
    cursor: &mut ByteCursor<'_>,
    config: &DecoderConfig,
) -> Result<Trailer, ParseError> {
    cursor.set_phase(Phase::Metadata);

    let mut window = [0u8; 3];
    while window != TRAILER_MARKER {
        window = [window[1], window[2], cursor.next_byte()?];
    }
    tracing::trace!(offset = cursor.position(), "found trailer marker");
    cursor.skip(CS_FILLER_LEN)?;

    let mut trailer = Trailer::default();
    loop {
        let (key, value) = match read_pair(cursor, config.max_field_len)? {
            Pair::Entry { key, value } if !value.is_empty() => (key, value),
            Pair::Entry { key, .. } => {
                trailer.player_name = key.trim().to_string();
                break;
            }
            Pair::Escape => break,
        };

        let is_skin = key.trim() == SKIN_KEY;
        match config.skin_key_match {
            SkinKeyMatch::Exact if is_skin => {
                trailer.skin = strip_separator(&value).to_string();
            }
            SkinKeyMatch::LegacyInverted if !is_skin => {
                trailer.skin = value.chars().skip(1).collect();
            }
            _ => {}
        }
        trailer
            .properties
            .insert(key.trim().to_string(), value.trim().to_string());
    }

    trailer.program = cursor.read_until(b'0', config.max_field_len)?;

    cursor.skip(VERSION_NUMBER_LEN)?;
    trailer.version_spacer = cursor.next_char()?;
    let tail = cursor.take_up_to(VERSION_TAIL_LEN);
    trailer.version_suffix = tail
        .iter()
        .take_while(|&&b| b != b'.' && b != b'C')
        .map(|&b| char::from(b))
        .collect();

    Ok(trailer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DecoderConfig {
        DecoderConfig::default()
    }

    // ── Start section ───────────────────────────────────────────

    #[test]
    fn start_reads_timestamp_and_question_marks() {
        let bytes = b"\x05\x11\x00[1|14.10.2012 19:30:35|rest";
        let mut cursor = ByteCursor::new(bytes);
        let start = decode_start(&mut cursor, GameMode::Beginner, &config()).unwrap();
        assert!(start.question_marks);
        assert_eq!(start.custom_dimensions, None);
        assert_eq!(start.start_timestamp, "14.10.2012 19:30:35");
        assert_eq!(cursor.next_char().unwrap(), 'r');
    }

    #[test]
    fn start_disabled_question_marks() {
        let bytes = b"\x7f\x00[3|ts|";
        let start = decode_start(&mut ByteCursor::new(bytes), GameMode::Expert, &config()).unwrap();
        assert!(!start.question_marks);
        assert_eq!(start.start_timestamp, "ts");
    }

    #[test]
    fn custom_mode_reads_dimension_string_first() {
        let bytes = b"\x11\x00[4|W9H9M10|2020-01-01|";
        let start = decode_start(&mut ByteCursor::new(bytes), GameMode::Custom, &config()).unwrap();
        assert_eq!(start.custom_dimensions.as_deref(), Some("W9H9M10"));
        assert_eq!(start.start_timestamp, "2020-01-01");
    }

    #[test]
    fn unknown_control_byte_is_malformed() {
        let bytes = b"\x00\x2a\x00[1|ts|";
        let err = decode_start(&mut ByteCursor::new(bytes), GameMode::Beginner, &config())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLandmark { found: 42 });
        assert_eq!(err.phase, Phase::Metadata);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn bracket_at_start_sees_zeroed_window() {
        let bytes = b"[1|ts|";
        let err = decode_start(&mut ByteCursor::new(bytes), GameMode::Beginner, &config())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLandmark { found: 0 });
    }

    #[test]
    fn timestamp_bounded_by_field_length() {
        let config = DecoderConfig {
            max_field_len: 4,
            ..Default::default()
        };
        let bytes = b"\x11\x00[1|abcdefgh|";
        let start = decode_start(&mut ByteCursor::new(bytes), GameMode::Beginner, &config).unwrap();
        assert_eq!(start.start_timestamp, "abcd");
    }

    // ── Score section ───────────────────────────────────────────

    #[test]
    fn score_fields() {
        let bytes = b"xx|B123T45.67]\x01";
        let mut cursor = ByteCursor::new(bytes);
        let score = decode_score(&mut cursor, &config()).unwrap();
        assert_eq!(
            score,
            Score {
                bbbv: 123,
                elapsed_seconds: 44,
                elapsed_hundredths: 67
            }
        );
        assert_eq!(cursor.next_byte().unwrap(), 1);
    }

    #[test]
    fn comma_decimal_separator() {
        let score = decode_score(&mut ByteCursor::new(b"B7T3,05]"), &config()).unwrap();
        assert_eq!(score.bbbv, 7);
        assert_eq!(score.elapsed_seconds, 2);
        assert_eq!(score.elapsed_hundredths, 5);
    }

    #[test]
    fn non_numeric_fields_default_to_zero() {
        let score = decode_score(&mut ByteCursor::new(b"BTxx.]"), &config()).unwrap();
        assert_eq!(score.bbbv, 0);
        assert_eq!(score.elapsed_seconds, -1);
        assert_eq!(score.elapsed_hundredths, 0);
    }

    #[test]
    fn score_without_closing_bracket_is_end_of_input() {
        let err = decode_score(&mut ByteCursor::new(b"B12T4.5"), &config()).unwrap_err();
        assert!(err.is_end_of_input());
    }

    #[test]
    fn lenient_number_rules() {
        assert_eq!(lenient_number(b"123"), 123);
        assert_eq!(lenient_number(b" 42"), 42);
        assert_eq!(lenient_number(b"12ab"), 12);
        assert_eq!(lenient_number(b""), 0);
        assert_eq!(lenient_number(b"ab"), 0);
        assert_eq!(lenient_number(b"99999999999"), 0);
    }

    // ── Trailer section ─────────────────────────────────────────

    fn trailer_bytes(body: &[u8]) -> Vec<u8> {
        let mut bytes = b"\x00\x01junkcs=".to_vec();
        bytes.extend_from_slice(&[b'#'; CS_FILLER_LEN]);
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn trailer_pairs_program_and_version() {
        let bytes = trailer_bytes(
            b"Realtime: 12.34\rSkin: Classic\rJohn Doe\rMinesweeper Arbiter 0.52.3. Copyright",
        );
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config()).unwrap();
        assert_eq!(trailer.skin, "Classic");
        assert_eq!(trailer.player_name, "John Doe");
        assert_eq!(trailer.program, "Minesweeper Arbiter ");
        assert_eq!(trailer.version_spacer, '.');
        assert_eq!(trailer.version_suffix, "3");
        assert_eq!(trailer.properties.len(), 2);
        assert_eq!(trailer.properties["Realtime"], "12.34");
        assert_eq!(
            trailer.properties.keys().collect::<Vec<_>>(),
            vec!["Realtime", "Skin"]
        );
    }

    #[test]
    fn skin_without_separator() {
        let bytes = trailer_bytes(b"Skin:Classic\r\rArbiter 0.52.3. Copyright");
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config()).unwrap();
        assert_eq!(trailer.skin, "Classic");
        assert_eq!(trailer.player_name, "");
    }

    #[test]
    fn legacy_inverted_skin_match() {
        let config = DecoderConfig {
            skin_key_match: SkinKeyMatch::LegacyInverted,
            ..Default::default()
        };
        let bytes = trailer_bytes(b"Realtime: 12.34\rSkin: Classic\r\rArbiter 0.52. Copyright");
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config).unwrap();
        assert_eq!(trailer.skin, "12.34");
    }

    #[test]
    fn space_spaced_version_suffix() {
        let bytes = trailer_bytes(b"\rArbiter 0.43 demo3. Copyright");
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config()).unwrap();
        assert_eq!(trailer.version_spacer, ' ');
        assert_eq!(trailer.version_suffix, "demo3");
        assert!(trailer.properties.is_empty());
    }

    #[test]
    fn suffix_stops_at_copyright_marker() {
        let bytes = trailer_bytes(b"\rArbiter 0.52 Copyright");
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config()).unwrap();
        assert_eq!(trailer.version_suffix, "");
    }

    #[test]
    fn short_version_tail_is_tolerated() {
        let bytes = trailer_bytes(b"\rArbiter 0.52.3");
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config()).unwrap();
        assert_eq!(trailer.version_suffix, "3");
    }

    #[test]
    fn escape_line_ends_pairs() {
        let bytes = trailer_bytes(b"Skin: Blue\r<sub record>\rArbiter 0.52.1. Copyright");
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config()).unwrap();
        assert_eq!(trailer.skin, "Blue");
        assert_eq!(trailer.player_name, "");
        assert_eq!(trailer.program, "Arbiter ");
        assert_eq!(trailer.version_suffix, "1");
    }

    #[test]
    fn empty_value_line_ends_pairs() {
        // `Key:` with nothing before the CR closes the block like a bare line.
        let bytes = trailer_bytes(b"Skin: Blue\rMode:\rArbiter 0.52.1. Copyright");
        let trailer = decode_trailer(&mut ByteCursor::new(&bytes), &config()).unwrap();
        assert_eq!(trailer.player_name, "Mode");
        assert_eq!(trailer.properties.len(), 1);
        assert_eq!(trailer.program, "Arbiter ");
    }

    #[test]
    fn missing_marker_is_end_of_input() {
        let err = decode_trailer(&mut ByteCursor::new(b"cs-no marker"), &config()).unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(err.phase, Phase::Metadata);
    }

    #[test]
    fn truncated_filler_is_end_of_input() {
        let err = decode_trailer(&mut ByteCursor::new(b"cs=0123"), &config()).unwrap_err();
        assert!(err.is_end_of_input());
    }
}
