//! Header phase: version, mode and board dimensions.
//!
//! ```text
//! [version u8] [reserved 4 bytes] [mode+2 u8]
//! custom only: [width-1 u8] [height-1 u8] [mines hi u8] [mines lo u8]
//! ```

use crate::cursor::ByteCursor;
use crate::error::{ErrorKind, ParseError, Phase};
use crate::types::{BoardLayout, GameMode};

/// Bytes between the version byte and the mode byte. Unused by every known
/// version.
pub const RESERVED_LEN: usize = 4;

/// Bias added to the mode code when it is stored.
pub const MODE_BIAS: u8 = 2;

/// Decoded header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Minor version of the recording program.
    pub version: u8,
    /// Board preset.
    pub mode: GameMode,
    /// Dimensions and mine count.
    pub layout: BoardLayout,
}

/// Decode the header from a cursor positioned at byte 0.
///
/// An unknown mode byte is terminal: the format has no interpretation for
/// the rest of the file.
pub fn decode_header(cursor: &mut ByteCursor<'_>) -> Result<Header, ParseError> {
    cursor.set_phase(Phase::Header);

    let version = cursor.next_byte()?;
    cursor.skip(RESERVED_LEN)?;

    let mode_offset = cursor.position();
    let raw_mode = cursor.next_byte()?;
    let mode = GameMode::from_code(raw_mode.wrapping_sub(MODE_BIAS)).ok_or_else(|| {
        cursor.error_at(ErrorKind::UnrecognizedMode { code: raw_mode }, mode_offset)
    })?;

    let layout = match mode.standard_layout() {
        Some(layout) => layout,
        None => {
            let width = cursor.next_byte()? as u16 + 1;
            let height = cursor.next_byte()? as u16 + 1;
            let hi = cursor.next_byte()?;
            let lo = cursor.next_byte()?;
            BoardLayout {
                width,
                height,
                mines: u16::from_be_bytes([hi, lo]),
            }
        }
    };

    Ok(Header {
        version,
        mode,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(mode_byte: u8, extra: &[u8]) -> Vec<u8> {
        let mut bytes = vec![52, 0, 0, 0, 0, mode_byte];
        bytes.extend_from_slice(extra);
        bytes
    }

    #[test]
    fn standard_modes_use_fixed_layouts() {
        let cases = [
            (3, GameMode::Beginner, (8, 8, 10)),
            (4, GameMode::Intermediate, (16, 16, 40)),
            (5, GameMode::Expert, (30, 16, 99)),
        ];
        for (byte, mode, (w, h, m)) in cases {
            let bytes = header_bytes(byte, &[]);
            let mut cursor = ByteCursor::new(&bytes);
            let header = decode_header(&mut cursor).unwrap();
            assert_eq!(header.version, 52);
            assert_eq!(header.mode, mode);
            assert_eq!(header.layout.width, w);
            assert_eq!(header.layout.height, h);
            assert_eq!(header.layout.mines, m);
            assert_eq!(cursor.position(), 6);
        }
    }

    #[test]
    fn custom_mode_reads_dimensions() {
        let bytes = header_bytes(6, &[9, 4, 0x01, 0x02]);
        let mut cursor = ByteCursor::new(&bytes);
        let header = decode_header(&mut cursor).unwrap();
        assert_eq!(header.mode, GameMode::Custom);
        assert_eq!(header.layout.width, 10);
        assert_eq!(header.layout.height, 5);
        assert_eq!(header.layout.mines, 258);
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn custom_dimension_bytes_at_extremes() {
        let bytes = header_bytes(6, &[255, 0, 0xFF, 0xFF]);
        let header = decode_header(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(header.layout.width, 256);
        assert_eq!(header.layout.height, 1);
        assert_eq!(header.layout.mines, 65535);
    }

    #[test]
    fn unknown_mode_bytes_rejected() {
        for byte in [0u8, 1, 2, 7, 200, 255] {
            let bytes = header_bytes(byte, &[0; 8]);
            let err = decode_header(&mut ByteCursor::new(&bytes)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::UnrecognizedMode { code: byte });
            assert_eq!(err.phase, Phase::Header);
            assert_eq!(err.offset, 5);
        }
    }

    #[test]
    fn truncated_custom_header() {
        let bytes = header_bytes(6, &[9, 4, 0x01]);
        let err = decode_header(&mut ByteCursor::new(&bytes)).unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(err.offset, 9);
    }
}
