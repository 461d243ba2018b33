//! Forward-only byte cursor shared by every decoding phase.
//!
//! [`ByteCursor`] is the only place the input buffer is indexed. Every read
//! consumes exactly one byte; running off the end is reported as
//! [`ErrorKind::UnexpectedEndOfInput`] tagged with the phase the cursor is
//! currently serving.

use crate::error::{ErrorKind, ParseError, Phase};

/// Carriage return, the line terminator of the trailing text section.
pub const CR: u8 = b'\r';

/// A read position over a borrowed AVF buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    phase: Phase,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at byte 0, in the [`Phase::Header`] phase.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            phase: Phase::Header,
        }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Phase attributed to failures raised by this cursor.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Switch the phase attributed to subsequent failures.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Build an error of the given kind at the current offset.
    pub fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(self.phase, kind, self.offset)
    }

    /// Build an error of the given kind at an explicit offset.
    pub fn error_at(&self, kind: ErrorKind, offset: usize) -> ParseError {
        ParseError::new(self.phase, kind, offset)
    }

    /// Read the next byte as an integer.
    pub fn next_byte(&mut self) -> Result<u8, ParseError> {
        let byte = *self
            .bytes
            .get(self.offset)
            .ok_or_else(|| self.error(ErrorKind::UnexpectedEndOfInput))?;
        self.offset += 1;
        Ok(byte)
    }

    /// Read the next byte as a character.
    ///
    /// Bytes map one-to-one onto the Latin-1 range; the format predates any
    /// multi-byte text encoding.
    pub fn next_char(&mut self) -> Result<char, ParseError> {
        self.next_byte().map(char::from)
    }

    /// Discard `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), ParseError> {
        for _ in 0..n {
            self.next_byte()?;
        }
        Ok(())
    }

    /// Read up to `n` bytes, stopping early at end of input.
    pub fn take_up_to(&mut self, n: usize) -> &'a [u8] {
        let end = self.offset.saturating_add(n).min(self.bytes.len());
        let start = self.offset.min(end);
        self.offset = end;
        &self.bytes[start..end]
    }

    /// Accumulate characters until `delim` is read.
    ///
    /// The delimiter is consumed but not included. At most `max_len`
    /// characters are read; if the limit is hit first, the characters read
    /// so far are returned and the delimiter is left unconsumed.
    pub fn read_until(&mut self, delim: u8, max_len: usize) -> Result<String, ParseError> {
        let mut out = String::new();
        for _ in 0..max_len {
            let byte = self.next_byte()?;
            if byte == delim {
                break;
            }
            out.push(char::from(byte));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_one_byte_each() {
        let mut cursor = ByteCursor::new(b"AB");
        assert_eq!(cursor.next_byte().unwrap(), b'A');
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.next_char().unwrap(), 'B');
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn end_of_input_reports_offset_and_phase() {
        let mut cursor = ByteCursor::new(&[7]);
        cursor.set_phase(Phase::Board);
        cursor.next_byte().unwrap();
        let err = cursor.next_byte().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.phase, Phase::Board);
        assert_eq!(err.offset, 1);
        // A failed read does not advance.
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn zero_bytes_are_ordinary_data() {
        let mut cursor = ByteCursor::new(&[0, 0]);
        assert_eq!(cursor.next_byte().unwrap(), 0);
        assert_eq!(cursor.next_char().unwrap(), '\0');
    }

    #[test]
    fn high_bytes_map_to_latin1() {
        let mut cursor = ByteCursor::new(&[0xE9]);
        assert_eq!(cursor.next_char().unwrap(), 'é');
    }

    #[test]
    fn skip_fails_past_end() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);
        assert!(cursor.skip(3).is_ok());
        assert!(cursor.skip(1).unwrap_err().is_end_of_input());
    }

    #[test]
    fn read_until_excludes_delimiter() {
        let mut cursor = ByteCursor::new(b"12:30|rest");
        assert_eq!(cursor.read_until(b'|', 100).unwrap(), "12:30");
        assert_eq!(cursor.next_char().unwrap(), 'r');
    }

    #[test]
    fn read_until_stops_at_length_guard() {
        let mut cursor = ByteCursor::new(b"abcdef|");
        assert_eq!(cursor.read_until(b'|', 3).unwrap(), "abc");
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn read_until_without_delimiter_is_end_of_input() {
        let mut cursor = ByteCursor::new(b"abc");
        assert!(cursor.read_until(b'|', 100).unwrap_err().is_end_of_input());
    }

    #[test]
    fn take_up_to_is_lenient_at_end() {
        let mut cursor = ByteCursor::new(b"xyz");
        cursor.next_byte().unwrap();
        assert_eq!(cursor.take_up_to(10), b"yz");
        assert_eq!(cursor.take_up_to(10), b"");
        assert_eq!(cursor.position(), 3);
    }
}
