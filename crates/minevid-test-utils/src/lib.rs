//! Test utilities for minevid development.
//!
//! Provides [`AvfBuilder`], which assembles synthetic `.avf` byte streams
//! field by field so decoder tests can state exactly what they expect back.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{long_replay, sample_beginner};

use minevid_avf::header::{MODE_BIAS, RESERVED_LEN};
use minevid_avf::metadata::{CS_FILLER_LEN, QUESTION_MARKS_OFF, QUESTION_MARKS_ON, TRAILER_MARKER};
use minevid_avf::GameMode;

/// One event as the decoder should report it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawEvent {
    pub mouse: u8,
    pub x: u16,
    pub y: u16,
    pub seconds: u16,
    pub hundredths: u8,
}

impl RawEvent {
    pub fn new(mouse: u8, x: u16, y: u16, seconds: u16, hundredths: u8) -> Self {
        Self {
            mouse,
            x,
            y,
            seconds,
            hundredths,
        }
    }

    /// Encode as an 8-byte record. Seconds are stored plus one.
    pub fn encode(&self) -> [u8; 8] {
        let [x_hi, x_lo] = self.x.to_be_bytes();
        let [y_hi, y_lo] = self.y.to_be_bytes();
        let [s_hi, s_lo] = (self.seconds + 1).to_be_bytes();
        [self.mouse, x_hi, s_lo, x_lo, self.hundredths, y_hi, s_hi, y_lo]
    }
}

/// Builder for synthetic AVF files.
///
/// Defaults produce a well-formed recording with version 52, question
/// marks disabled, the preset's mines scattered over the board, one event
/// and an empty key/value block. Mines are given 0-based; the builder
/// writes them 1-based. The number of mines written must match the
/// header's count or the decoder will read past the board.
#[derive(Clone, Debug)]
pub struct AvfBuilder {
    version: u8,
    mode_byte: u8,
    custom: Option<(u8, u8, u16)>,
    mines: Vec<(u8, u8)>,
    control_byte: u8,
    custom_dimensions: String,
    timestamp: String,
    score_text: Vec<u8>,
    events: Vec<[u8; 8]>,
    pairs: Vec<Vec<u8>>,
    player: String,
    program: String,
    version_text: Vec<u8>,
}

impl AvfBuilder {
    fn with_mode(mode: GameMode) -> Self {
        let builder = Self {
            version: 52,
            mode_byte: mode.code() + MODE_BIAS,
            custom: None,
            mines: Vec::new(),
            control_byte: QUESTION_MARKS_OFF,
            custom_dimensions: String::new(),
            timestamp: "14.10.2012 19:30:35".into(),
            score_text: b"B0T1.00]".to_vec(),
            events: vec![RawEvent::new(1, 0, 0, 0, 0).encode()],
            pairs: Vec::new(),
            player: String::new(),
            program: "Minesweeper Arbiter ".into(),
            version_text: b"0.52.3. Copyright (C) 2012".to_vec(),
        };
        match mode.standard_layout() {
            Some(layout) => builder.scattered_mines(layout.width, layout.height, layout.mines),
            None => builder,
        }
    }

    pub fn beginner() -> Self {
        Self::with_mode(GameMode::Beginner)
    }

    pub fn intermediate() -> Self {
        Self::with_mode(GameMode::Intermediate)
    }

    pub fn expert() -> Self {
        Self::with_mode(GameMode::Expert)
    }

    /// A custom game. `width` and `height` are the real dimensions (1 to 255);
    /// `mines` must not exceed the cell count.
    pub fn custom(width: u16, height: u16, mines: u16) -> Self {
        let mut b = Self::with_mode(GameMode::Custom);
        b.custom = Some(((width - 1) as u8, (height - 1) as u8, mines));
        b.custom_dimensions = format!("W{width}H{height}M{mines}");
        b.scattered_mines(width, height, mines)
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Override the raw mode byte (mode code plus two).
    pub fn mode_byte(mut self, byte: u8) -> Self {
        self.mode_byte = byte;
        self
    }

    /// 0-based mine coordinates, at most 254 each.
    pub fn mines(mut self, mines: &[(u8, u8)]) -> Self {
        self.mines = mines.to_vec();
        self
    }

    /// Place the first `count` cells of a `width`-wide board in a
    /// deterministic scatter with no repeats.
    pub fn scattered_mines(mut self, width: u16, height: u16, count: u16) -> Self {
        let cells = width as usize * height as usize;
        let stride = (1..cells.max(2))
            .rev()
            .find(|s| gcd(*s, cells) == 1)
            .unwrap_or(1);
        self.mines = (0..count as usize)
            .map(|i| {
                let cell = (i * stride) % cells;
                ((cell / width as usize) as u8, (cell % width as usize) as u8)
            })
            .collect();
        self
    }

    pub fn question_marks(mut self, enabled: bool) -> Self {
        self.control_byte = if enabled {
            QUESTION_MARKS_ON
        } else {
            QUESTION_MARKS_OFF
        };
        self
    }

    /// Write an arbitrary byte where the question-mark flag belongs.
    pub fn control_byte(mut self, byte: u8) -> Self {
        self.control_byte = byte;
        self
    }

    pub fn custom_dimensions(mut self, dims: &str) -> Self {
        self.custom_dimensions = dims.into();
        self
    }

    pub fn timestamp(mut self, ts: &str) -> Self {
        self.timestamp = ts.into();
        self
    }

    /// 3BV and time as they appear in the file, e.g. `(123, "45.67")`.
    pub fn score(self, bbbv: u32, time: &str) -> Self {
        self.score_text(format!("B{bbbv}T{time}]").as_bytes())
    }

    /// Raw score text from `B` through `]`.
    pub fn score_text(mut self, text: &[u8]) -> Self {
        self.score_text = text.to_vec();
        self
    }

    /// Replace the event list. The list must not be empty, and the first
    /// event must be at 0 seconds with `x < 512` (and `x < 256` when its
    /// mouse code is 0 or 1) so the stream sentinel lines up with it.
    pub fn events(mut self, events: &[RawEvent]) -> Self {
        self.events = events.iter().map(RawEvent::encode).collect();
        self
    }

    /// Append a `key: value` line to the trailer.
    pub fn pair(mut self, key: &str, value: &str) -> Self {
        self.pairs.push(format!("{key}:{value}\r").into_bytes());
        self
    }

    /// Append a raw trailer line (CR added).
    pub fn raw_line(mut self, line: &[u8]) -> Self {
        let mut bytes = line.to_vec();
        bytes.push(b'\r');
        self.pairs.push(bytes);
        self
    }

    pub fn player(mut self, name: &str) -> Self {
        self.player = name.into();
        self
    }

    pub fn program(mut self, program: &str) -> Self {
        self.program = program.into();
        self
    }

    /// Version text starting with the `0` that ends the program name.
    pub fn version_text(mut self, text: &[u8]) -> Self {
        self.version_text = text.to_vec();
        self
    }

    /// Assemble the file.
    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![self.version];
        out.extend_from_slice(&[0; RESERVED_LEN]);
        out.push(self.mode_byte);
        if let Some((w, h, m)) = self.custom {
            out.extend_from_slice(&[w, h]);
            out.extend_from_slice(&m.to_be_bytes());
        }
        for &(row, col) in &self.mines {
            out.extend_from_slice(&[row + 1, col + 1]);
        }

        // Flag, one pad byte, '[', level digit, '|'.
        let level = b'0' + self.mode_byte.wrapping_sub(MODE_BIAS) % 10;
        out.extend_from_slice(&[self.control_byte, 0, b'[', level, b'|']);
        if self.custom.is_some() {
            out.extend_from_slice(self.custom_dimensions.as_bytes());
            out.push(b'|');
        }
        out.extend_from_slice(self.timestamp.as_bytes());
        out.push(b'|');
        out.extend_from_slice(b"14.10.2012 19:31:20|");
        out.extend_from_slice(&self.score_text);

        // Pad that can never complete the event sentinel on its own.
        out.extend_from_slice(&[2, 2, 2]);
        let first = self.events.first().expect("a recording holds at least one event");
        let aligned = first[2] == 1 && first[1] <= 1 && !(first[1] == 1 && first[0] <= 1);
        assert!(aligned, "first event does not line up with the stream sentinel");
        for record in &self.events {
            out.extend_from_slice(record);
        }
        out.extend_from_slice(&[0; 8]);

        out.extend_from_slice(b"\x00\x00");
        out.extend_from_slice(&TRAILER_MARKER);
        out.extend_from_slice(&[b'#'; CS_FILLER_LEN]);
        for line in &self.pairs {
            out.extend_from_slice(line);
        }
        out.extend_from_slice(self.player.as_bytes());
        out.push(b'\r');
        out.extend_from_slice(self.program.as_bytes());
        out.extend_from_slice(&self.version_text);
        out
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
