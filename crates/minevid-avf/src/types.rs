//! Data types produced by the decoder.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Board-size preset recorded in the header.
///
/// # Examples
///
/// ```
/// use minevid_avf::GameMode;
///
/// let layout = GameMode::Expert.standard_layout().unwrap();
/// assert_eq!((layout.width, layout.height, layout.mines), (30, 16, 99));
/// assert!(GameMode::Custom.standard_layout().is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum GameMode {
    /// 8×8 with 10 mines.
    Beginner,
    /// 16×16 with 40 mines.
    Intermediate,
    /// 30×16 with 99 mines.
    Expert,
    /// Dimensions and mine count stored in the header.
    Custom,
}

impl GameMode {
    /// Map a mode code (raw header byte minus two) onto a mode.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Beginner),
            2 => Some(Self::Intermediate),
            3 => Some(Self::Expert),
            4 => Some(Self::Custom),
            _ => None,
        }
    }

    /// The mode code as stored in the header, before the `+2` bias.
    pub fn code(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Expert => 3,
            Self::Custom => 4,
        }
    }

    /// Fixed dimensions for the standard presets; `None` for custom games.
    pub fn standard_layout(self) -> Option<BoardLayout> {
        match self {
            Self::Beginner => Some(BoardLayout {
                width: 8,
                height: 8,
                mines: 10,
            }),
            Self::Intermediate => Some(BoardLayout {
                width: 16,
                height: 16,
                mines: 40,
            }),
            Self::Expert => Some(BoardLayout {
                width: 30,
                height: 16,
                mines: 99,
            }),
            Self::Custom => None,
        }
    }
}

/// Board dimensions and mine count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BoardLayout {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
    /// Number of mines.
    pub mines: u16,
}

impl BoardLayout {
    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Row-major mine-presence grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MineGrid {
    width: u16,
    height: u16,
    cells: Vec<bool>,
}

impl MineGrid {
    /// An empty grid of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Whether the 0-based cell holds a mine. Out-of-range cells do not.
    pub fn is_mine(&self, row: usize, col: usize) -> bool {
        self.index(row, col)
            .map(|i| self.cells[i])
            .unwrap_or(false)
    }

    /// Place a mine on a 0-based cell. Returns `false` if the cell lies
    /// outside the grid.
    pub fn place(&mut self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = true;
                true
            }
            None => false,
        }
    }

    /// Number of mined cells.
    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// The flat row-major cell array.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height as usize && col < self.width as usize {
            Some(row * self.width as usize + col)
        } else {
            None
        }
    }
}

/// One recorded mouse sample.
///
/// # Examples
///
/// ```
/// use minevid_avf::EventSample;
///
/// // mouse, x_hi, sec_lo, x_lo, hundredths, y_hi, sec_hi, y_lo
/// let sample = EventSample::decode(&[3, 1, 6, 44, 25, 0, 0, 90]).unwrap();
/// assert_eq!(sample.x, 300);
/// assert_eq!(sample.y, 90);
/// assert_eq!(sample.seconds, 5);
/// assert_eq!(sample.time_ms(), 5250);
///
/// // A stored seconds value of zero is the stream terminator.
/// assert!(EventSample::decode(&[0; 8]).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EventSample {
    /// Raw mouse state code.
    pub mouse: u8,
    /// Horizontal pixel position.
    pub x: u16,
    /// Vertical pixel position.
    pub y: u16,
    /// Elapsed whole seconds.
    pub seconds: u16,
    /// Hundredths of a second, 0 to 99.
    pub hundredths: u8,
}

impl EventSample {
    /// Decode one 8-byte event record.
    ///
    /// Returns `None` when the reconstructed seconds value would be
    /// negative, which marks the end of the event stream.
    pub fn decode(record: &[u8; 8]) -> Option<Self> {
        let stored_seconds = u16::from_be_bytes([record[6], record[2]]);
        let seconds = stored_seconds.checked_sub(1)?;
        Some(Self {
            mouse: record[0],
            x: u16::from_be_bytes([record[1], record[3]]),
            y: u16::from_be_bytes([record[5], record[7]]),
            seconds,
            hundredths: record[4],
        })
    }

    /// Elapsed time of the sample in milliseconds.
    pub fn time_ms(&self) -> u32 {
        self.seconds as u32 * 1000 + self.hundredths as u32 * 10
    }
}

/// A fully decoded AVF replay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReplayRecord {
    /// Minor version of the recording program (52 for 0.52.x).
    pub version: u8,
    /// Board preset.
    pub mode: GameMode,
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
    /// Number of mines declared in the header.
    pub mine_count: u16,
    /// Mine layout.
    pub mine_grid: MineGrid,
    /// Whether question marks were enabled.
    pub question_marks: bool,
    /// Dimension string custom games store ahead of the timestamp.
    pub custom_dimensions: Option<String>,
    /// Start-of-game timestamp, verbatim. Its layout varies by version.
    pub start_timestamp: String,
    /// Bechtel's Board Benchmark Value as stored in the file.
    pub bbbv: u32,
    /// Elapsed whole seconds (stored value minus one).
    pub elapsed_seconds: i64,
    /// Elapsed hundredths.
    pub elapsed_hundredths: u32,
    /// Player name.
    pub player_name: String,
    /// Skin name (0.47 and later).
    pub skin: String,
    /// Recording program name.
    pub program: String,
    /// Character between the minor version and the suffix (`.` or space).
    pub version_spacer: char,
    /// Version suffix, e.g. `"3"` for 0.52.3 or `"demo3"` for 0.43 demo3.
    pub version_suffix: String,
    /// Every key/value pair of the trailing text section, in file order.
    pub properties: IndexMap<String, String>,
    /// Mouse samples in recording order.
    pub events: Vec<EventSample>,
}

impl ReplayRecord {
    /// Board dimensions and mine count.
    pub fn layout(&self) -> BoardLayout {
        BoardLayout {
            width: self.width,
            height: self.height,
            mines: self.mine_count,
        }
    }

    /// Human-readable program version, e.g. `"0.52.3"` or `"0.43 demo3"`.
    pub fn version_string(&self) -> String {
        if self.version_suffix.trim().is_empty() {
            format!("0.{}", self.version)
        } else {
            format!(
                "0.{}{}{}",
                self.version, self.version_spacer, self.version_suffix
            )
        }
    }

    /// Elapsed time in seconds, hundredths included.
    pub fn score_time(&self) -> f64 {
        self.elapsed_seconds as f64 + self.elapsed_hundredths as f64 / 100.0
    }

    /// The `Realtime` property, when present and numeric.
    pub fn realtime(&self) -> Option<f64> {
        self.properties
            .get("Realtime")
            .and_then(|v| v.trim().replace(',', ".").parse().ok())
    }

    /// 3BV per second, or `None` when the elapsed time is not positive.
    pub fn bbbv_per_second(&self) -> Option<f64> {
        let time = self.score_time();
        (time > 0.0).then(|| self.bbbv as f64 / time)
    }

    /// Whether the 0-based cell holds a mine.
    pub fn is_mine(&self, row: usize, col: usize) -> bool {
        self.mine_grid.is_mine(row, col)
    }
}
