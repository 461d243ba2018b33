//! Board phase: mine coordinate pairs.
//!
//! The header's mine count is followed by exactly that many
//! `[row u8] [col u8]` pairs, both 1-based.

use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::error::{ErrorKind, ParseError, Phase};
use crate::types::{BoardLayout, MineGrid};

/// Read `layout.mines` coordinate pairs into a fresh grid.
///
/// Coordinates are trusted by the format. A pair that falls outside the
/// board is skipped with a warning, or rejected when
/// [`DecoderConfig::strict_mine_bounds`] is set.
pub fn decode_board(
    cursor: &mut ByteCursor<'_>,
    layout: &BoardLayout,
    config: &DecoderConfig,
) -> Result<MineGrid, ParseError> {
    cursor.set_phase(Phase::Board);

    let mut grid = MineGrid::new(layout.width, layout.height);
    for _ in 0..layout.mines {
        let pair_offset = cursor.position();
        let row = cursor.next_byte()?;
        let col = cursor.next_byte()?;

        let placed = match (row.checked_sub(1), col.checked_sub(1)) {
            (Some(r), Some(c)) => grid.place(r as usize, c as usize),
            _ => false,
        };
        if !placed {
            if config.strict_mine_bounds {
                return Err(cursor.error_at(ErrorKind::MineOutOfBounds { row, col }, pair_offset));
            }
            tracing::warn!(
                offset = pair_offset,
                "ignoring mine at row {row}, column {col} outside {}x{} board",
                layout.width,
                layout.height
            );
        }
    }
    Ok(grid)
}
