use crate::core::{Board, Move, PlayerId};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::fmt;
use std::io::{self, stdout, Write};

pub const TOKEN: &str = " X ";
pub const EMPTY: &str = " O ";

/// Plain dump of the grid: one line per row, top row first, three-character
/// cells.
pub fn render_text(board: &Board) -> String {
    board
        .grid()
        .iter()
        .map(|row| {
            row.iter()
                .map(|&cell| if cell == 1 { TOKEN } else { EMPTY })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&render_text(self))
    }
}

#[derive(Default)]
pub struct DisplayState {
    pub status_msg: Option<String>,
    pub last_move: Option<Move>,
    pub highlights: Vec<Move>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

fn in_span(mv: &Move, row: usize, col: usize) -> bool {
    mv.row == row && (mv.start..=mv.end).contains(&col)
}

/// Clears the screen and draws the board with row and column labels.
pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Nimm ===\r\n")?;
    if let Some(msg) = &state.status_msg {
        write!(out, "{}\r\n", msg.clone().bold().yellow())?;
    } else {
        write!(out, "\r\n")?;
    }
    write!(out, "\r\n")?;

    // 列ラベル
    write!(out, "    ")?;
    for col in 0..board.num_columns() {
        write!(out, "{:^3}", col)?;
    }
    write!(out, "\r\n")?;

    for (row, cells) in board.grid().iter().enumerate() {
        write!(out, "{:2} |", row)?;
        for (col, &cell) in cells.iter().enumerate() {
            let glyph = if cell == 1 { TOKEN } else { EMPTY };
            let is_last = state.last_move.map_or(false, |mv| in_span(&mv, row, col));
            let is_highlight = state.highlights.iter().any(|mv| in_span(mv, row, col));

            if is_highlight {
                write!(out, "{}", glyph.green())?;
            } else if is_last {
                write!(out, "{}", glyph.red())?;
            } else if cell == 1 {
                write!(out, "{}", glyph.cyan())?;
            } else {
                write!(out, "{}", glyph.dark_grey())?;
            }
        }
        write!(out, "|\r\n")?;
    }
    write!(out, "\r\n")?;
    out.flush()
}

pub fn turn_message(player: PlayerId, name: &str) -> String {
    format!("{}'s turn ({})", name, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_layout() {
        let board = Board::new(2).unwrap();
        assert_eq!(render_text(&board), " X  O  O \n X  X  X ");
        assert_eq!(board.to_string(), render_text(&board));
    }

    #[test]
    fn test_render_text_tracks_moves() {
        let mut board = Board::new(3).unwrap();
        board.push(Move::new(2, 1, 3)).unwrap();
        let text = render_text(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], " X  O  O  O  X ");
        assert!(lines.iter().all(|l| l.len() == 3 * board.num_columns()));
    }

    #[test]
    fn test_in_span() {
        let mv = Move::new(1, 2, 4);
        assert!(in_span(&mv, 1, 2));
        assert!(in_span(&mv, 1, 4));
        assert!(!in_span(&mv, 1, 5));
        assert!(!in_span(&mv, 0, 3));
    }
}
