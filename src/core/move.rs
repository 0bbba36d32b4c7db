use super::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clear the inclusive column span `start..=end` of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

impl Move {
    pub fn new(row: usize, start: usize, end: usize) -> Self {
        Move { row, start, end }
    }

    /// Parses terminal input such as `2, 0, 2`, `2, [0, 2]` or `2 0 2`.
    pub fn parse(input: &str) -> Result<Move, GameError> {
        let format_error = || GameError::Format {
            input: input.trim().to_string(),
        };

        let cleaned = input.replace(['[', ']', '(', ')'], " ");
        let numbers = cleaned
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<usize>().map_err(|_| format_error()))
            .collect::<Result<Vec<_>, _>>()?;

        match numbers.as_slice() {
            &[row, start, end] => Ok(Move::new(row, start, end)),
            _ => Err(format_error()),
        }
    }

    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "row {} [{}, {}]", self.row, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_terminal_formats() {
        assert_eq!(Move::parse("2, 0, 2").unwrap(), Move::new(2, 0, 2));
        assert_eq!(Move::parse("2, [0, 2]").unwrap(), Move::new(2, 0, 2));
        assert_eq!(Move::parse("  1 3 4\n").unwrap(), Move::new(1, 3, 4));
        assert_eq!(Move::parse("(0,0,0)").unwrap(), Move::new(0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for bad in ["", "1, 2", "1, 2, 3, 4", "a, b, c", "1, -2, 3", "1.5, 2, 3"] {
            match Move::parse(bad) {
                Err(GameError::Format { .. }) => {}
                other => panic!("expected format error for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::new(3, 1, 4).to_string(), "row 3 [1, 4]");
    }
}
