//! Text formats for grids: line, multi-line ASCII and base-32.
//!
//! All functions are pure. Parsing is lenient: malformed input yields a
//! blank grid (or the cells decoded so far) instead of an error, so a
//! caller can always re-prompt with whatever state came through.

use crate::{
    candidates::CandidateSet,
    cell::Cell,
    grid::Grid,
    state::{CellContent, SolvingState},
};

/// The three text formats understood by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// One character or shortcut per cell, row-major.
    Line,
    /// Multi-line ASCII grid with box separators.
    Grid,
    /// 162 characters, two 5-bit chunks per cell.
    Base32,
}

/// How the line format renders empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyCellStyle {
    /// Runs longer than three cells become `s<n>s`, shorter runs spaces.
    Shortcuts,
    /// Every empty cell is a `0`.
    Zeros,
    /// Every empty cell is a `.`.
    Points,
}

/// The two 5-bit alphabets accepted by the base-32 format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base32Alphabet {
    /// `A`-`Z` then `2`-`7`.
    Rfc4648,
    /// `0`-`9` then `a`-`w`.
    Alphabetical,
}

impl Base32Alphabet {
    fn decode(self, c: char) -> u16 {
        match self {
            Self::Rfc4648 => match c {
                'A'..='Z' => c as u16 - 'A' as u16,
                '2'..='7' => c as u16 - '2' as u16 + 26,
                _ => 0,
            },
            Self::Alphabetical => match c {
                '0'..='9' => c as u16 - '0' as u16,
                'a'..='w' => c as u16 - 'a' as u16 + 10,
                _ => 0,
            },
        }
    }

    fn encode(self, chunk: u16) -> char {
        debug_assert!(chunk < 32);
        match self {
            Self::Rfc4648 => {
                if chunk < 26 {
                    (b'A' + chunk as u8) as char
                } else {
                    (b'2' + (chunk - 26) as u8) as char
                }
            }
            Self::Alphabetical => {
                if chunk < 10 {
                    (b'0' + chunk as u8) as char
                } else {
                    (b'a' + (chunk - 10) as u8) as char
                }
            }
        }
    }
}

/// Guesses which format `s` is written in.
///
/// A newline means the grid format, exactly 162 characters mean base-32,
/// anything else is the line format.
#[must_use]
pub fn guess_format(s: &str) -> TextFormat {
    if s.contains('\n') {
        return TextFormat::Grid;
    }
    if s.chars().count() == 162 {
        TextFormat::Base32
    } else {
        TextFormat::Line
    }
}

/// Formats the placed digits of `grid` in the line format.
#[must_use]
pub fn format_line(grid: &Grid, style: EmptyCellStyle) -> String {
    let mut result = String::new();
    let mut void_count = 0_usize;
    for cell in Cell::all() {
        let digit = grid.get(cell);
        if digit == 0 {
            match style {
                EmptyCellStyle::Shortcuts => void_count += 1,
                EmptyCellStyle::Zeros => result.push('0'),
                EmptyCellStyle::Points => result.push('.'),
            }
        } else {
            if void_count != 0 {
                if void_count > 3 {
                    result.push_str(&format!("s{void_count}s"));
                } else {
                    result.push_str(&" ".repeat(void_count));
                }
                void_count = 0;
            }
            result.push(char::from(b'0' + digit));
        }
    }
    result
}

/// Parses the line format.
///
/// `0`, `.` and space are empty cells; `s<n>s` skips `n` cells. Anything
/// unparseable yields a blank grid. Input shorter than 81 cells leaves the
/// remaining cells empty, excess input is ignored.
#[must_use]
pub fn parse_line(s: &str) -> Grid {
    let mut grid = Grid::new();
    let mut n = 0_usize;
    let mut counting = false;
    let mut buffer = String::new();

    for c in s.chars() {
        if n >= 81 {
            break;
        }
        match c {
            's' if counting => {
                let Ok(skip) = buffer.parse::<usize>() else {
                    return Grid::new();
                };
                n += skip;
                buffer.clear();
                counting = false;
            }
            's' => counting = true,
            ' ' | '.' | '0' if !counting => n += 1,
            _ if counting => buffer.push(c),
            '1'..='9' => {
                grid.set(Cell::new((n / 9) as u8, (n % 9) as u8), c as u8 - b'0');
                n += 1;
            }
            _ => return Grid::new(),
        }
    }
    grid
}

/// Formats a solving state as a multi-line ASCII grid.
///
/// Solved cells render as `<d>`, empty cells as their candidate digits;
/// every column is padded to the widest cell and boxes are separated by
/// `+---+` rules.
#[must_use]
pub fn format_grid(state: &SolvingState) -> String {
    let mut max_width = 0_usize;
    for cell in Cell::all() {
        let width = match state.get(cell) {
            CellContent::Solved(_) => 3,
            CellContent::Candidates(set) => set.len(),
        };
        max_width = max_width.max(width);
    }

    let mut result = String::new();
    let rule = |result: &mut String| {
        for i in 0..9 {
            result.push(if i % 3 == 0 { '+' } else { '-' });
            result.push_str(&"-".repeat(max_width));
        }
        result.push_str("+\n");
    };

    for row in 0..9 {
        if row % 3 == 0 {
            rule(&mut result);
        }
        for col in 0..9 {
            result.push(if col % 3 == 0 { '|' } else { ' ' });
            let text = match state.get(Cell::new(row, col)) {
                CellContent::Solved(digit) => format!("<{digit}>"),
                CellContent::Candidates(set) => set.to_string(),
            };
            result.push_str(&text);
            result.push_str(&" ".repeat(max_width - text.chars().count()));
        }
        result.push_str("|\n");
    }
    rule(&mut result);
    result
}

/// Parses the multi-line ASCII grid format.
///
/// `<d>` is a placed digit, a run of digits is a candidate set. With
/// `solo_to_given`, a single-candidate cell parses as placed. Cells that
/// never appear stay blank.
#[must_use]
pub fn parse_grid(s: &str, solo_to_given: bool) -> SolvingState {
    let mut state = SolvingState::blank();
    let mut pos = 0_usize;
    let mut placed: Option<u8> = None;
    let mut is_placed = false;
    let mut candidates: Option<CandidateSet> = None;

    for c in s.chars().chain(std::iter::once(' ')) {
        if pos >= 81 {
            break;
        }
        if c == '<' {
            is_placed = true;
        }
        if let Some(digit) = c.to_digit(10) {
            let digit = digit as u8;
            if digit == 0 {
                continue;
            }
            if is_placed {
                placed = Some(digit);
            } else {
                let mut set = candidates.unwrap_or_default();
                set.insert(digit);
                candidates = Some(set);
            }
        } else {
            let cell = Cell::new((pos / 9) as u8, (pos % 9) as u8);
            if let (true, Some(digit)) = (is_placed, placed) {
                state.set(cell, CellContent::Solved(digit));
                is_placed = false;
                placed = None;
                pos += 1;
            } else if let Some(set) = candidates {
                let content = match set.first() {
                    Some(solo) if solo_to_given && set.len() == 1 => CellContent::Solved(solo),
                    _ => CellContent::Candidates(set),
                };
                state.set(cell, content);
                candidates = None;
                pos += 1;
            }
        }
    }
    state
}

/// Formats a solving state in the dense base-32 format.
///
/// Each cell becomes a 10-bit word: bit 0 is the solved flag, and either
/// the candidate mask or the solved digit's bit occupies bits 1 through 9.
/// The word is emitted high chunk first.
#[must_use]
pub fn format_base32(state: &SolvingState, alphabet: Base32Alphabet) -> String {
    let mut result = String::with_capacity(162);
    for cell in Cell::all() {
        let bits = match state.get(cell) {
            CellContent::Solved(digit) => (1_u16 << digit) | 1,
            CellContent::Candidates(set) => set.bits(),
        };
        result.push(alphabet.encode((bits >> 5) & 0x1F));
        result.push(alphabet.encode(bits & 0x1F));
    }
    result
}

/// Parses the dense base-32 format.
///
/// Cells beyond the end of the input stay blank; unknown characters decode
/// as zero chunks.
#[must_use]
pub fn parse_base32(s: &str, alphabet: Base32Alphabet) -> SolvingState {
    let mut state = SolvingState::blank();
    let chars: Vec<char> = s.chars().collect();
    for (i, pair) in chars.chunks_exact(2).take(81).enumerate() {
        let bits = alphabet.decode(pair[0]) << 5 | alphabet.decode(pair[1]);
        let cell = Cell::new((i / 9) as u8, (i % 9) as u8);
        let set = CandidateSet::from_bits(bits & !1);
        let content = if bits & 1 != 0 {
            match set.first() {
                Some(digit) => CellContent::Solved(digit),
                None => CellContent::Candidates(CandidateSet::EMPTY),
            }
        } else {
            CellContent::Candidates(set)
        };
        state.set(cell, content);
    }
    state
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const PUZZLE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format(PUZZLE), TextFormat::Line);
        assert_eq!(guess_format("|123|456|\n"), TextFormat::Grid);
        assert_eq!(guess_format(&"A".repeat(162)), TextFormat::Base32);
    }

    #[test]
    fn test_parse_line_basics() {
        let grid = parse_line(PUZZLE);
        assert_eq!(grid.get(Cell::new(0, 0)), 5);
        assert_eq!(grid.get(Cell::new(0, 1)), 3);
        assert_eq!(grid.get(Cell::new(0, 2)), 0);
        assert_eq!(grid.get(Cell::new(8, 8)), 9);
        assert_eq!(grid.placed_count(), 30);
    }

    #[test]
    fn test_parse_line_shortcuts() {
        let grid = parse_line("s12s5");
        assert_eq!(grid.get(Cell::new(1, 3)), 5);
        assert_eq!(grid.placed_count(), 1);
    }

    #[test]
    fn test_parse_line_malformed() {
        assert_eq!(parse_line("12x45"), Grid::new());
        assert_eq!(parse_line("sxs1"), Grid::new());
    }

    #[test]
    fn test_format_line_styles() {
        let mut grid = Grid::new();
        grid.set(Cell::new(0, 0), 5);
        grid.set(Cell::new(0, 2), 3);
        assert_eq!(format_line(&grid, EmptyCellStyle::Points), "5.3".to_owned() + &".".repeat(78));
        assert_eq!(format_line(&grid, EmptyCellStyle::Zeros), "503".to_owned() + &"0".repeat(78));
        // Trailing empty run is dropped in shortcut style
        assert_eq!(format_line(&grid, EmptyCellStyle::Shortcuts), "5 3");
    }

    #[test]
    fn test_line_round_trip() {
        let grid = parse_line(PUZZLE);
        assert_eq!(format_line(&grid, EmptyCellStyle::Points), PUZZLE.replace('0', "."));
        assert_eq!(parse_line(&format_line(&grid, EmptyCellStyle::Shortcuts)), grid);
    }

    #[test]
    fn test_grid_format_round_trip() {
        let state = SolvingState::from_grid(&parse_line(PUZZLE));
        let text = format_grid(&state);
        assert_eq!(parse_grid(&text, false), state);
    }

    #[test]
    fn test_base32_round_trip() {
        let state = SolvingState::from_grid(&parse_line(PUZZLE));
        for alphabet in [Base32Alphabet::Rfc4648, Base32Alphabet::Alphabetical] {
            let text = format_base32(&state, alphabet);
            assert_eq!(text.chars().count(), 162);
            assert_eq!(guess_format(&text), TextFormat::Base32);
            assert_eq!(parse_base32(&text, alphabet), state);
        }
    }

    proptest! {
        #[test]
        fn line_round_trips_for_any_grid(digits in proptest::collection::vec(0_u8..=9, 81)) {
            let mut grid = Grid::new();
            for (i, &digit) in digits.iter().enumerate() {
                if digit != 0 {
                    grid.set(Cell::new((i / 9) as u8, (i % 9) as u8), digit);
                }
            }
            let text = format_line(&grid, EmptyCellStyle::Points);
            prop_assert_eq!(parse_line(&text), grid);
            let text = format_line(&grid, EmptyCellStyle::Shortcuts);
            prop_assert_eq!(parse_line(&text), grid);
        }

        #[test]
        fn base32_round_trips_for_any_state(masks in proptest::collection::vec(0_u16..1 << 9, 81)) {
            let mut state = SolvingState::blank();
            for (i, &mask) in masks.iter().enumerate() {
                let cell = Cell::new((i / 9) as u8, (i % 9) as u8);
                state.set(cell, CellContent::Candidates(CandidateSet::from_bits(mask << 1)));
            }
            let text = format_base32(&state, Base32Alphabet::Rfc4648);
            prop_assert_eq!(parse_base32(&text, Base32Alphabet::Rfc4648), state);
        }
    }
}
