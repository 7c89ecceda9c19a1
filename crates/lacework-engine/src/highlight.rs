//! Replayable drawing instructions for step explanations.
//!
//! A committed step keeps no live references to grid or graph objects.
//! Its visual explanation is compiled down to a flat sequence of bit-packed
//! `u32` instructions that can be replayed against any [`Drawer`] later,
//! and serialized as hex for storage.

use std::fmt::Write as _;

use lacework_core::{Cell, CellPossibility};

use crate::graph::LinkStrength;

/// Semantic colors a drawer maps to its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StepColor {
    /// Background emphasis without meaning.
    Neutral = 0,
    /// A change applied by the step.
    Change = 1,
    /// An element assumed false along the causal pattern.
    CauseOff = 2,
    /// An element assumed true along the causal pattern.
    CauseOn = 3,
}

impl StepColor {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Change,
            2 => Self::CauseOff,
            3 => Self::CauseOn,
            _ => Self::Neutral,
        }
    }
}

/// The narrow rendering capability the engine draws explanations against.
///
/// The engine only ever produces calls into this trait; it never depends
/// on a concrete rendering technology.
pub trait Drawer {
    /// Fills the background of one candidate.
    fn highlight_possibility(&mut self, possibility: CellPossibility, color: StepColor);
    /// Fills the background of one cell.
    fn highlight_cell(&mut self, cell: Cell, color: StepColor);
    /// Encircles one candidate.
    fn encircle_possibility(&mut self, possibility: CellPossibility);
    /// Encircles one cell.
    fn encircle_cell(&mut self, cell: Cell);
    /// Draws a link between two candidates with the given strength tag.
    fn create_link(&mut self, from: CellPossibility, to: CellPossibility, strength: LinkStrength);
}

// Instruction layout, low to high: operand fields in 4-bit packets from
// bit 12 up, opcode in bits 24-28, color or link strength in bits 28-32.
const OP_HIGHLIGHT_POSSIBILITY: u32 = 0;
const OP_HIGHLIGHT_CELL: u32 = 1;
const OP_ENCIRCLE_POSSIBILITY: u32 = 2;
const OP_ENCIRCLE_CELL: u32 = 3;
// Opcode 4 is reserved for grouped-cell marks.
const OP_CREATE_LINK: u32 = 5;

/// A compiled, serializable sequence of drawing instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSequence {
    instructions: Vec<u32>,
}

impl HighlightSequence {
    /// Compiles drawing calls into a sequence.
    ///
    /// This is a pure function of the calls `f` makes against the
    /// compiler it is given.
    #[must_use]
    pub fn compile(f: impl FnOnce(&mut Compiler)) -> Self {
        let mut compiler = Compiler::default();
        f(&mut compiler);
        compiler.finish()
    }

    /// Returns the number of packed instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if the sequence draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Replays the sequence against `drawer`.
    ///
    /// Replay reads only the packed instructions; it has no effect on any
    /// model state.
    pub fn replay(&self, drawer: &mut dyn Drawer) {
        for &instruction in &self.instructions {
            let nibble = |shift: u32| (instruction >> shift) & 0xF;
            match nibble(24) {
                OP_HIGHLIGHT_POSSIBILITY => drawer.highlight_possibility(
                    CellPossibility::from_coords(
                        nibble(16) as u8,
                        nibble(12) as u8,
                        nibble(20) as u8,
                    ),
                    StepColor::from_bits(nibble(28)),
                ),
                OP_HIGHLIGHT_CELL => drawer.highlight_cell(
                    Cell::new(nibble(16) as u8, nibble(12) as u8),
                    StepColor::from_bits(nibble(28)),
                ),
                OP_ENCIRCLE_POSSIBILITY => drawer.encircle_possibility(
                    CellPossibility::from_coords(
                        nibble(16) as u8,
                        nibble(12) as u8,
                        nibble(20) as u8,
                    ),
                ),
                OP_ENCIRCLE_CELL => {
                    drawer.encircle_cell(Cell::new(nibble(16) as u8, nibble(12) as u8));
                }
                OP_CREATE_LINK => drawer.create_link(
                    CellPossibility::from_coords(
                        nibble(16) as u8,
                        nibble(12) as u8,
                        nibble(20) as u8,
                    ),
                    CellPossibility::from_coords(
                        nibble(4) as u8,
                        nibble(0) as u8,
                        nibble(8) as u8,
                    ),
                    LinkStrength::from_bits(nibble(28)),
                ),
                _ => debug_assert!(false, "unknown highlight opcode"),
            }
        }
    }

    /// Serializes the sequence as eight hex digits per instruction.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut result = String::with_capacity(self.instructions.len() * 8);
        for instruction in &self.instructions {
            let _ = write!(result, "{instruction:08x}");
        }
        result
    }

    /// Parses a hex serialization. Trailing partial instructions are
    /// dropped.
    #[must_use]
    pub fn from_hex(s: &str) -> Self {
        let bytes = s.as_bytes();
        let instructions = bytes
            .chunks_exact(8)
            .filter_map(|chunk| {
                let text = std::str::from_utf8(chunk).ok()?;
                u32::from_str_radix(text, 16).ok()
            })
            .collect();
        Self { instructions }
    }
}

/// A [`Drawer`] that packs every call into instructions.
#[derive(Debug, Default)]
pub struct Compiler {
    instructions: Vec<u32>,
}

impl Compiler {
    /// Returns the compiled sequence.
    #[must_use]
    pub fn finish(self) -> HighlightSequence {
        HighlightSequence {
            instructions: self.instructions,
        }
    }
}

impl Drawer for Compiler {
    fn highlight_possibility(&mut self, possibility: CellPossibility, color: StepColor) {
        self.instructions.push(
            (color as u32) << 28
                | OP_HIGHLIGHT_POSSIBILITY << 24
                | u32::from(possibility.digit) << 20
                | u32::from(possibility.cell.row) << 16
                | u32::from(possibility.cell.col) << 12,
        );
    }

    fn highlight_cell(&mut self, cell: Cell, color: StepColor) {
        self.instructions.push(
            (color as u32) << 28
                | OP_HIGHLIGHT_CELL << 24
                | u32::from(cell.row) << 16
                | u32::from(cell.col) << 12,
        );
    }

    fn encircle_possibility(&mut self, possibility: CellPossibility) {
        self.instructions.push(
            OP_ENCIRCLE_POSSIBILITY << 24
                | u32::from(possibility.digit) << 20
                | u32::from(possibility.cell.row) << 16
                | u32::from(possibility.cell.col) << 12,
        );
    }

    fn encircle_cell(&mut self, cell: Cell) {
        self.instructions
            .push(OP_ENCIRCLE_CELL << 24 | u32::from(cell.row) << 16 | u32::from(cell.col) << 12);
    }

    fn create_link(&mut self, from: CellPossibility, to: CellPossibility, strength: LinkStrength) {
        self.instructions.push(
            strength.to_bits() << 28
                | OP_CREATE_LINK << 24
                | u32::from(from.digit) << 20
                | u32::from(from.cell.row) << 16
                | u32::from(from.cell.col) << 12
                | u32::from(to.digit) << 8
                | u32::from(to.cell.row) << 4
                | u32::from(to.cell.col),
        );
    }
}
