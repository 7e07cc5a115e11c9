// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

pub use self::solver::consensus;

use std::fmt;
use super::grid::Cell;
use super::util::Axis;

/// An ephemeral copy of one row or column, the unit of solving. A Line never
/// aliases the grid's storage: it is copied out of the puzzle, worked on in
/// isolation, and explicitly merged back.
#[derive(PartialEq, Clone, Debug)]
pub struct Line {
    pub axis:  Axis,
    pub index: usize,
    pub cells: Vec<Cell>,
}

impl Line {
    pub fn new(axis: Axis, index: usize, cells: Vec<Cell>) -> Self {
        Line { axis, index, cells }
    }

    /// A fresh line of the given length with every square undetermined.
    pub fn unknown(axis: Axis, index: usize, length: usize) -> Self {
        Line {
            axis,
            index,
            cells: vec![Cell::Unknown; length],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn get(&self, at: usize) -> Cell {
        self.cells[at]
    }
    pub fn set(&mut self, at: usize, cell: Cell) {
        self.cells[at] = cell;
    }

    /// A line with no undetermined squares left has nothing more to yield.
    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|c| c.is_known())
    }
}

impl fmt::Display for Line {
    // '.' undetermined, '+' filled in, '-' crossed out
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", match cell {
                Cell::Unknown    => '.',
                Cell::FilledIn   => '+',
                Cell::CrossedOut => '-',
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Line {
    // inverse of the Display mapping, for building test fixtures
    pub fn parse(pattern: &str) -> Line {
        let cells = pattern.chars()
                           .map(|ch| match ch {
                               '.' => Cell::Unknown,
                               '+' => Cell::FilledIn,
                               '-' => Cell::CrossedOut,
                               _   => panic!("unexpected pattern character {:?}", ch),
                           })
                           .collect();
        Line::new(Axis::Row, 0, cells)
    }
}
