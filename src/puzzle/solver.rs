// vim: set ai et ts=4 sw=4 sts=4:
use log::{debug, info};
use super::{Error, Puzzle};
use super::super::util::Axis;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Outcome {
    // every square is determined
    Solved,
    // fixpoint reached with undetermined squares left; the puzzle needs
    // more than line-by-line deduction (or has no unique solution)
    Stalled,
}

#[derive(Debug)]
pub struct Report {
    pub outcome: Outcome,
    pub rounds: usize,
    pub cells_changed: usize,
}

/// Fixpoint driver over the puzzle's lines. Each axis carries one dirty flag
/// per line, all set at the start so that every line is visited at least
/// once; solving a line clears its flag, and every square it changes sets the
/// flag of the perpendicular line through that square. Done when a full round
/// leaves both axes clean.
pub struct Solver {
    pub puzzle: Puzzle,
    dirty_rows: Vec<bool>,
    dirty_cols: Vec<bool>,
    rounds: usize,
    cells_changed: usize,
}

impl Solver {
    pub fn new(puzzle: Puzzle) -> Self {
        let dirty_rows = vec![true; puzzle.height()];
        let dirty_cols = vec![true; puzzle.width()];
        Solver {
            puzzle,
            dirty_rows,
            dirty_cols,
            rounds: 0,
            cells_changed: 0,
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn is_done(&self) -> bool {
        !self.dirty_rows.iter().any(|&d| d) && !self.dirty_cols.iter().any(|&d| d)
    }

    pub fn outcome(&self) -> Outcome {
        match self.puzzle.is_fully_known() {
            true  => Outcome::Solved,
            false => Outcome::Stalled,
        }
    }

    pub fn report(&self) -> Report {
        Report {
            outcome: self.outcome(),
            rounds: self.rounds,
            cells_changed: self.cells_changed,
        }
    }

    /// One full pass over the dirty rows followed by one over the dirty
    /// columns. Returns the number of squares that changed.
    pub fn round(&mut self) -> Result<usize, Error> {
        self.rounds += 1;
        let mut changed = self.sweep(Axis::Row)?;
        changed += self.sweep(Axis::Column)?;
        self.cells_changed += changed;
        info!("round {}: {} squares settled, {} dirty rows / {} dirty columns remain",
              self.rounds,
              changed,
              self.dirty_rows.iter().filter(|&&d| d).count(),
              self.dirty_cols.iter().filter(|&&d| d).count());
        Ok(changed)
    }

    /// Drive rounds until neither axis has a dirty line left.
    pub fn run(&mut self) -> Result<Report, Error> {
        while !self.is_done() {
            self.round()?;
        }
        Ok(self.report())
    }

    fn sweep(&mut self, axis: Axis) -> Result<usize, Error> {
        let mut total = 0;
        for index in 0..self.puzzle.line_count(axis) {
            if !self.dirty(axis)[index] {
                continue;
            }
            self.dirty_mut(axis)[index] = false;

            let line = self.puzzle.get_line(axis, index)?;
            if line.is_settled() {
                continue;
            }
            let clue = self.puzzle.clue(axis, index).to_vec();
            let solved = line.solve(&clue);
            let changed = self.puzzle.merge_line(axis, index, &solved)?;
            debug!("{} {}: {} -> {} ({} squares settled)",
                   axis, index, line, solved, changed.len());

            // each changed square may unlock the line crossing it
            for &at in &changed {
                self.dirty_mut(axis.perpendicular())[at] = true;
            }
            total += changed.len();
        }
        Ok(total)
    }

    fn dirty(&self, axis: Axis) -> &[bool] {
        match axis {
            Axis::Row    => &self.dirty_rows,
            Axis::Column => &self.dirty_cols,
        }
    }
    fn dirty_mut(&mut self, axis: Axis) -> &mut Vec<bool> {
        match axis {
            Axis::Row    => &mut self.dirty_rows,
            Axis::Column => &mut self.dirty_cols,
        }
    }
}
