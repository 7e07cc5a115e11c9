// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

pub use self::solver::{Outcome, Report, Solver};

use std::fmt;
use std::convert::TryFrom;
use yaml_rust::Yaml;
use ansi_term::{ANSIString, Colour, Style};
use log::warn;

use super::grid::{Cell, Grid};
use super::line::Line;
use super::util::{lalign_colored, ralign, ralign_joined_coloreds, Axis};

#[derive(PartialEq, Debug)]
pub enum Error {
    // a clue table is empty, a clue holds no runs, or a run length is zero;
    // no board can be built from it
    InvalidClue(String),
    // line index outside the grid
    OutOfRange { axis: Axis, index: usize, len: usize },
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidClue(msg) =>
                write!(f, "invalid clue: {}", msg),
            Error::OutOfRange { axis, index, len } =>
                write!(f, "{} index {} is out of range (have {})", axis, index, len),
        }
    }
}

// ------------------------------------------------

/// The board: a width x height grid of cells plus the row and column clue
/// tables. Width and height are not stored; they are the clue table lengths.
/// The grid is mutated exclusively through merge_line.
#[derive(Debug)]
pub struct Puzzle {
    pub grid: Grid,
    pub row_clues: Vec<Vec<usize>>,
    pub col_clues: Vec<Vec<usize>>,
}

impl Puzzle {
    pub fn new(row_clues: Vec<Vec<usize>>, col_clues: Vec<Vec<usize>>)
        -> Result<Self, Error>
    {
        Self::validate(&row_clues, Axis::Row)?;
        Self::validate(&col_clues, Axis::Column)?;

        let row_total: usize = row_clues.iter().flatten().sum();
        let col_total: usize = col_clues.iter().flatten().sum();
        if row_total != col_total {
            // malformed, but still worth a best-effort attempt
            warn!("clue totals disagree: rows claim {} filled squares, columns claim {}",
                  row_total, col_total);
        }

        let grid = Grid::new(col_clues.len(), row_clues.len());
        Ok(Puzzle { grid, row_clues, col_clues })
    }

    fn validate(clues: &[Vec<usize>], axis: Axis) -> Result<(), Error> {
        if clues.is_empty() {
            return Err(Error::InvalidClue(format!("the {} clue table is empty", axis)));
        }
        for (index, clue) in clues.iter().enumerate() {
            if clue.is_empty() {
                return Err(Error::InvalidClue(format!("{} {} has no runs", axis, index)));
            }
            if clue.iter().any(|&run| run == 0) {
                return Err(Error::InvalidClue(format!("{} {} contains a zero-length run", axis, index)));
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize { self.col_clues.len() }
    pub fn height(&self) -> usize { self.row_clues.len() }

    pub fn line_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row    => self.height(),
            Axis::Column => self.width(),
        }
    }
    pub fn clue(&self, axis: Axis, index: usize) -> &[usize] {
        match axis {
            Axis::Row    => &self.row_clues[index],
            Axis::Column => &self.col_clues[index],
        }
    }

    fn check_index(&self, axis: Axis, index: usize) -> Result<(), Error> {
        let len = self.line_count(axis);
        if index >= len {
            return Err(Error::OutOfRange { axis, index, len });
        }
        Ok(())
    }

    /// Copy the requested row or column out of the grid.
    pub fn get_line(&self, axis: Axis, index: usize) -> Result<Line, Error> {
        self.check_index(axis, index)?;
        let cells = match axis {
            Axis::Row    => (0..self.width()).map(|x| self.grid.get(x, index)).collect(),
            Axis::Column => (0..self.height()).map(|y| self.grid.get(index, y)).collect(),
        };
        Ok(Line::new(axis, index, cells))
    }

    /// Copy a solved line back into the grid. Undetermined squares in the
    /// incoming line leave the grid untouched (a known square is never
    /// downgraded); everything else that differs is overwritten. Returns the
    /// positions along the line that actually changed.
    pub fn merge_line(&mut self, axis: Axis, index: usize, line: &Line)
        -> Result<Vec<usize>, Error>
    {
        self.check_index(axis, index)?;
        let mut changed = Vec::new();
        for at in 0..line.len() {
            let incoming = line.get(at);
            if incoming == Cell::Unknown {
                continue;
            }
            let (x, y) = match axis {
                Axis::Row    => (at, index),
                Axis::Column => (index, at),
            };
            let current = self.grid.get(x, y);
            if current == incoming {
                continue;
            }
            if current.is_known() {
                // can only happen when the deductions that produced this
                // line were fed inconsistent information
                warn!("{} {} flips square (col={}, row={}) from {} to {}",
                      axis, index, x, y, current.fmt_visual(), incoming.fmt_visual());
            }
            self.grid.set(x, y, incoming);
            changed.push(at);
        }
        Ok(changed)
    }

    pub fn line_is_settled(&self, axis: Axis, index: usize) -> bool {
        match axis {
            Axis::Row    => self.grid.squares[index].iter().all(|c| c.is_known()),
            Axis::Column => (0..self.height()).all(|y| self.grid.get(index, y).is_known()),
        }
    }

    /// No undetermined squares anywhere.
    pub fn is_fully_known(&self) -> bool {
        (0..self.height()).all(|y| self.line_is_settled(Axis::Row, y))
    }
}

// ------------------------------------------------
// construction from the two external puzzle encodings

impl Puzzle {
    /// Build a puzzle from the colon/comma descriptor pair used by the
    /// built-in catalog: runs separated by commas, lines by colons, e.g.
    /// "8:7,3:16" describes three lines [8], [7,3] and [16].
    pub fn from_descriptors(rows: &str, cols: &str) -> Result<Self, Error> {
        Puzzle::new(Self::parse_descriptor(rows)?, Self::parse_descriptor(cols)?)
    }

    fn parse_descriptor(description: &str) -> Result<Vec<Vec<usize>>, Error> {
        description.split(':')
                   .map(|line_desc| {
                       line_desc.split(',')
                                .map(|run| run.trim().parse::<usize>().map_err(|_| {
                                    Error::InvalidClue(format!("bad run length {:?} in descriptor", run))
                                }))
                                .collect()
                   })
                   .collect()
    }

    /// Build a puzzle from a YAML document with "rows" and "cols" lists whose
    /// entries are space-separated run strings or bare integers.
    pub fn from_yaml(doc: &Yaml) -> Result<Self, Error> {
        Puzzle::new(Self::parse_yaml_clues(&doc["rows"], Axis::Row)?,
                    Self::parse_yaml_clues(&doc["cols"], Axis::Column)?)
    }

    fn parse_yaml_clues(input: &Yaml, axis: Axis) -> Result<Vec<Vec<usize>>, Error> {
        let list = input.as_vec().ok_or_else(|| {
            Error::InvalidClue(format!("expected a list of {} clues", axis))
        })?;
        list.iter()
            .map(|entry| Self::parse_yaml_runs(entry, axis))
            .collect()
    }

    fn parse_yaml_runs(input: &Yaml, axis: Axis) -> Result<Vec<usize>, Error> {
        match input {
            Yaml::String(s)  => s.split_whitespace()
                                 .map(|run| run.trim().parse::<usize>().map_err(|_| {
                                     Error::InvalidClue(format!("bad {} run length {:?}", axis, run))
                                 }))
                                 .collect(),
            Yaml::Integer(i) => usize::try_from(*i)
                                    .map(|run| vec![run])
                                    .map_err(|_| Error::InvalidClue(format!("negative {} run length {}", axis, i))),
            Yaml::Null       => Ok(vec![]), // rejected by validation, with a clearer message
            _                => Err(Error::InvalidClue(format!("unexpected {} clue entry: {:?}", axis, input))),
        }
    }
}

// ------------------------------------------------
// rendering

impl Puzzle {
    /// Render the board with clue prefixes left of each row and stacked clue
    /// headers above each column. Clues of fully determined lines are dimmed
    /// when color is enabled.
    pub fn render(&self, emit_color: bool) -> String {
        let subdivision = Some(5);
        let row_prefixes: Vec<Vec<ANSIString>> =
            (0..self.height()).map(|y| self.clue_text(Axis::Row, y))
                              .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                  -1) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap();
        let max_col_runs = self.col_clues.iter()
                                         .map(|clue| clue.len())
                                         .max().unwrap();

        let mut result = String::new();
        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, subdivision, emit_color));
        }

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        for y in 0..self.height() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &self.grid.squares[y].iter()
                                     .map(|c| format!(" {:1} ", c))
                                     .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &(0..self.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                          .collect::<Vec<_>>()
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        result
    }

    fn clue_text(&self, axis: Axis, index: usize) -> Vec<ANSIString<'static>> {
        let style = match self.line_is_settled(axis, index) {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        self.clue(axis, index).iter()
                              .map(|run| style.paint(run.to_string()))
                              .collect()
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        result
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for x in 0..self.width() {
            let clue_parts = self.clue_text(Axis::Column, x);
            let part: String;
            if line_idx < clue_parts.len() {
                let colored = &clue_parts[clue_parts.len()-1-line_idx];
                part = format!(" {}", lalign_colored(colored, 2, emit_color));
            } else {
                part = format!(" {:-2}", " ");
            }

            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Puzzle};
    use crate::grid::Cell;
    use crate::line::Line;
    use crate::util::Axis;
    use yaml_rust::YamlLoader;

    fn two_by_two() -> Puzzle {
        Puzzle::new(vec![vec![1], vec![1]], vec![vec![1], vec![1]]).unwrap()
    }

    #[test]
    fn dimensions_come_from_the_clue_tables() {
        let puzzle = Puzzle::new(vec![vec![1], vec![2]], vec![vec![1], vec![1], vec![1]]).unwrap();
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.height(), 2);
        assert_eq!(puzzle.line_count(Axis::Row), 2);
        assert_eq!(puzzle.line_count(Axis::Column), 3);
    }

    #[test]
    fn construction_rejects_an_empty_clue_table() {
        let result = Puzzle::new(vec![], vec![vec![1]]);
        assert!(matches!(result, Err(Error::InvalidClue(_))));
    }

    #[test]
    fn construction_rejects_a_clue_without_runs() {
        let result = Puzzle::new(vec![vec![1]], vec![vec![]]);
        assert!(matches!(result, Err(Error::InvalidClue(_))));
    }

    #[test]
    fn construction_rejects_a_zero_length_run() {
        let result = Puzzle::new(vec![vec![1, 0]], vec![vec![1]]);
        assert!(matches!(result, Err(Error::InvalidClue(_))));
    }

    #[test]
    fn construction_tolerates_a_clue_sum_mismatch() {
        // the totals disagree (1 vs 2), which is only worth a warning
        assert!(Puzzle::new(vec![vec![1]], vec![vec![2]]).is_ok());
    }

    #[test]
    fn get_line_copies_along_both_axes() {
        let mut puzzle = two_by_two();
        puzzle.merge_line(Axis::Row, 0, &Line::parse("+-")).unwrap();
        assert_eq!(puzzle.get_line(Axis::Row, 0).unwrap().to_string(), "+-");
        assert_eq!(puzzle.get_line(Axis::Row, 1).unwrap().to_string(), "..");
        assert_eq!(puzzle.get_line(Axis::Column, 0).unwrap().to_string(), "+.");
        assert_eq!(puzzle.get_line(Axis::Column, 1).unwrap().to_string(), "-.");
    }

    #[test]
    fn line_index_out_of_range_is_reported() {
        let puzzle = two_by_two();
        match puzzle.get_line(Axis::Row, 5) {
            Err(Error::OutOfRange { axis, index, len }) => {
                assert_eq!(axis, Axis::Row);
                assert_eq!(index, 5);
                assert_eq!(len, 2);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn merge_line_reports_changed_positions() {
        let mut puzzle = two_by_two();
        let changed = puzzle.merge_line(Axis::Row, 0, &Line::parse("+.")).unwrap();
        assert_eq!(changed, vec![0]);
    }

    #[test]
    fn merging_the_same_line_twice_changes_nothing() {
        let mut puzzle = two_by_two();
        let line = Line::parse("+-");
        assert_eq!(puzzle.merge_line(Axis::Row, 0, &line).unwrap().len(), 2);
        assert_eq!(puzzle.merge_line(Axis::Row, 0, &line).unwrap().len(), 0);
    }

    #[test]
    fn merge_line_never_downgrades_a_known_square() {
        let mut puzzle = two_by_two();
        puzzle.merge_line(Axis::Row, 0, &Line::parse("+-")).unwrap();
        let changed = puzzle.merge_line(Axis::Row, 0, &Line::parse("..")).unwrap();
        assert!(changed.is_empty());
        assert_eq!(puzzle.grid.get(0, 0), Cell::FilledIn);
        assert_eq!(puzzle.grid.get(1, 0), Cell::CrossedOut);
    }

    #[test]
    fn descriptor_pairs_parse_into_clue_tables() {
        let puzzle = Puzzle::from_descriptors("8:7,3:16", "1:2:3").unwrap();
        assert_eq!(puzzle.height(), 3);
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.clue(Axis::Row, 1), &[7, 3]);
        assert_eq!(puzzle.clue(Axis::Column, 2), &[3]);
    }

    #[test]
    fn descriptor_with_garbage_is_rejected() {
        assert!(matches!(Puzzle::from_descriptors("1,x:2", "1"), Err(Error::InvalidClue(_))));
        assert!(matches!(Puzzle::from_descriptors("1::2", "1"), Err(Error::InvalidClue(_))));
    }

    #[test]
    fn yaml_documents_parse_into_clue_tables() {
        let docs = YamlLoader::load_from_str("rows:\n    - 1 1\n    - 2\ncols:\n    - 2\n    - 1\n    - 1\n").unwrap();
        let puzzle = Puzzle::from_yaml(&docs[0]).unwrap();
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.height(), 2);
        assert_eq!(puzzle.clue(Axis::Row, 0), &[1, 1]);
        assert_eq!(puzzle.clue(Axis::Column, 0), &[2]);
    }

    #[test]
    fn yaml_null_clue_entry_is_rejected() {
        let docs = YamlLoader::load_from_str("rows:\n    - 2\n    -\ncols:\n    - 1\n    - 1\n").unwrap();
        assert!(matches!(Puzzle::from_yaml(&docs[0]), Err(Error::InvalidClue(_))));
    }

    #[test]
    fn rendering_draws_the_board_frame() {
        let rendered = two_by_two().to_string();
        assert!(rendered.contains("\u{2554}"));
        assert!(rendered.contains("\u{255D}"));
    }
}
