// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;

/// One square of the board. A square starts out Unknown and, once deduced to
/// be FilledIn or CrossedOut, is never legitimately asked to change again.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Cell {
    Unknown,
    FilledIn,
    CrossedOut,
}

impl Cell {
    pub fn is_known(&self) -> bool {
        *self != Cell::Unknown
    }
    pub fn fmt_visual(&self) -> &str {
        match self {
            Cell::CrossedOut => " ",
            Cell::FilledIn   => "\u{25A0}",
            Cell::Unknown    => ".",
        }
    }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_visual())
    }
}

// ------------------------------------------------

/// The board's cell storage, owned by the puzzle alone. Rows and columns are
/// copied out as Lines for solving and copied back in through the puzzle's
/// merge operation; nothing else writes to the grid.
#[derive(Clone)]
pub struct Grid {
    pub squares: Vec<Vec<Cell>>,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            squares: (0..height).map(|_| vec![Cell::Unknown; width])
                                .collect(),
        }
    }

    pub fn width(&self) -> usize { self.squares[0].len() }
    pub fn height(&self) -> usize { self.squares.len() }
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.squares[y][x]
    }
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.squares[y][x] = cell;
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}
