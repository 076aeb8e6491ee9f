use super::direction::Direction;

/// One board position, numbered `1..=N²` row by row from the top-left
pub type Cell = u16;

/// A square N×N board of numbered cells
///
/// The board is a torus: stepping off one edge re-enters from the opposite
/// edge. Cell numbering is fixed once a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u16,
}

impl Grid {
    /// Create a grid of the given side length
    pub fn new(width: u16) -> Self {
        Self { width }
    }

    /// Side length of the board
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Total number of cells (`width²`)
    pub fn cell_count(&self) -> u16 {
        self.width * self.width
    }

    /// All cells in numbering order, `1..=width²`
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        1..=self.cell_count()
    }

    /// Zero-based `(row, col)` of a cell
    pub fn row_col(&self, cell: Cell) -> (u16, u16) {
        ((cell - 1) / self.width, (cell - 1) % self.width)
    }

    /// Cell at a zero-based `(row, col)`
    pub fn cell_at(&self, row: u16, col: u16) -> Cell {
        row * self.width + col + 1
    }

    /// The cell one step from `head` in `direction`, wrapping at the edges
    pub fn step(&self, head: Cell, direction: Direction) -> Cell {
        let w = self.width;
        match direction {
            // Rightmost column wraps to the start of the same row
            Direction::Right => {
                if head % w == 0 {
                    head - (w - 1)
                } else {
                    head + 1
                }
            }
            // Leftmost column wraps to the end of the same row
            Direction::Left => {
                if head % w == 1 {
                    head + (w - 1)
                } else {
                    head - 1
                }
            }
            // Bottom row wraps to the top of the same column
            Direction::Down => {
                if head > w * (w - 1) {
                    head - w * (w - 1)
                } else {
                    head + w
                }
            }
            // Top row wraps to the bottom of the same column
            Direction::Up => {
                if head <= w {
                    head + w * (w - 1)
                } else {
                    head - w
                }
            }
        }
    }
}
