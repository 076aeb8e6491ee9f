use std::collections::VecDeque;

use super::grid::Cell;

/// Number of cells in the default starting body
pub const INITIAL_SNAKE_LENGTH: u16 = 5;

/// The snake's body on the board
///
/// Segments are stored tail-first: the front of the deque is the tail, the
/// back is the head. Advancing drops the tail and appends the new head;
/// growth re-attaches an absorbed cell at the tail end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    cells: VecDeque<Cell>,
}

impl Snake {
    /// The default starting body: cells 1..=5 along the top row, head at 5
    pub fn starting() -> Self {
        Self {
            cells: (1..=INITIAL_SNAKE_LENGTH).collect(),
        }
    }

    /// Build a snake from explicit cells in tail→head order
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        *self.cells.back().unwrap()
    }

    /// Get the tail cell
    pub fn tail(&self) -> Cell {
        *self.cells.front().unwrap()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the snake has no segments (never true for a live game)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a cell is occupied by any segment
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Body cells in tail→head order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Drop the tail and take `next_head` as the new head
    pub fn advance(&mut self, next_head: Cell) {
        self.cells.pop_front();
        self.cells.push_back(next_head);
    }

    /// Attach an absorbed growth segment as the new tail
    pub fn grow_tail(&mut self, cell: Cell) {
        self.cells.push_front(cell);
    }
}
