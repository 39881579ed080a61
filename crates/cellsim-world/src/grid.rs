//! Bounded 2D grid shared by the two-dimensional engines.

use cellsim_core::{Error, Position, Result, MOORE_OFFSETS};
use serde::{Deserialize, Serialize};

/// A row-major, edge-clipped grid of cell states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Get the cell at a position, `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<T> {
        self.contains(pos).then(|| self.cells[self.pos_to_index(pos)])
    }

    /// Get mutable cell at position
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if !self.contains(pos) {
            return None;
        }
        let index = self.pos_to_index(pos);
        Some(&mut self.cells[index])
    }

    /// Set the cell at a position
    pub fn set(&mut self, pos: Position, value: T) -> Result<()> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let index = self.pos_to_index(pos);
        self.cells[index] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Count Moore neighbours matching `pred`. Neighbours beyond the edge
    /// are skipped, so border cells see fewer than eight.
    pub fn count_neighbours<F>(&self, pos: Position, pred: F) -> usize
    where
        F: Fn(T) -> bool,
    {
        MOORE_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| pos.offset(dr, dc, self.rows, self.cols))
            .filter(|&neighbour| pred(self.cells[self.pos_to_index(neighbour)]))
            .count()
    }

    /// Write `rule(pos, cell)` for every cell of `self` into `next`.
    /// `next` is resized to match; `self` is only read, so every cell sees
    /// the same generation.
    pub fn map_into<F>(&self, next: &mut Grid<T>, mut rule: F)
    where
        F: FnMut(Position, T) -> T,
    {
        next.rows = self.rows;
        next.cols = self.cols;
        next.cells.clear();
        next.cells.extend(
            self.cells
                .iter()
                .enumerate()
                .map(|(i, &cell)| rule(self.index_to_pos(i), cell)),
        );
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index / self.cols, index % self.cols)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (self.index_to_pos(i), cell))
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Copy the grid out as nested rows, mapping each cell
    pub fn to_rows<U, F>(&self, f: F) -> Vec<Vec<U>>
    where
        F: Fn(T) -> U,
    {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|&cell| f(cell)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 8, 0u8);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 8);
        assert_eq!(grid.len(), 80);
        assert!(grid.iter().all(|(_, cell)| cell == 0));
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(5, 5, 0u8);
        grid.set(Position::new(4, 2), 1).unwrap();
        assert_eq!(grid.get(Position::new(4, 2)), Some(1));
        assert_eq!(grid.get(Position::new(5, 0)), None);
        assert!(matches!(
            grid.set(Position::new(0, 5), 1),
            Err(Error::OutOfBounds { row: 0, col: 5, .. })
        ));
    }

    #[test]
    fn test_neighbours_clipped_at_edges() {
        let grid = Grid::new(5, 5, 1u8);
        assert_eq!(grid.count_neighbours(Position::new(2, 2), |c| c == 1), 8);
        assert_eq!(grid.count_neighbours(Position::new(0, 0), |c| c == 1), 3);
        assert_eq!(grid.count_neighbours(Position::new(0, 2), |c| c == 1), 5);
        assert_eq!(grid.count_neighbours(Position::new(4, 4), |c| c == 1), 3);
    }

    #[test]
    fn test_neighbours_exclude_centre() {
        let mut grid = Grid::new(5, 5, 0u8);
        grid.set(Position::new(2, 2), 1).unwrap();
        assert_eq!(grid.count_neighbours(Position::new(2, 2), |c| c == 1), 0);
        assert_eq!(grid.count_neighbours(Position::new(1, 1), |c| c == 1), 1);
        assert_eq!(grid.count_neighbours(Position::new(0, 0), |c| c == 1), 0);
    }

    #[test]
    fn test_map_into_reads_previous_generation() {
        let mut grid = Grid::new(5, 5, 0u8);
        grid.set(Position::new(0, 0), 1).unwrap();
        let mut next = Grid::new(1, 1, 0u8);

        // Spreads to neighbours of the old alive cell only, not transitively
        grid.map_into(&mut next, |pos, cell| {
            if cell == 1 || grid.count_neighbours(pos, |c| c == 1) > 0 {
                1
            } else {
                0
            }
        });

        assert_eq!(next.rows(), 5);
        assert_eq!(next.cells().iter().filter(|&&c| c == 1).count(), 4);
        assert_eq!(next.get(Position::new(2, 2)), Some(0));
    }

    #[test]
    fn test_to_rows() {
        let mut grid = Grid::new(5, 6, 0u8);
        grid.set(Position::new(1, 3), 1).unwrap();
        let rows = grid.to_rows(|c| c as u32);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.len() == 6));
        assert_eq!(rows[1][3], 1);
    }
}
