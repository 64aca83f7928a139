use crate::error::{ConfigIssue, MazeError};

use super::cell::{Cell, CellPosition, CellWalls, Direction};

/// The `width x length` array of cells a maze is carved in.
pub struct Grid {
    data: Box<[Cell]>,
    width: u16,
    length: u16,
}

impl Grid {
    /// Allocates a grid with every wall standing and no cell visited.
    pub fn new(width: u16, length: u16) -> Result<Self, MazeError> {
        if width == 0 {
            return Err(ConfigIssue::ZeroWidth.into());
        }
        if length == 0 {
            return Err(ConfigIssue::ZeroLength.into());
        }
        let data = vec![Cell::CLOSED; width as usize * length as usize].into_boxed_slice();
        Ok(Grid {
            data,
            width,
            length,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_in_bounds(&self, pos: CellPosition) -> bool {
        pos.x < self.width && pos.y < self.length
    }

    fn check_bounds(&self, pos: CellPosition) {
        assert!(
            self.is_in_bounds(pos),
            "cell {} is outside the {}x{} grid",
            pos,
            self.width,
            self.length
        );
    }

    /// Row-major index of `pos`. Panics if `pos` is out of bounds.
    pub(crate) fn ravel_index(&self, pos: CellPosition) -> usize {
        self.check_bounds(pos);
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Row-major positions: every cell of row 0, then row 1, and so on.
    pub fn positions(&self) -> impl Iterator<Item = CellPosition> + use<> {
        let (width, length) = (self.width, self.length);
        (0..length).flat_map(move |y| (0..width).map(move |x| CellPosition::new(x, y)))
    }

    /// The adjacent position in `direction`, or `None` when it falls outside the grid.
    pub fn neighbor(&self, pos: CellPosition, direction: Direction) -> Option<CellPosition> {
        let (dx, dy) = direction.offset();
        let x = pos.x as i32 + dx;
        let y = pos.y as i32 + dy;
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.length as i32 {
            return None;
        }
        Some(CellPosition::new(x as u16, y as u16))
    }

    /// In-bounds neighbors in north, east, south, west order.
    pub fn neighbors(&self, pos: CellPosition) -> impl Iterator<Item = CellPosition> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(pos, dir))
    }

    pub fn is_visited(&self, pos: CellPosition) -> bool {
        self[pos].visited
    }

    pub fn mark_visited(&mut self, pos: CellPosition) {
        let idx = self.ravel_index(pos);
        self.data[idx].visited = true;
    }

    pub fn all_visited(&self) -> bool {
        self.data.iter().all(Cell::is_visited)
    }

    /// Whether any in-bounds orthogonal neighbor of `pos` is still unvisited.
    pub fn has_unvisited_neighbor(&self, pos: CellPosition) -> bool {
        self.neighbors(pos).any(|n| !self.is_visited(n))
    }

    /// Whether any in-bounds orthogonal neighbor of `pos` is already part of the maze.
    pub fn is_next_to_maze(&self, pos: CellPosition) -> bool {
        self.neighbors(pos).any(|n| self.is_visited(n))
    }

    /// Resolves the wall on side `direction` of `pos` to the cell that stores it and the
    /// stored side (east or south). `None` means it is a boundary wall nobody stores.
    fn wall_owner(&self, pos: CellPosition, direction: Direction) -> Option<(usize, Direction)> {
        let neighbor = self.neighbor(pos, direction)?;
        let owner = match direction {
            Direction::East | Direction::South => (self.ravel_index(pos), direction),
            Direction::North | Direction::West => {
                (self.ravel_index(neighbor), direction.opposite())
            }
        };
        Some(owner)
    }

    /// Checks the wall on side `direction` of `pos`. Boundary walls are always present.
    ///
    /// # Panics
    /// If `pos` is out of bounds.
    pub fn has_wall(&self, pos: CellPosition, direction: Direction) -> bool {
        self.check_bounds(pos);
        match self.wall_owner(pos, direction) {
            Some((idx, Direction::East)) => self.data[idx].east_wall,
            Some((idx, _)) => self.data[idx].south_wall,
            None => true,
        }
    }

    /// All four walls of `pos` as seen from that cell.
    pub fn walls(&self, pos: CellPosition) -> CellWalls {
        CellWalls {
            north: self.has_wall(pos, Direction::North),
            east: self.has_wall(pos, Direction::East),
            south: self.has_wall(pos, Direction::South),
            west: self.has_wall(pos, Direction::West),
        }
    }

    /// Removes the wall between `pos` and its neighbor in `direction`.
    ///
    /// The shared wall is stored once, so the neighbor sees it removed as well.
    ///
    /// # Returns
    /// `true` if a wall was removed, `false` if it was already open or is a boundary wall
    ///
    /// # Panics
    /// If `pos` is out of bounds.
    pub fn remove_wall(&mut self, pos: CellPosition, direction: Direction) -> bool {
        self.check_bounds(pos);
        let Some((idx, side)) = self.wall_owner(pos, direction) else {
            return false;
        };
        let wall = match side {
            Direction::East => &mut self.data[idx].east_wall,
            _ => &mut self.data[idx].south_wall,
        };
        std::mem::replace(wall, false)
    }

    /// Number of interior walls that have been carved away.
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|pos| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&dir| self.neighbor(pos, dir).is_some() && !self.has_wall(pos, dir))
                    .count()
            })
            .sum()
    }
}

impl std::ops::Index<CellPosition> for Grid {
    type Output = Cell;

    fn index(&self, index: CellPosition) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_closed() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.cell_count(), 12);
        for pos in grid.positions() {
            assert!(!grid.is_visited(pos));
            assert_eq!(grid.walls(pos).count(), 4);
        }
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 3).err(),
            Some(MazeError::InvalidConfiguration(ConfigIssue::ZeroWidth))
        );
        assert_eq!(
            Grid::new(3, 0).err(),
            Some(MazeError::InvalidConfiguration(ConfigIssue::ZeroLength))
        );
    }

    #[test]
    fn test_neighbor_bounds() {
        let grid = Grid::new(3, 2).unwrap();
        let corner = CellPosition::new(0, 0);
        assert_eq!(grid.neighbor(corner, Direction::North), None);
        assert_eq!(grid.neighbor(corner, Direction::West), None);
        assert_eq!(
            grid.neighbor(corner, Direction::East),
            Some(CellPosition::new(1, 0))
        );
        assert_eq!(
            grid.neighbor(corner, Direction::South),
            Some(CellPosition::new(0, 1))
        );
        let far = CellPosition::new(2, 1);
        assert_eq!(grid.neighbor(far, Direction::East), None);
        assert_eq!(grid.neighbor(far, Direction::South), None);
    }

    #[test]
    fn test_neighbors_order() {
        let grid = Grid::new(3, 3).unwrap();
        let neighbors = grid.neighbors(CellPosition::new(1, 1)).collect::<Vec<_>>();
        assert_eq!(
            neighbors,
            vec![
                CellPosition::new(1, 0),
                CellPosition::new(2, 1),
                CellPosition::new(1, 2),
                CellPosition::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_remove_wall_is_symmetric() {
        let mut grid = Grid::new(3, 3).unwrap();
        let a = CellPosition::new(1, 1);
        let north = CellPosition::new(1, 0);
        assert!(grid.remove_wall(a, Direction::North));
        assert!(!grid.has_wall(a, Direction::North));
        assert!(!grid.has_wall(north, Direction::South));
        // Same physical wall, so removing it from the other side is a no-op
        assert!(!grid.remove_wall(north, Direction::South));

        let west = CellPosition::new(0, 1);
        assert!(grid.remove_wall(west, Direction::East));
        assert!(!grid.has_wall(a, Direction::West));
        assert_eq!(grid.passage_count(), 2);
    }

    #[test]
    fn test_boundary_walls_cannot_be_removed() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.remove_wall(CellPosition::new(0, 0), Direction::North));
        assert!(!grid.remove_wall(CellPosition::new(0, 1), Direction::West));
        assert!(!grid.remove_wall(CellPosition::new(1, 1), Direction::East));
        assert!(!grid.remove_wall(CellPosition::new(1, 1), Direction::South));
        assert!(grid.has_wall(CellPosition::new(0, 0), Direction::North));
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_visited_tracking() {
        let mut grid = Grid::new(2, 1).unwrap();
        let left = CellPosition::new(0, 0);
        let right = CellPosition::new(1, 0);
        assert!(grid.has_unvisited_neighbor(left));
        assert!(!grid.is_next_to_maze(right));
        grid.mark_visited(left);
        assert!(grid.is_visited(left));
        assert!(grid.is_next_to_maze(right));
        grid.mark_visited(right);
        assert!(!grid.has_unvisited_neighbor(left));
        assert!(grid.all_visited());
    }

    #[test]
    #[should_panic(expected = "outside the 2x2 grid")]
    fn test_out_of_bounds_panics() {
        let grid = Grid::new(2, 2).unwrap();
        grid.is_visited(CellPosition::new(2, 0));
    }
}
