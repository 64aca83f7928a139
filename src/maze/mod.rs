pub mod cell;
mod grid;
mod union_find;

pub use cell::{Cell, CellPosition, CellWalls, Direction};
pub use grid::Grid;

use crate::{
    generators::{Algorithm, CarveEvent},
    palette::Rgb,
};
use union_find::UnionFind;

/// A carved passage between two adjacent cells. `from` is always the west or north cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Passage {
    pub from: CellPosition,
    pub to: CellPosition,
}

impl Passage {
    pub fn new(a: CellPosition, b: CellPosition) -> Self {
        let (from, to) = if (a.y, a.x) <= (b.y, b.x) { (a, b) } else { (b, a) };
        Passage { from, to }
    }
}

/// Everything a renderer needs to know about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub pos: CellPosition,
    pub walls: CellWalls,
    pub color: Option<Rgb>,
}

/// A completed maze: the carved grid plus how it was carved.
pub struct Maze {
    grid: Grid,
    algorithm: Algorithm,
    events: Vec<CarveEvent>,
    colors: Option<Box<[Rgb]>>,
}

impl Maze {
    pub(crate) fn new(grid: Grid, algorithm: Algorithm, events: Vec<CarveEvent>) -> Self {
        Maze {
            grid,
            algorithm,
            events,
            colors: None,
        }
    }

    pub(crate) fn set_colors(&mut self, colors: Box<[Rgb]>) {
        debug_assert_eq!(colors.len(), self.grid.cell_count());
        self.colors = Some(colors);
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    /// Returns the length (number of rows) of the maze in cells.
    pub fn length(&self) -> u16 {
        self.grid.length()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The carve log in the order the generator produced it.
    pub fn events(&self) -> &[CarveEvent] {
        &self.events
    }

    pub fn walls(&self, pos: CellPosition) -> CellWalls {
        self.grid.walls(pos)
    }

    /// Floor color of the cell, if the maze was generated with random colors.
    ///
    /// # Panics
    /// If `pos` is out of bounds.
    pub fn color(&self, pos: CellPosition) -> Option<Rgb> {
        let idx = self.grid.ravel_index(pos);
        self.colors.as_ref().map(|colors| colors[idx])
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.grid.positions().map(move |pos| CellView {
            pos,
            walls: self.walls(pos),
            color: self.color(pos),
        })
    }

    /// Every carved passage, in row-major order of its west/north cell.
    pub fn passages(&self) -> Vec<Passage> {
        self.grid
            .positions()
            .flat_map(|pos| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter_map(move |dir| {
                        let neighbor = self.grid.neighbor(pos, dir)?;
                        (!self.grid.has_wall(pos, dir)).then(|| Passage::new(pos, neighbor))
                    })
            })
            .collect()
    }

    /// Checks the perfect-maze property: every cell visited, and the passages form a
    /// spanning tree (`width * length - 1` edges, connected, no cycles).
    pub fn is_perfect(&self) -> bool {
        if !self.grid.all_visited() {
            return false;
        }
        let cell_count = self.grid.cell_count();
        let passages = self.passages();
        if passages.len() != cell_count - 1 {
            return false;
        }

        let width = self.width() as usize;
        let index = |p: CellPosition| p.y as usize * width + p.x as usize;
        let mut uf = UnionFind::new(cell_count);
        // With exactly n - 1 edges, no cycle implies connected
        passages
            .iter()
            .all(|passage| uf.unite(index(passage.from), index(passage.to)))
    }

    /// Checks that no wall on the outer edge of the maze has been removed.
    pub fn boundary_intact(&self) -> bool {
        self.grid.positions().all(|pos| {
            Direction::ALL
                .into_iter()
                .filter(|&dir| self.grid.neighbor(pos, dir).is_none())
                .all(|dir| self.grid.has_wall(pos, dir))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(width: u16) -> Maze {
        let mut grid = Grid::new(width, 1).unwrap();
        for x in 0..width {
            let pos = CellPosition::new(x, 0);
            grid.mark_visited(pos);
            if x + 1 < width {
                grid.remove_wall(pos, Direction::East);
            }
        }
        Maze::new(grid, Algorithm::RecursiveBacktracker, Vec::new())
    }

    #[test]
    fn test_passage_is_normalized() {
        let a = CellPosition::new(1, 1);
        let b = CellPosition::new(1, 0);
        assert_eq!(Passage::new(a, b), Passage::new(b, a));
        assert_eq!(Passage::new(a, b).from, b);
    }

    #[test]
    fn test_corridor_is_perfect() {
        let maze = corridor(5);
        assert_eq!(maze.passages().len(), 4);
        assert!(maze.is_perfect());
        assert!(maze.boundary_intact());
    }

    #[test]
    fn test_extra_passage_breaks_perfection() {
        let mut grid = Grid::new(2, 2).unwrap();
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.mark_visited(pos);
        }
        grid.remove_wall(CellPosition::new(0, 0), Direction::East);
        grid.remove_wall(CellPosition::new(0, 0), Direction::South);
        grid.remove_wall(CellPosition::new(1, 0), Direction::South);
        let maze = Maze::new(grid, Algorithm::PrimsAlgorithm, Vec::new());
        assert!(maze.is_perfect());

        let mut grid = Grid::new(2, 2).unwrap();
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.mark_visited(pos);
        }
        grid.remove_wall(CellPosition::new(0, 0), Direction::East);
        grid.remove_wall(CellPosition::new(0, 0), Direction::South);
        grid.remove_wall(CellPosition::new(1, 0), Direction::South);
        grid.remove_wall(CellPosition::new(0, 1), Direction::East);
        let maze = Maze::new(grid, Algorithm::PrimsAlgorithm, Vec::new());
        assert!(!maze.is_perfect());
    }

    #[test]
    fn test_unvisited_cell_is_not_perfect() {
        let grid = Grid::new(1, 1).unwrap();
        let maze = Maze::new(grid, Algorithm::PrimsAlgorithm, Vec::new());
        assert!(!maze.is_perfect());
    }

    #[test]
    fn test_cells_are_row_major() {
        let maze = corridor(3);
        let positions = maze.cells().map(|c| c.pos).collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![
                CellPosition::new(0, 0),
                CellPosition::new(1, 0),
                CellPosition::new(2, 0)
            ]
        );
        assert!(maze.cells().all(|c| c.color.is_none()));
        let middle = maze.walls(CellPosition::new(1, 0));
        assert!(middle.north && middle.south && !middle.east && !middle.west);
    }

    #[test]
    #[should_panic(expected = "outside the 3x1 grid")]
    fn test_color_out_of_bounds_panics() {
        let mut maze = corridor(3);
        maze.set_colors(vec![Rgb::new(0, 0, 0); 3].into_boxed_slice());
        maze.color(CellPosition::new(3, 0));
    }
}
