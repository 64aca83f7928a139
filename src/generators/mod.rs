mod prim;
mod recur_backtrack;

pub use prim::{Frontier, Prim};
pub use recur_backtrack::RecursiveBacktracker;

use crate::{
    config::GenerationConfig,
    error::MazeError,
    maze::{CellPosition, Grid, Maze},
    random::{RandomSource, RngSource},
};

/// Selects the carving algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    RecursiveBacktracker,
    PrimsAlgorithm,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::RecursiveBacktracker, Algorithm::PrimsAlgorithm];
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::RecursiveBacktracker => write!(f, "Recursive Backtracker"),
            Algorithm::PrimsAlgorithm => write!(f, "Prim's Algorithm"),
        }
    }
}

/// What a generator did, in order. Replaying the log reproduces the carve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveEvent {
    /// A new contiguous run of carving starts.
    NewRun,
    /// The cell was entered as part of the current run.
    Visited(CellPosition),
    /// `cell` joined the maze through the wall it shares with `neighbor`, which was already
    /// part of the maze.
    Carved {
        cell: CellPosition,
        neighbor: CellPosition,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done,
}

/// A carving algorithm driven one step at a time.
///
/// Stepping only changes scheduling: a fully stepped run and [`Carver::run`] with the same
/// random source produce the same grid and the same events.
pub trait Carver {
    fn step(&mut self, grid: &mut Grid, rng: &mut dyn RandomSource) -> Result<Step, MazeError>;

    fn events(&self) -> &[CarveEvent];

    fn into_events(self) -> Vec<CarveEvent>;

    /// Steps until every cell is visited and returns the carve log.
    fn run(
        mut self,
        grid: &mut Grid,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<CarveEvent>, MazeError>
    where
        Self: Sized,
    {
        while self.step(grid, rng)? == Step::Continue {}
        Ok(self.into_events())
    }
}

/// Picks a uniformly random start cell, drawing `x` first and then `y`.
fn random_start(grid: &Grid, rng: &mut dyn RandomSource) -> CellPosition {
    let x = rng.uniform_int(0, grid.width() as usize) as u16;
    let y = rng.uniform_int(0, grid.length() as usize) as u16;
    CellPosition::new(x, y)
}

/// Joins `cell` to the maze through a random visited neighbor and returns that neighbor.
///
/// Directions are drawn until one leads to a visited cell. The loop terminates because
/// `cell` is checked to have at least one visited neighbor before the first draw.
fn connect_to_maze(
    grid: &mut Grid,
    rng: &mut dyn RandomSource,
    cell: CellPosition,
    events: &mut Vec<CarveEvent>,
) -> Result<CellPosition, MazeError> {
    if !grid.is_next_to_maze(cell) {
        return Err(MazeError::AlgorithmInvariantViolation {
            at: cell,
            detail: "cell has no visited neighbor to connect to",
        });
    }
    loop {
        let direction = rng.direction();
        match grid.neighbor(cell, direction) {
            Some(neighbor) if grid.is_visited(neighbor) => {
                grid.remove_wall(cell, direction);
                tracing::trace!("[connect] {} joined the maze through {}", cell, direction);
                events.push(CarveEvent::Carved { cell, neighbor });
                return Ok(neighbor);
            }
            _ => {}
        }
    }
}

/// Generates a complete maze as described by `config`.
///
/// The configuration is validated before anything is allocated. Colors, when requested, are
/// painted after carving from the same random source, so they never change the walls.
pub fn generate(config: &GenerationConfig, rng: &mut dyn RandomSource) -> Result<Maze, MazeError> {
    config.validate()?;
    let mut grid = Grid::new(config.width, config.length)?;

    tracing::debug!(
        "[generate] {}x{} maze with {}",
        config.width,
        config.length,
        config.algorithm
    );
    let events = match config.algorithm {
        Algorithm::RecursiveBacktracker => RecursiveBacktracker::new().run(&mut grid, rng)?,
        Algorithm::PrimsAlgorithm => Prim::new().run(&mut grid, rng)?,
    };
    tracing::debug!(
        "[generate] done: {} passages, {} events",
        grid.passage_count(),
        events.len()
    );

    let mut maze = Maze::new(grid, config.algorithm, events);
    if config.random_colors {
        let colors = config.palette.paint(
            maze.events(),
            maze.width(),
            maze.grid().cell_count(),
            rng,
        );
        maze.set_colors(colors);
    }
    Ok(maze)
}

/// [`generate`] with a `StdRng`, seeded when `seed` is given and from the OS otherwise.
pub fn generate_with_seed(
    config: &GenerationConfig,
    seed: Option<u64>,
) -> Result<Maze, MazeError> {
    let mut rng = RngSource::seeded(seed);
    generate(config, &mut rng)
}
