use crate::{
    error::MazeError,
    generators::{CarveEvent, Carver, Step, connect_to_maze, random_start},
    maze::{CellPosition, Grid},
    random::RandomSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    /// Walking from `current`. `open` is whether `current` may still have an unvisited neighbor.
    Carving { current: CellPosition, open: bool },
    Stuck,
    Done,
}

/// Depth-first carving that recovers from dead ends by rescanning the grid.
///
/// From the current cell it keeps drawing random directions until one leads to an unvisited
/// cell, and moves there. When the current cell has no unvisited neighbor left, the whole grid
/// is scanned column by column for the first unvisited cell next to the maze, which is joined
/// to the maze and becomes the new current cell. There is no backtrack stack.
pub struct RecursiveBacktracker {
    state: State,
    events: Vec<CarveEvent>,
}

impl RecursiveBacktracker {
    pub fn new() -> Self {
        RecursiveBacktracker {
            state: State::Start,
            events: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Enters `cell` as the start of a new run.
    ///
    /// A resumed cell that cannot move anywhere is not tagged with the run, so it keeps the
    /// color of the cell it was connected through.
    fn begin_run(&mut self, grid: &mut Grid, cell: CellPosition) {
        let first = self.events.is_empty();
        grid.mark_visited(cell);
        let open = grid.has_unvisited_neighbor(cell);
        self.events.push(CarveEvent::NewRun);
        if open || first {
            self.events.push(CarveEvent::Visited(cell));
        }
        self.state = State::Carving { current: cell, open };
    }

    /// First unvisited cell touching the maze, scanning `x` in the outer loop and `y` in the inner.
    fn find_frontier_cell(grid: &Grid) -> Option<CellPosition> {
        (0..grid.width())
            .flat_map(|x| (0..grid.length()).map(move |y| CellPosition::new(x, y)))
            .find(|&pos| !grid.is_visited(pos) && grid.is_next_to_maze(pos))
    }
}

impl Default for RecursiveBacktracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Carver for RecursiveBacktracker {
    fn step(&mut self, grid: &mut Grid, rng: &mut dyn RandomSource) -> Result<Step, MazeError> {
        match self.state {
            State::Start => {
                let start = random_start(grid, rng);
                tracing::debug!("[backtracker] starting at {}", start);
                self.begin_run(grid, start);
            }
            State::Carving { open: false, .. } => {
                self.state = State::Stuck;
            }
            State::Carving {
                current,
                open: true,
            } => {
                let direction = rng.direction();
                match grid.neighbor(current, direction) {
                    Some(next) if !grid.is_visited(next) => {
                        grid.remove_wall(current, direction);
                        grid.mark_visited(next);
                        tracing::trace!("[backtracker] {} -> {}", current, next);
                        self.events.push(CarveEvent::Carved {
                            cell: next,
                            neighbor: current,
                        });
                        self.events.push(CarveEvent::Visited(next));
                        // Not rechecked here: a dead end costs one failed draw before it is noticed
                        self.state = State::Carving {
                            current: next,
                            open: true,
                        };
                    }
                    _ => {
                        self.state = State::Carving {
                            current,
                            open: grid.has_unvisited_neighbor(current),
                        };
                    }
                }
            }
            State::Stuck => match Self::find_frontier_cell(grid) {
                Some(cell) => {
                    tracing::debug!("[backtracker] dead end, resuming from {}", cell);
                    connect_to_maze(grid, rng, cell, &mut self.events)?;
                    self.begin_run(grid, cell);
                }
                None => {
                    if let Some(orphan) = grid.positions().find(|&pos| !grid.is_visited(pos)) {
                        return Err(MazeError::AlgorithmInvariantViolation {
                            at: orphan,
                            detail: "unvisited cell is unreachable from the maze",
                        });
                    }
                    tracing::debug!("[backtracker] every cell visited");
                    self.state = State::Done;
                }
            },
            State::Done => {}
        }

        Ok(if self.is_done() {
            Step::Done
        } else {
            Step::Continue
        })
    }

    fn events(&self) -> &[CarveEvent] {
        &self.events
    }

    fn into_events(self) -> Vec<CarveEvent> {
        self.events
    }
}
