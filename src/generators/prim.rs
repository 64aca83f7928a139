use std::collections::HashSet;

use crate::{
    error::MazeError,
    generators::{CarveEvent, Carver, Step, connect_to_maze, random_start},
    maze::{CellPosition, Grid},
    random::RandomSource,
};

/// Unvisited cells adjacent to the maze, unique by coordinate, in insertion order.
#[derive(Debug, Default)]
pub struct Frontier {
    cells: Vec<CellPosition>,
    members: HashSet<CellPosition>,
}

impl Frontier {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        self.members.contains(&pos)
    }

    pub fn as_slice(&self) -> &[CellPosition] {
        &self.cells
    }

    /// Appends `pos` unless it is already present. Returns whether it was added.
    fn insert(&mut self, pos: CellPosition) -> bool {
        let added = self.members.insert(pos);
        if added {
            self.cells.push(pos);
        }
        added
    }

    /// Removes `pos` keeping the order of the remaining cells.
    fn remove(&mut self, pos: CellPosition) -> bool {
        if !self.members.remove(&pos) {
            return false;
        }
        if let Some(idx) = self.cells.iter().position(|&c| c == pos) {
            self.cells.remove(idx);
        }
        true
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.members.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Visit(CellPosition),
    Done,
}

/// Randomized Prim's algorithm over the cells of the grid.
///
/// Each step visits the current cell, grows the frontier with its unvisited neighbors, then
/// draws the next cell from the frontier and joins it to the maze through a random visited
/// neighbor.
pub struct Prim {
    state: State,
    frontier: Frontier,
    events: Vec<CarveEvent>,
}

impl Prim {
    pub fn new() -> Self {
        Prim {
            state: State::Start,
            frontier: Frontier::default(),
            events: Vec::new(),
        }
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    fn visit(
        &mut self,
        grid: &mut Grid,
        rng: &mut dyn RandomSource,
        current: CellPosition,
    ) -> Result<(), MazeError> {
        grid.mark_visited(current);
        self.events.push(CarveEvent::NewRun);
        self.events.push(CarveEvent::Visited(current));

        let unvisited = grid
            .neighbors(current)
            .filter(|&n| !grid.is_visited(n))
            .collect::<Vec<_>>();
        for neighbor in unvisited {
            self.frontier.insert(neighbor);
        }
        // `current` was added earlier as someone else's neighbor
        self.frontier.remove(current);

        if self.frontier.is_empty() {
            tracing::debug!("[prim] frontier exhausted, every cell visited");
            self.state = State::Done;
            return Ok(());
        }

        let candidate = self.frontier.as_slice()[rng.uniform_int(0, self.frontier.len())];
        let neighbor = connect_to_maze(grid, rng, candidate, &mut self.events)?;
        tracing::trace!(
            "[prim] {} joined through {} ({} frontier cells)",
            candidate,
            neighbor,
            self.frontier.len()
        );
        self.state = State::Visit(candidate);
        Ok(())
    }
}

impl Default for Prim {
    fn default() -> Self {
        Self::new()
    }
}

impl Carver for Prim {
    fn step(&mut self, grid: &mut Grid, rng: &mut dyn RandomSource) -> Result<Step, MazeError> {
        match self.state {
            State::Start => {
                self.frontier.clear();
                let start = random_start(grid, rng);
                tracing::debug!("[prim] starting at {}", start);
                self.visit(grid, rng, start)?;
            }
            State::Visit(current) => self.visit(grid, rng, current)?,
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
