//! Perfect maze generation.
//!
//! A maze is carved in a [`Grid`] by one of two algorithms, selected through
//! [`GenerationConfig`]. The result is a [`Maze`] that can be queried per cell for its walls
//! and optional floor color.

pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod palette;
pub mod random;
pub mod render;

pub use config::GenerationConfig;
pub use error::{ConfigIssue, MazeError};
pub use generators::{Algorithm, CarveEvent, generate, generate_with_seed};
pub use maze::{CellPosition, CellWalls, Direction, Grid, Maze, Passage};
pub use palette::{Palette, Rgb};
pub use random::{RandomSource, RngSource};
