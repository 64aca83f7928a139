use std::fmt;

use crate::maze::CellPosition;

/// Reasons a generation request is rejected before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    ZeroWidth,
    ZeroLength,
    /// Random colors were requested but the palette has no colors to pick from.
    EmptyPalette,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The generation request is invalid. Nothing was allocated or mutated.
    InvalidConfiguration(ConfigIssue),
    /// The grid reached a state the carving algorithms can never produce on their own,
    /// e.g. a cell that must be connected to the maze has no visited neighbor.
    AlgorithmInvariantViolation {
        at: CellPosition,
        detail: &'static str,
    },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::ZeroWidth => write!(f, "maze width must be at least 1"),
            ConfigIssue::ZeroLength => write!(f, "maze length must be at least 1"),
            ConfigIssue::EmptyPalette => {
                write!(f, "random colors require a non-empty color palette")
            }
        }
    }
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidConfiguration(issue) => {
                write!(f, "invalid maze configuration: {}", issue)
            }
            MazeError::AlgorithmInvariantViolation { at, detail } => {
                write!(f, "maze invariant violated at {}: {}", at, detail)
            }
        }
    }
}

impl std::error::Error for MazeError {}

impl From<ConfigIssue> for MazeError {
    fn from(issue: ConfigIssue) -> Self {
        MazeError::InvalidConfiguration(issue)
    }
}
