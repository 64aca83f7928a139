use crate::{
    error::{ConfigIssue, MazeError},
    generators::Algorithm,
    palette::Palette,
};

/// Read-only input to one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub width: u16,
    pub length: u16,
    pub algorithm: Algorithm,
    /// Tag floors with colors from `palette`. Cosmetic only, never affects the walls.
    pub random_colors: bool,
    pub palette: Palette,
}

impl GenerationConfig {
    pub fn new(width: u16, length: u16, algorithm: Algorithm) -> Self {
        GenerationConfig {
            width,
            length,
            algorithm,
            random_colors: false,
            palette: Palette::default(),
        }
    }

    pub fn with_random_colors(mut self, palette: Palette) -> Self {
        self.random_colors = true;
        self.palette = palette;
        self
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width == 0 {
            return Err(ConfigIssue::ZeroWidth.into());
        }
        if self.length == 0 {
            return Err(ConfigIssue::ZeroLength.into());
        }
        if self.random_colors && self.palette.is_empty() {
            return Err(ConfigIssue::EmptyPalette.into());
        }
        Ok(())
    }
}
