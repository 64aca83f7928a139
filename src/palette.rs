use crate::{generators::CarveEvent, random::RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Colors to tag maze floors with. Hand picked, random RGB values look muddy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub const DEFAULT_COLORS: [Rgb; 6] = [
        Rgb::new(0xe6, 0x39, 0x46),
        Rgb::new(0xf4, 0xa2, 0x61),
        Rgb::new(0xe9, 0xc4, 0x6a),
        Rgb::new(0x2a, 0x9d, 0x8f),
        Rgb::new(0x45, 0x7b, 0x9d),
        Rgb::new(0x9b, 0x5d, 0xe5),
    ];

    pub fn new(colors: Vec<Rgb>) -> Self {
        Palette { colors }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    fn pick(&self, rng: &mut dyn RandomSource) -> Rgb {
        self.colors[rng.uniform_int(0, self.colors.len())]
    }

    /// Replays a carve log and returns one color per cell, row-major.
    ///
    /// Each run of carving gets its own random color. A cell connected to the maze first
    /// takes its neighbor's color, and keeps it unless the cell is then visited inside a
    /// new run. Topology is never touched.
    ///
    /// # Panics
    /// If the palette is empty. [`GenerationConfig::validate`] rejects that before carving.
    ///
    /// [`GenerationConfig::validate`]: crate::GenerationConfig::validate
    pub fn paint(
        &self,
        events: &[CarveEvent],
        width: u16,
        cell_count: usize,
        rng: &mut dyn RandomSource,
    ) -> Box<[Rgb]> {
        let index = |x: u16, y: u16| y as usize * width as usize + x as usize;
        let mut floors = vec![self.colors[0]; cell_count].into_boxed_slice();
        let mut run_color = self.colors[0];

        for event in events {
            match *event {
                CarveEvent::NewRun => run_color = self.pick(rng),
                CarveEvent::Visited(pos) => floors[index(pos.x, pos.y)] = run_color,
                CarveEvent::Carved { cell, neighbor } => {
                    floors[index(cell.x, cell.y)] = floors[index(neighbor.x, neighbor.y)];
                }
            }
        }
        floors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(Palette::DEFAULT_COLORS.to_vec())
    }
}
