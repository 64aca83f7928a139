use std::io::Write;

use crossterm::{
    queue,
    style::{self, Color, Stylize},
};

use crate::{
    maze::{CellPosition, Direction, Maze},
    palette::Rgb,
};

/// Width of a cell floor in character widths.
pub const CELL_WIDTH: usize = 2;

const CORNER: &str = "+";
const H_WALL: &str = "--";
const V_WALL: &str = "|";
const H_OPEN: &str = "  ";
const V_OPEN: &str = " ";

/// The horizontal wall line above row `y`, or below the last row when `y == length`.
fn wall_line(maze: &Maze, y: u16) -> String {
    let mut line = String::with_capacity(maze.width() as usize * (CELL_WIDTH + 1) + 1);
    for x in 0..maze.width() {
        let closed = if y < maze.length() {
            maze.walls(CellPosition::new(x, y)).north
        } else {
            maze.walls(CellPosition::new(x, y - 1)).south
        };
        line.push_str(CORNER);
        line.push_str(if closed { H_WALL } else { H_OPEN });
    }
    line.push_str(CORNER);
    line
}

fn side_wall(maze: &Maze, pos: CellPosition, direction: Direction) -> &'static str {
    if maze.grid().has_wall(pos, direction) {
        V_WALL
    } else {
        V_OPEN
    }
}

/// Plain text drawing of the maze, one line per wall row and one per cell row.
pub fn to_text(maze: &Maze) -> String {
    let mut out = String::new();
    for y in 0..maze.length() {
        out.push_str(&wall_line(maze, y));
        out.push('\n');
        for x in 0..maze.width() {
            let pos = CellPosition::new(x, y);
            out.push_str(side_wall(maze, pos, Direction::West));
            out.push_str(H_OPEN);
        }
        let last = CellPosition::new(maze.width() - 1, y);
        out.push_str(side_wall(maze, last, Direction::East));
        out.push('\n');
    }
    out.push_str(&wall_line(maze, maze.length()));
    out.push('\n');
    out
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Writes the maze to a terminal, painting floors with their color tags when present.
pub fn print(maze: &Maze, out: &mut impl Write) -> std::io::Result<()> {
    for y in 0..maze.length() {
        queue!(
            out,
            style::PrintStyledContent(wall_line(maze, y).with(Color::White)),
            style::Print("\r\n")
        )?;
        for x in 0..maze.width() {
            let pos = CellPosition::new(x, y);
            queue!(
                out,
                style::PrintStyledContent(side_wall(maze, pos, Direction::West).with(Color::White))
            )?;
            match maze.color(pos) {
                Some(rgb) => queue!(out, style::PrintStyledContent(H_OPEN.on(to_color(rgb))))?,
                None => queue!(out, style::Print(H_OPEN))?,
            }
        }
        let last = CellPosition::new(maze.width() - 1, y);
        queue!(
            out,
            style::PrintStyledContent(side_wall(maze, last, Direction::East).with(Color::White)),
            style::Print("\r\n")
        )?;
    }
    queue!(
        out,
        style::PrintStyledContent(wall_line(maze, maze.length()).with(Color::White)),
        style::Print("\r\n")
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GenerationConfig,
        generators::{Algorithm, generate},
        random::ScriptedRandom,
    };

    #[test]
    fn test_one_by_one_text() {
        let config = GenerationConfig::new(1, 1, Algorithm::PrimsAlgorithm);
        let maze = generate(&config, &mut ScriptedRandom::new(&[0, 0])).unwrap();
        assert_eq!(to_text(&maze), "+--+\n|  |\n+--+\n");
    }

    #[test]
    fn test_corridor_text() {
        let config = GenerationConfig::new(3, 1, Algorithm::RecursiveBacktracker);
        // start (0, 0); east, east; north fails at the end of the row
        let mut rng = ScriptedRandom::new(&[0, 0, 1, 1, 0]);
        let maze = generate(&config, &mut rng).unwrap();
        assert_eq!(to_text(&maze), "+--+--+--+\n|        |\n+--+--+--+\n");
    }

    #[test]
    fn test_print_writes_every_row() {
        let config = GenerationConfig::new(4, 3, Algorithm::PrimsAlgorithm)
            .with_random_colors(Default::default());
        let maze = crate::generators::generate_with_seed(&config, Some(1)).unwrap();
        let mut buf = Vec::new();
        print(&maze, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("\r\n").count(), 2 * 3 + 1);
    }
}
