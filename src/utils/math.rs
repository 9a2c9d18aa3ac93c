//! # Game Mathematics
//!
//! Grid geometry helpers shared by generation and visibility.

use crate::game::Position;

/// Returns every cell on the Bresenham line from `start` to `end`,
/// inclusive of both endpoints.
///
/// The dungeon generator uses this to rasterize corridor segments; the two
/// legs of an L-shaped corridor are each a straight Bresenham line.
///
/// # Examples
///
/// ```
/// use delve::{bresenham_line, Position};
///
/// let line = bresenham_line(Position::new(0, 0), Position::new(3, 0));
/// assert_eq!(line.len(), 4);
/// assert_eq!(line[0], Position::new(0, 0));
/// assert_eq!(line[3], Position::new(3, 0));
/// ```
pub fn bresenham_line(start: Position, end: Position) -> Vec<Position> {
    let mut points = Vec::new();

    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };

    let mut err = dx + dy;
    let mut x = start.x;
    let mut y = start.y;

    loop {
        points.push(Position::new(x, y));
        if x == end.x && y == end.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}
