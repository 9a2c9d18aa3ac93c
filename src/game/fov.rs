//! # Field of View
//!
//! Recursive shadowcasting over the map's transparency grid. The sweep
//! walks the eight octants around the viewer, narrowing the lit slope
//! range whenever an opaque cell starts a shadow. Walls themselves are
//! lit when the sweep reaches them, so room edges read correctly.
//!
//! Each sweep rewrites the `visible` grid from scratch and then unions it
//! into `explored`, which only ever grows over a session.

use crate::game::{GameMap, Position};

/// Octant transforms: each column maps scan-space (dx, dy) into one of the
/// eight octants around the viewer.
const OCTANTS: [[i32; 4]; 8] = [
    [1, 0, 0, 1],
    [0, 1, 1, 0],
    [0, -1, 1, 0],
    [-1, 0, 0, 1],
    [-1, 0, 0, -1],
    [0, -1, -1, 0],
    [0, 1, -1, 0],
    [1, 0, 0, -1],
];

/// Recomputes visibility from `origin` out to `radius` and folds the
/// result into the map's explored memory.
pub fn update_fov(map: &mut GameMap, origin: Position, radius: i32) {
    compute_fov(map, origin, radius);
    for (explored, visible) in map.explored.iter_mut().zip(map.visible.iter()) {
        *explored |= *visible;
    }
}

/// Rewrites the map's `visible` grid with the cells in view from `origin`.
/// Previous contents are discarded; `explored` is left untouched.
pub fn compute_fov(map: &mut GameMap, origin: Position, radius: i32) {
    map.visible.iter_mut().for_each(|cell| *cell = false);

    let origin_idx = map.idx(origin.x, origin.y);
    map.visible[origin_idx] = true;

    for octant in &OCTANTS {
        cast_light(map, origin, radius, 1, 1.0, 0.0, octant);
    }
}

/// Scans one octant from row `row` outward, lighting cells between the
/// `start` and `end` slopes. Opaque cells split the scan: the part of the
/// octant still lit continues recursively above the obstruction, and the
/// shadow begins below it.
fn cast_light(
    map: &mut GameMap,
    origin: Position,
    radius: i32,
    row: i32,
    mut start: f64,
    end: f64,
    octant: &[i32; 4],
) {
    if start < end {
        return;
    }
    let radius_sq = radius * radius;
    let mut new_start = 0.0;
    let mut blocked = false;

    for dist in row..=radius {
        if blocked {
            break;
        }
        let dy = -dist;
        for dx in -dist..=0 {
            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start < right_slope {
                continue;
            }
            if end > left_slope {
                break;
            }

            let x = origin.x + dx * octant[0] + dy * octant[1];
            let y = origin.y + dx * octant[2] + dy * octant[3];
            if !map.in_bounds(x, y) {
                continue;
            }

            // Round light boundary; walls inside it are lit too.
            if dx * dx + dy * dy <= radius_sq {
                let idx = map.idx(x, y);
                map.visible[idx] = true;
            }

            if blocked {
                if map.transparent(x, y) {
                    blocked = false;
                    start = new_start;
                } else {
                    new_start = right_slope;
                }
            } else if !map.transparent(x, y) && dist < radius {
                blocked = true;
                cast_light(map, origin, radius, dist + 1, start, left_slope, octant);
                new_start = right_slope;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tile;

    /// Carves an open floor rectangle leaving a 1-tile wall border.
    fn open_map(width: i32, height: i32) -> GameMap {
        let mut map = GameMap::new(width, height);
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                map.set_tile(x, y, Tile::floor());
            }
        }
        map
    }

    #[test]
    fn test_open_room_is_lit_around_viewer() {
        let mut map = open_map(21, 21);
        let origin = Position::new(10, 10);
        update_fov(&mut map, origin, 8);

        assert!(map.visible[map.idx(10, 10)]);
        // Cardinal cells at the radius edge are lit.
        assert!(map.visible[map.idx(18, 10)]);
        assert!(map.visible[map.idx(10, 2)]);
        // Cells beyond the radius are not.
        assert!(!map.visible[map.idx(10, 1)]);
    }

    #[test]
    fn test_walls_are_lit_but_block_sight() {
        let mut map = open_map(21, 21);
        // A wall segment two cells east of the viewer.
        map.set_tile(12, 10, Tile::wall());
        let origin = Position::new(10, 10);
        update_fov(&mut map, origin, 8);

        // The wall itself is lit...
        assert!(map.visible[map.idx(12, 10)]);
        // ...but the cells straight behind it are shadowed.
        assert!(!map.visible[map.idx(14, 10)]);
        assert!(!map.visible[map.idx(16, 10)]);
    }

    #[test]
    fn test_visible_is_rewritten_each_sweep() {
        let mut map = open_map(30, 21);
        update_fov(&mut map, Position::new(5, 10), 8);
        assert!(map.visible[map.idx(5, 10)]);

        update_fov(&mut map, Position::new(24, 10), 8);
        assert!(!map.visible[map.idx(5, 10)]);
        assert!(map.visible[map.idx(24, 10)]);
    }

    #[test]
    fn test_explored_is_monotonic() {
        let mut map = open_map(30, 21);
        update_fov(&mut map, Position::new(5, 10), 8);
        let first: Vec<usize> = (0..map.explored.len())
            .filter(|&i| map.explored[i])
            .collect();
        assert!(!first.is_empty());

        update_fov(&mut map, Position::new(24, 10), 8);
        for idx in first {
            assert!(map.explored[idx], "explored cell {} was forgotten", idx);
        }
    }

    #[test]
    fn test_closed_room_does_not_leak() {
        let mut map = open_map(21, 21);
        // Seal the viewer into a 3x3 cell.
        for x in 8..=12 {
            map.set_tile(x, 8, Tile::wall());
            map.set_tile(x, 12, Tile::wall());
        }
        for y in 8..=12 {
            map.set_tile(8, y, Tile::wall());
            map.set_tile(12, y, Tile::wall());
        }
        update_fov(&mut map, Position::new(10, 10), 8);

        assert!(map.visible[map.idx(9, 9)]);
        assert!(map.visible[map.idx(8, 10)]);
        // Nothing outside the sealed cell is visible.
        assert!(!map.visible[map.idx(6, 10)]);
        assert!(!map.visible[map.idx(10, 6)]);
        assert!(!map.visible[map.idx(14, 14)]);
    }
}
