use std::ops::ControlFlow;

use image::{DynamicImage, GenericImageView};

use crate::grid::{CellState, CellStorage, Grid, Point};

/// Manhattan distance between two points.
///
/// Admissible and consistent on a 4-connected grid with unit edge costs,
/// which is what makes it a valid A* heuristic here.
pub fn manhattan(a: Point, b: Point) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Walk the predecessor map back from `goal` and mark every cell on the way
/// as [`CellState::Path`], invoking `on_step` after each mark.
///
/// The start cell ends up marked `Path` too; the caller re-marks start and
/// end afterwards. Returns the full path in start-to-goal order.
pub fn reconstruct_path(
    came_from: &CellStorage<Option<Point>>,
    goal: Point,
    grid: &mut Grid,
    on_step: &mut dyn FnMut(&Grid) -> ControlFlow<()>,
) -> Vec<Point> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(from) = came_from.get(current) {
        current = from;
        grid.set_state(current, CellState::Path);
        // the search outcome is already decided at this point, so the
        // marking loop runs to completion regardless of the step signal
        let _ = on_step(grid);
        path.push(current);
    }

    path.reverse();
    path
}

/// Threshold a grayscale image into a grid: dark pixels become barriers.
pub fn parse_img(img: &DynamicImage) -> Result<Grid, anyhow::Error> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut grid = Grid::new(height, width);

    for row in 0..height {
        for col in 0..width {
            let p = img.get_pixel(col as u32, row as u32);

            if p.0[0] < 128 {
                grid.set_state(Point { row, col }, CellState::Barrier);
            }
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{ImageBuffer, Luma};

    #[test]
    fn manhattan_distance() {
        let a = Point { row: 0, col: 0 };
        let b = Point { row: 4, col: 4 };
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(manhattan(b, a), 8);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn parse_img_thresholds_dark_pixels() {
        let img = ImageBuffer::from_fn(3, 3, |x, y| {
            if x == 1 && y == 1 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let grid = parse_img(&DynamicImage::ImageLuma8(img)).unwrap();

        assert_eq!(grid.rows, 3);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.state(Point { row: 1, col: 1 }), CellState::Barrier);
        assert_eq!(grid.state(Point { row: 0, col: 0 }), CellState::Default);
    }
}
