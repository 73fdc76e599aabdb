//! [`WalkGrid`]: a rectangle of walkable / blocked cells.

use std::f64::consts::SQRT_2;

use replan_core::{Point, Range};
use replan_paths::{DynamicGraph, Graph};
use thiserror::Error;

use crate::distance::euclidean;

/// Which steps between cells are allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// Up, down, left, right.
    Cardinal,
    /// Cardinal plus the four diagonals.
    #[default]
    Octile,
}

/// Cost of a single step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepCosts {
    pub straight: f64,
    pub diagonal: f64,
}

impl Default for StepCosts {
    fn default() -> Self {
        Self {
            straight: 1.0,
            diagonal: SQRT_2,
        }
    }
}

/// Movement rule and step costs of a [`WalkGrid`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GridConfig {
    pub movement: Movement,
    pub costs: StepCosts,
}

/// Errors from [`WalkGrid::from_ascii`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    /// No rows, or a first row without cells.
    #[error("grid has no cells")]
    Empty,
    /// A row's width differs from the first row.
    #[error("row {row} has width {found}, expected {expected}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangle of cells, each walkable or blocked.
///
/// Cells outside the rectangle are treated as blocked.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkGrid {
    rng: Range,
    walkable: Vec<bool>,
    config: GridConfig,
}

impl WalkGrid {
    /// Create a fully walkable `width` × `height` grid with default movement.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, GridConfig::default())
    }

    /// Create a fully walkable grid with the given movement rule and costs.
    pub fn with_config(width: i32, height: i32, config: GridConfig) -> Self {
        let rng = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            rng,
            walkable: vec![true; rng.len()],
            config,
        }
    }

    /// Parse a grid from text: `#` is blocked, any other character walkable.
    /// Each line is a row.
    ///
    /// ```
    /// use replan_grid::{Point, WalkGrid};
    ///
    /// let grid = WalkGrid::from_ascii("..#\n...").unwrap();
    /// assert_eq!(grid.range().size(), Point::new(3, 2));
    /// assert!(!grid.walkable_at(Point::new(2, 0)));
    /// ```
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text.lines().collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut grid = Self::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.set_walkable(Point::new(x as i32, y as i32), false);
                }
            }
        }
        Ok(grid)
    }

    /// The grid rectangle.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Whether `p` is inside the grid and walkable.
    #[inline]
    pub fn walkable_at(&self, p: Point) -> bool {
        self.rng.index_of(p).is_some_and(|i| self.walkable[i])
    }

    /// Blocked cells in row-major order.
    pub fn blocked(&self) -> impl Iterator<Item = Point> + '_ {
        self.rng.iter().filter(|p| !self.walkable_at(*p))
    }

    fn heuristic_scale(&self) -> f64 {
        let StepCosts { straight, diagonal } = self.config.costs;
        match self.config.movement {
            Movement::Cardinal => straight,
            Movement::Octile => straight.min(diagonal / SQRT_2),
        }
    }
}

impl Graph for WalkGrid {
    type Node = Point;

    /// Walkable in-range cells around `p`, row by row. The walkability of `p`
    /// itself is not consulted.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if dx != 0 && dy != 0 && self.config.movement == Movement::Cardinal {
                    continue;
                }
                let n = p.shift(dx, dy);
                if self.walkable_at(n) {
                    buf.push(n);
                }
            }
        }
    }

    fn edge_cost(&self, from: Point, to: Point) -> f64 {
        if from == to {
            return 0.0;
        }
        if !self.walkable_at(from) || !self.walkable_at(to) || !from.is_adjacent(to) {
            return f64::INFINITY;
        }
        let d = to - from;
        if d.x != 0 && d.y != 0 {
            match self.config.movement {
                Movement::Cardinal => f64::INFINITY,
                Movement::Octile => self.config.costs.diagonal,
            }
        } else {
            self.config.costs.straight
        }
    }

    fn heuristic(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to) * self.heuristic_scale()
    }

    fn is_walkable(&self, p: Point) -> bool {
        self.walkable_at(p)
    }
}

impl DynamicGraph for WalkGrid {
    /// Out-of-range points are ignored.
    fn set_walkable(&mut self, p: Point, walkable: bool) {
        if let Some(i) = self.rng.index_of(p) {
            self.walkable[i] = walkable;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    fn neighbors(grid: &WalkGrid, p: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        grid.neighbors(p, &mut buf);
        buf
    }

    #[rstest]
    #[case(Point::new(2, 2), 8)]
    #[case(Point::new(0, 0), 3)]
    #[case(Point::new(2, 0), 5)]
    #[case(Point::new(4, 4), 3)]
    fn neighbor_counts(#[case] p: Point, #[case] expected: usize) {
        assert_eq!(neighbors(&WalkGrid::new(5, 5), p).len(), expected);
    }

    #[test]
    fn neighbors_are_row_major() {
        let grid = WalkGrid::new(5, 5);
        assert_eq!(
            neighbors(&grid, Point::new(1, 1)),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn cardinal_neighbors() {
        let grid = WalkGrid::with_config(
            5,
            5,
            GridConfig {
                movement: Movement::Cardinal,
                ..GridConfig::default()
            },
        );
        assert_eq!(
            neighbors(&grid, Point::new(2, 2)),
            vec![
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(2, 3),
            ]
        );
        assert!(grid.edge_cost(Point::new(2, 2), Point::new(3, 3)).is_infinite());
        assert_eq!(grid.edge_cost(Point::new(2, 2), Point::new(2, 3)), 1.0);
    }

    #[test]
    fn all_neighbors_blocked() {
        let mut grid = WalkGrid::new(5, 5);
        let center = Point::new(2, 2);
        for n in neighbors(&grid, center) {
            grid.set_walkable(n, false);
        }
        assert!(neighbors(&grid, center).is_empty());
        assert_eq!(grid.blocked().count(), 8);
    }

    #[test]
    fn blocked_cell_still_lists_its_neighbors() {
        let mut grid = WalkGrid::new(5, 5);
        grid.set_walkable(Point::new(2, 2), false);
        assert_eq!(neighbors(&grid, Point::new(2, 2)).len(), 8);
    }

    #[test]
    fn straight_and_diagonal_costs() {
        let grid = WalkGrid::new(5, 5);
        assert_eq!(grid.edge_cost(Point::new(1, 1), Point::new(2, 1)), 1.0);
        assert!((grid.edge_cost(Point::new(1, 1), Point::new(2, 2)) - SQRT_2).abs() < EPS);
        assert_eq!(grid.edge_cost(Point::new(2, 2), Point::new(2, 2)), 0.0);
    }

    #[test]
    fn impossible_steps_cost_infinity() {
        let mut grid = WalkGrid::new(5, 5);
        assert!(grid.edge_cost(Point::new(0, 0), Point::new(2, 2)).is_infinite());
        assert!(grid.edge_cost(Point::new(0, 0), Point::new(2, 0)).is_infinite());
        assert!(grid.edge_cost(Point::new(0, 0), Point::new(-1, 0)).is_infinite());
        grid.set_walkable(Point::new(2, 1), false);
        assert!(grid.edge_cost(Point::new(1, 1), Point::new(2, 1)).is_infinite());
        assert!(grid.edge_cost(Point::new(2, 1), Point::new(1, 1)).is_infinite());
    }

    #[test]
    fn heuristic_is_straight_line() {
        let mut grid = WalkGrid::new(5, 5);
        assert_eq!(grid.heuristic(Point::new(0, 0), Point::new(4, 3)), 5.0);
        assert_eq!(grid.heuristic(Point::new(2, 2), Point::new(2, 2)), 0.0);
        grid.set_walkable(Point::new(2, 1), false);
        assert!((grid.heuristic(Point::new(0, 0), Point::new(2, 1)) - 5f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn heuristic_scales_with_cheap_diagonals() {
        let grid = WalkGrid::with_config(
            5,
            5,
            GridConfig {
                movement: Movement::Octile,
                costs: StepCosts {
                    straight: 2.0,
                    diagonal: SQRT_2,
                },
            },
        );
        // One diagonal step costs √2, so the bound must not exceed that.
        let h = grid.heuristic(Point::new(0, 0), Point::new(1, 1));
        assert!(h <= grid.edge_cost(Point::new(0, 0), Point::new(1, 1)) + EPS);
    }

    #[test]
    fn walkability_outside_range() {
        let mut grid = WalkGrid::new(3, 3);
        assert!(!grid.is_walkable(Point::new(3, 0)));
        assert!(!grid.is_walkable(Point::new(0, -1)));
        grid.set_walkable(Point::new(7, 7), true);
        assert!(!grid.is_walkable(Point::new(7, 7)));
    }

    #[test]
    fn toggling_walkability() {
        let mut grid = WalkGrid::new(3, 3);
        let p = Point::new(1, 2);
        grid.set_walkable(p, false);
        assert!(!grid.is_walkable(p));
        assert_eq!(grid.blocked().collect::<Vec<_>>(), vec![p]);
        grid.set_walkable(p, true);
        assert!(grid.is_walkable(p));
    }

    #[test]
    fn parse_ascii() {
        let grid = WalkGrid::from_ascii(".#.\n...\n#..").unwrap();
        assert_eq!(grid.range(), Range::new(0, 0, 3, 3));
        assert_eq!(
            grid.blocked().collect::<Vec<_>>(),
            vec![Point::new(1, 0), Point::new(0, 2)]
        );
    }

    #[rstest]
    #[case("", GridError::Empty)]
    #[case("\n..", GridError::Empty)]
    #[case("..\n...", GridError::InconsistentWidth { row: 1, expected: 2, found: 3 })]
    fn parse_ascii_errors(#[case] text: &str, #[case] expected: GridError) {
        assert_eq!(WalkGrid::from_ascii(text), Err(expected));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_defaults_fill_in() {
        let cfg: GridConfig = serde_json::from_str(r#"{"movement":"Cardinal"}"#).unwrap();
        assert_eq!(cfg.movement, Movement::Cardinal);
        assert_eq!(cfg.costs, StepCosts::default());
    }
}
