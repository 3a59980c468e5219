//! Layout coordinate generation.

use std::f64::consts::TAU;

use super::types::Point;

/// Direction the square spiral is currently walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn turn(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// A generator which generates square spiral coordinates.
///
/// Consecutive points are exactly `distance` apart, the spiral walks two
/// legs per leg length (1, 1, 2, 2, 3, 3, ...), so placed nodes never
/// overlap and the traversal order is deterministic.
#[derive(Debug)]
pub struct CoordsGenerator {
    distance: i64,
    point: Point,
    dir: Direction,
    leg: usize,
    step: usize,
    second_leg: bool,
}

impl CoordsGenerator {
    pub fn new(distance: i64) -> Self {
        CoordsGenerator {
            distance,
            point: Point { x: 0, y: 0 },
            dir: Direction::Up,
            leg: 1,
            step: 1,
            second_leg: false,
        }
    }

    /// Yield the current point and walk to the next one.
    pub fn advance(&mut self) -> Point {
        let out = self.point;
        self.point = match self.dir {
            Direction::Up => Point {
                x: self.point.x,
                y: self.point.y + self.distance,
            },
            Direction::Right => Point {
                x: self.point.x + self.distance,
                y: self.point.y,
            },
            Direction::Down => Point {
                x: self.point.x,
                y: self.point.y - self.distance,
            },
            Direction::Left => Point {
                x: self.point.x - self.distance,
                y: self.point.y,
            },
        };
        self.leg -= 1;
        if self.leg == 0 {
            self.dir = self.dir.turn();
            if self.second_leg {
                self.step += 1;
            }
            self.second_leg = !self.second_leg;
            self.leg = self.step;
        }
        out
    }
}

impl Iterator for CoordsGenerator {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        Some(self.advance())
    }
}

/// Place `count` points evenly on a ring around `center`, sized so that
/// neighboring points sit roughly `distance` apart.
pub fn ring(center: Point, count: usize, distance: i64) -> Vec<Point> {
    if count <= 1 {
        return vec![center; count];
    }
    let spacing = distance as f64;
    let radius = (count as f64 * spacing / TAU).max(spacing);
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Point {
                x: center.x + (radius * angle.cos()).round() as i64,
                y: center.y + (radius * angle.sin()).round() as i64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spiral_walks_expected_sequence() {
        let d = 200;
        let points: Vec<Point> = CoordsGenerator::new(d).take(7).collect();
        assert_eq!(
            points,
            vec![
                Point { x: 0, y: 0 },
                Point { x: 0, y: d },
                Point { x: d, y: d },
                Point { x: d, y: 0 },
                Point { x: d, y: -d },
                Point { x: 0, y: -d },
                Point { x: -d, y: -d },
            ]
        );
    }

    #[test]
    fn test_spiral_spacing_is_uniform() {
        let d = 50;
        let points: Vec<Point> = CoordsGenerator::new(d).take(40).collect();
        for pair in points.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dy = (pair[1].y - pair[0].y).abs();
            assert_eq!(dx + dy, d, "adjacent points must be one step apart");
        }
    }

    #[test]
    fn test_spiral_never_revisits() {
        let points: Vec<Point> = CoordsGenerator::new(10).take(500).collect();
        let mut seen = std::collections::HashSet::new();
        for p in points {
            assert!(seen.insert((p.x, p.y)), "spiral revisited {:?}", p);
        }
    }

    #[test]
    fn test_ring_is_centered_and_spaced() {
        let center = Point { x: 1000, y: -1000 };
        let points = ring(center, 12, 100);
        assert_eq!(points.len(), 12);
        let mut seen = std::collections::HashSet::new();
        for p in &points {
            assert!(seen.insert((p.x, p.y)));
            let dx = (p.x - center.x) as f64;
            let dy = (p.y - center.y) as f64;
            let r = (dx * dx + dy * dy).sqrt();
            assert!(r >= 100.0, "ring radius must be at least one distance unit");
        }
    }

    #[test]
    fn test_ring_of_one_is_the_center() {
        let center = Point { x: 5, y: 7 };
        assert_eq!(ring(center, 1, 100), vec![center]);
        assert!(ring(center, 0, 100).is_empty());
    }
}
