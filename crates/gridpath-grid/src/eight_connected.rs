//! Distance metrics and heuristics for 8-connected grid maps.
//!
//! Orthogonal steps cost 1 and diagonal steps cost √2, so the octile distance is the exact cost
//! of an unobstructed path. Every metric here is a lower bound on that cost.

use std::f64::consts::SQRT_2;

/// Cost of an unobstructed 8-connected path: `D·(dx+dy) + (√2 − 2D)·min(dx,dy)` with `D = 1`.
pub fn octile_distance(from: (i32, i32), to: (i32, i32)) -> f64 {
    let dx = (from.0 - to.0).abs();
    let dy = (from.1 - to.1).abs();
    let diagonals = dx.min(dy);
    let orthos = dx.max(dy) - diagonals;
    orthos as f64 + diagonals as f64 * SQRT_2
}

/// Straight-line distance.
pub fn euclidean_distance(from: (i32, i32), to: (i32, i32)) -> f64 {
    let dx = (from.0 - to.0) as f64;
    let dy = (from.1 - to.1) as f64;
    dx.hypot(dy)
}

/// Number of king moves.
pub fn chebyshev_distance(from: (i32, i32), to: (i32, i32)) -> f64 {
    let dx = (from.0 - to.0).abs();
    let dy = (from.1 - to.1).abs();
    dx.max(dy) as f64
}

/// Estimate of the remaining cost to the goal used to order expansions.
///
/// Every variant is admissible for 8-connected grids with unit/√2 costs, which the optimality of
/// A* and jump point search depends on. `Octile` is also the tightest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    #[default]
    Euclidean,
    Octile,
    Chebyshev,
    /// Turns A* into uniform-cost search.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: (i32, i32), to: (i32, i32)) -> f64 {
        match self {
            Heuristic::Euclidean => euclidean_distance(from, to),
            Heuristic::Octile => octile_distance(from, to),
            Heuristic::Chebyshev => chebyshev_distance(from, to),
            Heuristic::Zero => 0.0,
        }
    }
}
