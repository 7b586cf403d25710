//! Triangle placement for the score split.
//!
//! Each domain owns a fixed anchor inside a 100x100 viewport; a result is
//! drawn at the weighted centroid of the anchors. The blend divides by a
//! fixed 100 rather than the actual sum, so a split that doesn't total 100
//! lands off the triangle. That is accepted behavior, not corrected here.

use crate::model::ClassificationScores;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub const ANCHOR_LIFE: Point = Point { x: 50.0, y: 10.0 };
pub const ANCHOR_MINE: Point = Point { x: 10.0, y: 90.0 };
pub const ANCHOR_OTHERS: Point = Point { x: 90.0, y: 90.0 };

/// Non-normalized barycentric blend of the three anchors, divisor fixed
/// at 100.
pub fn placement(scores: &ClassificationScores) -> Point {
    let life = f64::from(scores.life_domain);
    let mine = f64::from(scores.my_domain);
    let theirs = f64::from(scores.others_domain);

    Point {
        x: (ANCHOR_LIFE.x * life + ANCHOR_MINE.x * mine + ANCHOR_OTHERS.x * theirs) / 100.0,
        y: (ANCHOR_LIFE.y * life + ANCHOR_MINE.y * mine + ANCHOR_OTHERS.y * theirs) / 100.0,
    }
}
