/// Axis-aligned geometry and the random helpers used by the simulation.

use rand::Rng;

/// Rectangle described by its four edges.  `top < bottom` (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    /// Rectangle of size `w`×`h` centred on (`x`, `y`).
    pub fn centered(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect {
            left: x - w / 2.0,
            right: x + w / 2.0,
            top: y - h / 2.0,
            bottom: y + h / 2.0,
        }
    }
}

/// Separating-axis test.  Rectangles that only share an edge still overlap.
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    !(b.left > a.right || b.right < a.left || b.top > a.bottom || b.bottom < a.top)
}

pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Uniform value in `[min, max)`.  Collapses to `min` for an empty range.
pub fn rand_range(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Uniform value in `[0, 1)`.
pub fn rand_unit(rng: &mut impl Rng) -> f64 {
    rand_range(rng, 0.0, 1.0)
}
