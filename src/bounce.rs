//! Reflecting ("billiard ball") movement between the screen edges.
//!
//! The model only looks at the pointer when a tick is sampled. A step that is
//! large compared to the screen can carry the pointer past an edge before the
//! direction flips; the position itself is never clamped.

use crate::bounds::{Point, ScreenBounds};

use std::fmt;

/// Signed per-tick offset. The signs encode the current travel direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Vector {
    pub dx: i32,
    pub dy: i32,
}

impl Vector {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Both axes set to `step`, negated when `negative` is set.
    pub fn uniform(step: u32, negative: bool) -> Self {
        let m = magnitude(step);
        let d = if negative { -m } else { m };
        Self { dx: d, dy: d }
    }

    /// Whether both components have exactly the magnitude of `step`.
    pub fn is_normalized(&self, step: u32) -> bool {
        let m = magnitude(step);
        self.dx.abs() == m && self.dy.abs() == m
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}, {:+}", self.dx, self.dy)
    }
}

/// Pixel steps are stored unsigned; anything past `i32::MAX` saturates.
#[inline]
pub fn magnitude(step: u32) -> i32 {
    i32::try_from(step).unwrap_or(i32::MAX)
}

/// Computes the offset for one axis.
///
/// Reverses to `-step` when the next position reaches `max`, to `+step` when
/// it reaches `min`, and keeps `prior` otherwise.
#[inline]
pub fn next_offset(position: i32, min: i32, max: i32, prior: i32, step: u32) -> i32 {
    let next = position.saturating_add(prior);
    let m = magnitude(step);

    if next >= max {
        -m
    } else if next <= min {
        m
    } else {
        prior
    }
}

/// Applies [`next_offset`] to both axes independently.
pub fn next_vector(position: Point, bounds: &ScreenBounds, prior: Vector, step: u32) -> Vector {
    Vector::new(
        next_offset(position.x, bounds.min_x, bounds.max_x, prior.dx, step),
        next_offset(position.y, bounds.min_y, bounds.max_y, prior.dy, step),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: ScreenBounds = ScreenBounds {
        min_x: 0,
        min_y: 0,
        max_x: 1920,
        max_y: 1080,
    };

    #[test]
    fn reverses_at_right_edge() {
        assert_eq!(next_offset(1915, 0, 1920, 10, 10), -10);
        assert_eq!(next_offset(1920, 0, 1920, 10, 10), -10);
    }

    #[test]
    fn reverses_at_left_edge() {
        assert_eq!(next_offset(5, 0, 1920, -10, 10), 10);
        assert_eq!(next_offset(0, 0, 1920, -10, 10), 10);
    }

    #[test]
    fn keeps_direction_in_the_middle() {
        assert_eq!(next_offset(960, 0, 1920, -10, 10), -10);
        assert_eq!(next_offset(960, 0, 1920, 10, 10), 10);
    }

    #[test]
    fn axes_bounce_independently() {
        let v = next_vector(Point::new(1919, 540), &SCREEN, Vector::new(5, -5), 5);
        assert_eq!(v, Vector::new(-5, -5));

        let v = next_vector(Point::new(960, 2), &SCREEN, Vector::new(5, -5), 5);
        assert_eq!(v, Vector::new(5, 5));
    }

    #[test]
    fn negative_origin_screens() {
        let left_monitor = ScreenBounds::new(-1280, 0, 1920, 1080);
        let v = next_vector(Point::new(-1275, 500), &left_monitor, Vector::new(-10, 10), 10);
        assert_eq!(v, Vector::new(10, 10));
    }

    #[test]
    fn large_step_overshoots_without_clamping() {
        // the pointer sits past the edge; only the sign is corrected
        assert_eq!(next_offset(2500, 0, 1920, 600, 600), -600);
        assert_eq!(next_offset(-700, 0, 1920, -600, 600), 600);
    }

    #[test]
    fn huge_steps_saturate() {
        assert_eq!(magnitude(u32::MAX), i32::MAX);
        assert_eq!(next_offset(i32::MAX, 0, 1920, i32::MAX, u32::MAX), -i32::MAX);
    }

    #[test]
    fn uniform_vector() {
        assert_eq!(Vector::uniform(7, false), Vector::new(7, 7));
        assert_eq!(Vector::uniform(7, true), Vector::new(-7, -7));
        assert!(Vector::new(-7, 7).is_normalized(7));
        assert!(!Vector::new(-7, 6).is_normalized(7));
    }

    proptest! {
        #[test]
        fn interior_positions_keep_prior(
            step in 1u32..=200,
            negative in any::<bool>(),
            p in 0i32..=1920,
        ) {
            let prior = if negative { -magnitude(step) } else { magnitude(step) };
            let next = p + prior;
            prop_assume!(next > 0 && next < 1920);
            prop_assert_eq!(next_offset(p, 0, 1920, prior, step), prior);
        }

        #[test]
        fn at_or_past_max_goes_negative(
            step in 1u32..=200,
            p in 1920i32..=5000,
        ) {
            prop_assert_eq!(next_offset(p, 0, 1920, 0, step), -magnitude(step));
        }

        #[test]
        fn at_or_before_min_goes_positive(
            step in 1u32..=200,
            p in -5000i32..=0,
        ) {
            prop_assert_eq!(next_offset(p, 0, 1920, 0, step), magnitude(step));
        }

        #[test]
        fn normalized_input_stays_normalized(
            step in 1u32..=500,
            negative in any::<bool>(),
            x in -3000i32..=3000,
            y in -3000i32..=3000,
        ) {
            let prior = Vector::uniform(step, negative);
            let v = next_vector(Point::new(x, y), &SCREEN, prior, step);
            prop_assert!(v.is_normalized(step));
        }
    }
}
