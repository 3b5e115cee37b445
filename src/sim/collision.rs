//! Viewport boundary collision and response
//!
//! Entities are axis-aligned boxes (or discs treated as their bounding box).
//! Each axis is tested independently: when the extent crosses a wall, the
//! velocity on that axis is turned back toward the inside and the position
//! is moved so the extent touches the wall exactly (minimum translation).

/// Which wall of an axis was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisHit {
    None,
    Low,
    High,
}

impl AxisHit {
    pub fn hit(&self) -> bool {
        *self != AxisHit::None
    }
}

/// Reflect one axis off the walls `lo` and `hi`
///
/// `half_extent` is the distance from the entity center to its edge on this
/// axis. The velocity sign is set to point back inside rather than blindly
/// negated, so an entity already heading inward is never pushed out again.
/// An entity wider than the span is centered.
pub fn reflect_axis(pos: &mut f32, vel: &mut f32, half_extent: f32, lo: f32, hi: f32) -> AxisHit {
    let half_extent = half_extent.max(0.0);

    if 2.0 * half_extent > hi - lo {
        *pos = (lo + hi) / 2.0;
        return AxisHit::None;
    }

    if *pos - half_extent < lo {
        *vel = vel.abs();
        *pos = lo + half_extent;
        AxisHit::Low
    } else if *pos + half_extent > hi {
        *vel = -vel.abs();
        *pos = hi - half_extent;
        AxisHit::High
    } else {
        AxisHit::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_wall() {
        let mut x = -45.0_f32; // 5 - 50 after one second
        let mut xv = -50.0;
        let hit = reflect_axis(&mut x, &mut xv, 10.0, 0.0, 600.0);
        assert_eq!(hit, AxisHit::Low);
        assert_eq!(xv, 50.0);
        assert_eq!(x - 10.0, 0.0);
    }

    #[test]
    fn test_high_wall() {
        let mut x = 598.0_f32;
        let mut xv = 120.0;
        let hit = reflect_axis(&mut x, &mut xv, 10.0, 0.0, 600.0);
        assert_eq!(hit, AxisHit::High);
        assert_eq!(xv, -120.0);
        assert_eq!(x + 10.0, 600.0);
    }

    #[test]
    fn test_inside_untouched() {
        let mut x = 300.0_f32;
        let mut xv = -7.0;
        assert!(!reflect_axis(&mut x, &mut xv, 10.0, 0.0, 600.0).hit());
        assert_eq!((x, xv), (300.0, -7.0));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let mut x = 10.0_f32;
        let mut xv = -1.0;
        assert!(!reflect_axis(&mut x, &mut xv, 10.0, 0.0, 600.0).hit());
        assert_eq!(xv, -1.0);
    }

    #[test]
    fn test_already_heading_inward_keeps_direction() {
        let mut x = -3.0_f32;
        let mut xv = 40.0;
        reflect_axis(&mut x, &mut xv, 0.0, 0.0, 100.0);
        assert_eq!(xv, 40.0);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_oversized_entity_centered() {
        let mut x = 3.0_f32;
        let mut xv = 5.0;
        let hit = reflect_axis(&mut x, &mut xv, 80.0, 0.0, 100.0);
        assert_eq!(hit, AxisHit::None);
        assert_eq!(x, 50.0);
    }
}
