//! Platform collision and contact tests
//!
//! The only physics this game needs: one-way AABB platform landings, the
//! stomp-versus-hurt test for enemy contact, and the patrol edge test that
//! turns skunks around. All pure functions over rects and velocities.

use super::aabb::Aabb;
use crate::consts::PATROL_FOOT_TOLERANCE;

/// One-way platform landing.
///
/// A falling body lands on a platform only when it overlaps the platform and
/// its top edge is still above the platform's top (it came from above, not
/// from the side or below). Returns the corrected y for the body's top edge.
pub fn resolve_landing(body: &Aabb, vel_y: f32, platform: &Aabb) -> Option<f32> {
    if vel_y > 0.0 && body.overlaps(platform) && body.top() < platform.top() {
        Some(platform.top() - body.h)
    } else {
        None
    }
}

/// Stomp test: contact counts as a stomp when the player is falling and its
/// top edge is above the enemy's. Anything else is a hit on the player.
pub fn is_stomp(player: &Aabb, player_vel_y: f32, enemy: &Aabb) -> bool {
    player_vel_y > 0.0 && player.top() < enemy.top()
}

/// Patrol edge test: a skunk standing on `platform` (feet within tolerance
/// of the platform top) turns around once it reaches either x-extent.
pub fn at_patrol_edge(skunk: &Aabb, platform: &Aabb) -> bool {
    let standing = (skunk.bottom() - platform.top()).abs() < PATROL_FOOT_TOLERANCE;
    standing && (skunk.left() <= platform.left() || skunk.right() >= platform.right())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn platform() -> Aabb {
        Aabb::new(100.0, 300.0, 200.0, 50.0)
    }

    #[test]
    fn test_landing_from_above() {
        // Falling body, top above platform top, overlapping
        let body = Aabb::new(150.0, 265.0, 40.0, 40.0);
        let y = resolve_landing(&body, 400.0, &platform());
        assert_eq!(y, Some(260.0));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let body = Aabb::new(150.0, 265.0, 40.0, 40.0);
        assert_eq!(resolve_landing(&body, -400.0, &platform()), None);
    }

    #[test]
    fn test_no_landing_from_below() {
        // Body overlapping but top already below platform top
        let body = Aabb::new(150.0, 320.0, 40.0, 40.0);
        assert_eq!(resolve_landing(&body, 100.0, &platform()), None);
    }

    #[test]
    fn test_no_landing_without_overlap() {
        let body = Aabb::new(400.0, 265.0, 40.0, 40.0);
        assert_eq!(resolve_landing(&body, 400.0, &platform()), None);
    }

    #[test]
    fn test_stomp_requires_falling_from_above() {
        let enemy = Aabb::new(200.0, 265.0, 35.0, 35.0);

        let above = Aabb::new(200.0, 240.0, 40.0, 40.0);
        assert!(is_stomp(&above, 100.0, &enemy));
        assert!(!is_stomp(&above, -100.0, &enemy)); // rising

        let level_with = Aabb::new(180.0, 265.0, 40.0, 40.0);
        assert!(!is_stomp(&level_with, 100.0, &enemy)); // side-on
    }

    #[test]
    fn test_patrol_edge() {
        let p = platform();

        // Mid-platform, standing: no turn
        let mid = Aabb::new(180.0, 265.0, 35.0, 35.0);
        assert!(!at_patrol_edge(&mid, &p));

        // At the left extent
        let left = Aabb::new(100.0, 265.0, 35.0, 35.0);
        assert!(at_patrol_edge(&left, &p));

        // Past the right extent
        let right = Aabb::new(270.0, 265.0, 35.0, 35.0);
        assert!(at_patrol_edge(&right, &p));

        // At the extent but on a different platform (feet too far away)
        let floating = Aabb::new(100.0, 100.0, 35.0, 35.0);
        assert!(!at_patrol_edge(&floating, &p));
    }

    proptest! {
        /// A resolved landing always leaves the body resting exactly on the
        /// platform top, never inside it.
        #[test]
        fn landing_rests_on_top(
            bx in 0.0_f32..400.0,
            by in 200.0_f32..340.0,
            vy in 1.0_f32..1000.0,
        ) {
            let p = platform();
            let body = Aabb::new(bx, by, 40.0, 40.0);
            if let Some(y) = resolve_landing(&body, vy, &p) {
                let settled = Aabb::new(bx, y, 40.0, 40.0);
                prop_assert_eq!(settled.bottom(), p.top());
                prop_assert!(!settled.overlaps(&p));
            }
        }

        /// A rising body never lands, regardless of position.
        #[test]
        fn rising_never_lands(
            bx in 0.0_f32..400.0,
            by in 0.0_f32..400.0,
            vy in -1000.0_f32..=0.0,
        ) {
            let body = Aabb::new(bx, by, 40.0, 40.0);
            prop_assert_eq!(resolve_landing(&body, vy, &platform()), None);
        }
    }
}
