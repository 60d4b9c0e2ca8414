//! Hand-authored level tables
//!
//! Three fixed levels. Definitions are static data; `instantiate` turns the
//! platform tuples into runtime rects. Enemy and power-up placement is
//! consumed by `GameState::load_level`, which assigns entity IDs.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::{PowerUpKind, Theme};

/// Static definition of one level
pub struct LevelDef {
    pub name: &'static str,
    pub width: f32,
    pub theme: Theme,
    /// Platform rects as (x, y, w, h)
    pub platforms: &'static [(f32, f32, f32, f32)],
    /// Skunk spawn points (top-left)
    pub skunks: &'static [(f32, f32)],
    /// Power-up placements
    pub power_ups: &'static [(f32, f32, PowerUpKind)],
}

impl LevelDef {
    /// Build the runtime level geometry
    pub fn instantiate(&self) -> Level {
        Level {
            name: self.name.to_string(),
            width: self.width,
            theme: self.theme,
            platforms: self
                .platforms
                .iter()
                .map(|&(x, y, w, h)| Aabb::new(x, y, w, h))
                .collect(),
        }
    }
}

/// Runtime level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub width: f32,
    pub theme: Theme,
    pub platforms: Vec<Aabb>,
}

use PowerUpKind::{Earthquake, Fly, Tsunami};

pub const LEVELS: [LevelDef; 3] = [
    LevelDef {
        name: "Meadow Adventure",
        width: 2400.0,
        theme: Theme::Grass,
        platforms: &[
            (0.0, 350.0, 300.0, 50.0),
            (350.0, 300.0, 200.0, 50.0),
            (600.0, 250.0, 150.0, 50.0),
            (800.0, 350.0, 400.0, 50.0),
            (1250.0, 280.0, 150.0, 50.0),
            (1450.0, 220.0, 200.0, 50.0),
            (1700.0, 320.0, 300.0, 50.0),
            (2050.0, 350.0, 350.0, 50.0),
        ],
        skunks: &[
            (400.0, 265.0),
            (900.0, 315.0),
            (1300.0, 245.0),
            (1500.0, 185.0),
            (1800.0, 285.0),
        ],
        power_ups: &[
            (650.0, 220.0, Earthquake),
            (1100.0, 320.0, Fly),
            (1550.0, 190.0, Tsunami),
        ],
    },
    LevelDef {
        name: "Winter Wonderland",
        width: 2600.0,
        theme: Theme::Snow,
        platforms: &[
            (0.0, 350.0, 250.0, 50.0),
            (300.0, 280.0, 180.0, 50.0),
            (550.0, 220.0, 160.0, 50.0),
            (780.0, 300.0, 200.0, 50.0),
            (1050.0, 240.0, 150.0, 50.0),
            (1280.0, 180.0, 180.0, 50.0),
            (1540.0, 260.0, 200.0, 50.0),
            (1820.0, 320.0, 250.0, 50.0),
            (2150.0, 280.0, 200.0, 50.0),
            (2400.0, 350.0, 200.0, 50.0),
        ],
        skunks: &[
            (350.0, 245.0),
            (600.0, 185.0),
            (1100.0, 205.0),
            (1350.0, 145.0),
            (1600.0, 225.0),
            (1900.0, 285.0),
        ],
        power_ups: &[
            (450.0, 250.0, Fly),
            (950.0, 270.0, Earthquake),
            (1400.0, 150.0, Tsunami),
            (2000.0, 250.0, Fly),
        ],
    },
    LevelDef {
        name: "Frozen Peaks",
        width: 2800.0,
        theme: Theme::Ice,
        platforms: &[
            (0.0, 350.0, 200.0, 50.0),
            (280.0, 290.0, 150.0, 50.0),
            (510.0, 230.0, 120.0, 50.0),
            (710.0, 170.0, 140.0, 50.0),
            (930.0, 250.0, 160.0, 50.0),
            (1170.0, 190.0, 130.0, 50.0),
            (1380.0, 130.0, 150.0, 50.0),
            (1610.0, 210.0, 140.0, 50.0),
            (1830.0, 280.0, 180.0, 50.0),
            (2090.0, 220.0, 160.0, 50.0),
            (2330.0, 160.0, 150.0, 50.0),
            (2560.0, 320.0, 240.0, 50.0),
        ],
        skunks: &[
            (320.0, 255.0),
            (560.0, 195.0),
            (760.0, 135.0),
            (1000.0, 215.0),
            (1220.0, 155.0),
            (1450.0, 95.0),
            (1700.0, 175.0),
            (1950.0, 245.0),
            (2200.0, 185.0),
        ],
        power_ups: &[
            (380.0, 260.0, Earthquake),
            (800.0, 140.0, Fly),
            (1250.0, 160.0, Tsunami),
            (1680.0, 180.0, Fly),
            (2150.0, 190.0, Earthquake),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SPAWN_X, SPAWN_Y, VIEW_WIDTH};

    #[test]
    fn test_three_levels() {
        assert_eq!(LEVELS.len(), 3);
        assert_eq!(LEVELS[0].theme, Theme::Grass);
        assert_eq!(LEVELS[1].theme, Theme::Snow);
        assert_eq!(LEVELS[2].theme, Theme::Ice);
    }

    #[test]
    fn test_levels_wider_than_view() {
        for def in &LEVELS {
            assert!(def.width > VIEW_WIDTH, "{} too narrow", def.name);
        }
    }

    #[test]
    fn test_everything_within_level_bounds() {
        for def in &LEVELS {
            let level = def.instantiate();
            for p in &level.platforms {
                assert!(p.right() <= def.width, "{} platform past edge", def.name);
            }
            for &(x, _) in def.skunks {
                assert!(x >= 0.0 && x < def.width);
            }
            for &(x, _, _) in def.power_ups {
                assert!(x >= 0.0 && x < def.width);
            }
        }
    }

    #[test]
    fn test_spawn_has_ground_below() {
        // The spawn drop must land on the first platform in every level
        for def in &LEVELS {
            let level = def.instantiate();
            let supported = level
                .platforms
                .iter()
                .any(|p| p.spans_x(SPAWN_X + 20.0) && p.top() > SPAWN_Y);
            assert!(supported, "{} has no ground under spawn", def.name);
        }
    }
}
