//! Compass directions from a facing angle.
//!
//! Yaw `0` faces south and grows clockwise when seen from above, so the
//! sector found by dividing the yaw into 45° slices points opposite the
//! compass heading.

use std::fmt;

/// One of the eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Directions in radial order, clockwise from north.
    pub const RADIAL: [Direction; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Discretizes `yaw` (degrees, any range) into a facing direction.
    ///
    /// Halfway angles round up, so `22.5` falls into the next sector.
    pub fn from_yaw(yaw: f32) -> Self {
        let sector = (f64::from(yaw) / 45.0 + 0.5).floor() as i64;
        let index = sector.rem_euclid(8) as usize;
        Self::RADIAL[index].opposite()
    }

    pub fn opposite(self) -> Self {
        let index = Self::RADIAL.iter().position(|d| *d == self).unwrap_or(0);
        Self::RADIAL[(index + 4) % 8]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::NorthEast => "NORTH_EAST",
            Self::East => "EAST",
            Self::SouthEast => "SOUTH_EAST",
            Self::South => "SOUTH",
            Self::SouthWest => "SOUTH_WEST",
            Self::West => "WEST",
            Self::NorthWest => "NORTH_WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The world axis a subject is facing along: `+Z`, `-X`, `-Z` or `+X`.
pub fn xz_direction(yaw: f32) -> &'static str {
    let yaw = f64::from(yaw).rem_euclid(360.0);
    if !(45.0..315.0).contains(&yaw) {
        "+Z"
    } else if yaw < 135.0 {
        "-X"
    } else if yaw < 225.0 {
        "-Z"
    } else {
        "+X"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_yaws() {
        assert_eq!(Direction::from_yaw(0.0), Direction::South);
        assert_eq!(Direction::from_yaw(90.0), Direction::West);
        assert_eq!(Direction::from_yaw(180.0), Direction::North);
        assert_eq!(Direction::from_yaw(270.0), Direction::East);
        assert_eq!(Direction::from_yaw(-90.0), Direction::East);
    }

    #[test]
    fn test_half_sector_rounds_up() {
        assert_eq!(Direction::from_yaw(22.4), Direction::South);
        assert_eq!(Direction::from_yaw(22.5), Direction::SouthWest);
        assert_eq!(Direction::from_yaw(-22.5), Direction::South);
        assert_eq!(Direction::from_yaw(337.5), Direction::South);
    }

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::RADIAL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn test_xz_direction() {
        assert_eq!(xz_direction(0.0), "+Z");
        assert_eq!(xz_direction(-30.0), "+Z");
        assert_eq!(xz_direction(90.0), "-X");
        assert_eq!(xz_direction(180.0), "-Z");
        assert_eq!(xz_direction(-90.0), "+X");
        assert_eq!(xz_direction(350.0), "+Z");
    }
}
