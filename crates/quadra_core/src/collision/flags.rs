//! Collision flag byte.
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! [tile ] [ signal  ] [ detect  ]
//! ```

use bitflags::bitflags;
use quadra_shared::constants::{COLLISION_DETECT_BITS, COLLISION_SIGNAL_BITS, COLLISION_TILE_BITS};

bitflags! {
    /// Collision teams. Three bits, matching the flag byte fields.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Teams: u8 {
        /// Player side.
        const ALLY = 0b001;
        /// Hostile side.
        const ENEMY = 0b010;
        /// Third team bit, for shapes on neither side. Filtered like any other team.
        const NEUTRAL = 0b100;
    }
}

/// How a shape interacts with the tilemap. Also the bit mask tested
/// against a tile quadrant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileCollision {
    /// Ignores the map.
    #[default]
    None = 0,
    /// Blocked by ground obstacles.
    Ground = 1,
    /// Blocked by air obstacles.
    Air = 2,
    /// Blocked by both.
    All = 3,
}

impl TileCollision {
    /// Decodes the low two bits.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::None,
            1 => Self::Ground,
            2 => Self::Air,
            _ => Self::All,
        }
    }

    /// The two-bit mask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

const SIGNAL_SHIFT: u8 = COLLISION_SIGNAL_BITS.trailing_zeros() as u8;
const TILE_SHIFT: u8 = COLLISION_TILE_BITS.trailing_zeros() as u8;

/// Packed detector teams, signal teams and tilemap collision type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CollisionFlags(u8);

impl CollisionFlags {
    /// Packs the three fields.
    #[must_use]
    pub const fn new(detect: Teams, signal: Teams, tile: TileCollision) -> Self {
        Self(
            (detect.bits() & COLLISION_DETECT_BITS)
                | ((signal.bits() << SIGNAL_SHIFT) & COLLISION_SIGNAL_BITS)
                | ((tile.bits() << TILE_SHIFT) & COLLISION_TILE_BITS),
        )
    }

    /// Wraps a raw flag byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw flag byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Teams this shape reacts to.
    #[must_use]
    pub const fn detect(self) -> Teams {
        Teams::from_bits_truncate(self.0 & COLLISION_DETECT_BITS)
    }

    /// Teams this shape broadcasts.
    #[must_use]
    pub const fn signal(self) -> Teams {
        Teams::from_bits_truncate((self.0 & COLLISION_SIGNAL_BITS) >> SIGNAL_SHIFT)
    }

    /// Tilemap collision type.
    #[must_use]
    pub const fn tile(self) -> TileCollision {
        TileCollision::from_bits((self.0 & COLLISION_TILE_BITS) >> TILE_SHIFT)
    }

    /// Whether this shape reacts to `other`'s signal.
    #[inline]
    #[must_use]
    pub fn detects(self, other: Self) -> bool {
        self.detect().intersects(other.signal())
    }

    /// Team prefilter: does this pair need a geometry test at all?
    #[inline]
    #[must_use]
    pub fn should_test(self, other: Self) -> bool {
        other.detects(self) || self.detects(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_layout() {
        let flags = CollisionFlags::new(Teams::ALLY, Teams::ENEMY, TileCollision::Air);
        assert_eq!(flags.bits(), 0b10_010_001);
        assert_eq!(flags.detect(), Teams::ALLY);
        assert_eq!(flags.signal(), Teams::ENEMY);
        assert_eq!(flags.tile(), TileCollision::Air);
    }

    #[test]
    fn test_raw_roundtrip() {
        let flags = CollisionFlags::from_bits(0xFF);
        assert_eq!(flags.detect(), Teams::all());
        assert_eq!(flags.signal(), Teams::all());
        assert_eq!(flags.tile(), TileCollision::All);
    }

    #[test]
    fn test_should_test_either_direction() {
        let bullet = CollisionFlags::new(Teams::ENEMY, Teams::empty(), TileCollision::None);
        let enemy = CollisionFlags::new(Teams::empty(), Teams::ENEMY, TileCollision::None);
        let ally = CollisionFlags::new(Teams::empty(), Teams::ALLY, TileCollision::None);

        assert!(bullet.should_test(enemy));
        assert!(enemy.should_test(bullet));
        assert!(!bullet.should_test(ally));
        assert!(!enemy.should_test(ally));
    }

    #[test]
    fn test_neutral_is_an_ordinary_team() {
        let crate_box = CollisionFlags::new(Teams::empty(), Teams::NEUTRAL, TileCollision::None);
        let ally = CollisionFlags::new(Teams::ENEMY, Teams::ALLY, TileCollision::None);
        let enemy = CollisionFlags::new(Teams::ALLY, Teams::ENEMY, TileCollision::None);
        let scavenger = CollisionFlags::new(Teams::NEUTRAL, Teams::empty(), TileCollision::None);

        assert!(!crate_box.should_test(ally));
        assert!(!crate_box.should_test(enemy));
        assert!(crate_box.should_test(scavenger));
    }
}
