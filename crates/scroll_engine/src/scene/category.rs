//! Node categories for command addressing and collision filtering
//!
//! Every node reports a [`Category`]. Commands target all nodes whose
//! category intersects the command's mask, and only nodes with a non-empty
//! category take part in collision detection. Categories are never used to
//! branch on behavior inside a node.

use bitflags::bitflags;

bitflags! {
    /// Category bitmask shared by every node type
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Category: u32 {
        /// Layer node that owns aircraft, projectiles and pickups
        const SCENE_AIR_LAYER = 1 << 0;
        /// The aircraft controlled by the player
        const PLAYER_AIRCRAFT = 1 << 1;
        /// Friendly escort aircraft
        const ALLIED_AIRCRAFT = 1 << 2;
        /// Hostile aircraft
        const ENEMY_AIRCRAFT = 1 << 3;
        /// Collectible power-up
        const PICKUP = 1 << 4;
        /// Bullet or missile fired by the player's side
        const ALLIED_PROJECTILE = 1 << 5;
        /// Bullet fired by an enemy
        const ENEMY_PROJECTILE = 1 << 6;

        /// Any aircraft
        const AIRCRAFT = Self::PLAYER_AIRCRAFT.bits()
            | Self::ALLIED_AIRCRAFT.bits()
            | Self::ENEMY_AIRCRAFT.bits();
        /// Any projectile
        const PROJECTILE = Self::ALLIED_PROJECTILE.bits() | Self::ENEMY_PROJECTILE.bits();
    }
}

impl Category {
    /// No category: not addressable by commands and never collides
    pub const NONE: Self = Self::empty();

    /// True when this category shares at least one flag with `mask`
    pub fn matches(self, mask: Self) -> bool {
        self.intersects(mask)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_categories() {
        assert!(Category::ENEMY_AIRCRAFT.matches(Category::AIRCRAFT));
        assert!(Category::PLAYER_AIRCRAFT.matches(Category::AIRCRAFT));
        assert!(!Category::PICKUP.matches(Category::AIRCRAFT));
        assert!(Category::ENEMY_PROJECTILE.matches(Category::PROJECTILE));
    }

    #[test]
    fn test_none_matches_nothing() {
        assert!(!Category::NONE.matches(Category::all()));
        assert!(!Category::PICKUP.matches(Category::NONE));
    }
}
