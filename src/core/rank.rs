//! Buyer ranks - cosmetic titles earned by cumulative spend.

/// A rank threshold: reaching `minimum` total spend grants `name`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rank {
    /// Minimum cumulative spend
    pub minimum: f64,
    /// Display name
    pub name: &'static str,
    /// Emoji shown next to the name
    pub emoji: &'static str,
}

/// Rank of a buyer who has not reached the first threshold.
pub const NEW_BUYER: Rank = Rank {
    minimum: 0.0,
    name: "New",
    emoji: "🆕",
};

const fn rank(minimum: f64, name: &'static str, emoji: &'static str) -> Rank {
    Rank {
        minimum,
        name,
        emoji,
    }
}

/// Thresholds in ascending order.
pub const RANKS: [Rank; 23] = [
    rank(0.50, "Grateful", "🤍"),
    rank(1.00, "Beloved", "❤️"),
    rank(1.50, "Special", "💛"),
    rank(2.00, "Premium", "💚"),
    rank(2.50, "Elite", "💜"),
    rank(3.00, "King", "👑"),
    rank(3.50, "Master", "🔥"),
    rank(4.00, "Tycoon", "💼"),
    rank(4.50, "Diamond", "💎"),
    rank(5.00, "Legend", "🦅"),
    rank(7.00, "Titan", "⭐"),
    rank(9.00, "Supreme", "⚡"),
    rank(11.00, "Dominant", "🦂"),
    rank(13.00, "Immortal", "🌙"),
    rank(15.00, "Magnate", "💰"),
    rank(17.00, "Ultra", "💠"),
    rank(19.00, "Colossal", "🗿"),
    rank(21.00, "Divine", "🪽"),
    rank(23.00, "Apex", "🐺"),
    rank(25.00, "Legendary", "🐉"),
    rank(27.00, "Mythic", "🔱"),
    rank(29.00, "Omniscient", "🌀"),
    rank(30.00, "Market God", "👑🔥"),
];

/// The highest rank whose threshold `total` reaches.
#[must_use]
pub fn rank_for(total: f64) -> Rank {
    RANKS
        .iter()
        .rev()
        .find(|rank| total >= rank.minimum)
        .copied()
        .unwrap_or(NEW_BUYER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_ascending() {
        assert!(RANKS.windows(2).all(|w| w[0].minimum < w[1].minimum));
    }

    #[test]
    fn test_rank_for() {
        assert_eq!(rank_for(0.0).name, "New");
        assert_eq!(rank_for(0.49).name, "New");
        assert_eq!(rank_for(0.50).name, "Grateful");
        assert_eq!(rank_for(6.99).name, "Legend");
        assert_eq!(rank_for(7.0).name, "Titan");
        assert_eq!(rank_for(30.0).name, "Market God");
        assert_eq!(rank_for(1_000.0).emoji, "👑🔥");
    }

    #[test]
    fn test_negative_totals_are_new() {
        assert_eq!(rank_for(-5.0), NEW_BUYER);
    }
}
