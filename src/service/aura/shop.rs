//! Shop catalog.

use chrono::Duration;

use crate::model::aura::{EffectKind, ShopItem};

/// Damage dealt by a detonated bomb.
pub const BOMB_DAMAGE: i64 = 2000;

/// Catalog entry for a purchasable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    pub item: ShopItem,
    pub name: &'static str,
    pub cost: i64,
    pub description: &'static str,
}

/// Returns the catalog entry for an item.
pub fn listing(item: ShopItem) -> Listing {
    match item {
        ShopItem::Shield => Listing {
            item,
            name: "🛡️ Aura Shield",
            cost: 1000,
            description: "Protects against 50% drain damage for 24 hours",
        },
        ShopItem::Multiplier => Listing {
            item,
            name: "⚡ Aura Multiplier",
            cost: 2500,
            description: "2x aura gains for 12 hours",
        },
        ShopItem::Bomb => Listing {
            item,
            name: "💣 Aura Bomb",
            cost: 5000,
            description: "Instantly deal 2000 damage to target (ignores shields)",
        },
    }
}

/// Every listing in display order.
pub fn catalog() -> impl Iterator<Item = Listing> {
    ShopItem::ALL.into_iter().map(listing)
}

/// Timed effect granted on purchase, or `None` for items kept in the inventory.
pub fn effect(item: ShopItem) -> Option<(EffectKind, Duration)> {
    match item {
        ShopItem::Shield => Some((EffectKind::Shield, Duration::hours(24))),
        ShopItem::Multiplier => Some((EffectKind::Multiplier, Duration::hours(12))),
        ShopItem::Bomb => None,
    }
}
