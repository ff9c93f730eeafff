use serde::{Deserialize, Serialize};

/// Bag pocket. Declaration order is the emitted sort rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pocket {
    #[default]
    #[serde(rename = "Items")]
    Items,
    #[serde(rename = "Poké Balls")]
    PokeBalls,
    #[serde(rename = "TMs & HMs")]
    TmHm,
    #[serde(rename = "Berries")]
    Berries,
    #[serde(rename = "Key Items")]
    KeyItems,
}

impl Pocket {
    pub const ALL: [Pocket; 5] = [
        Pocket::Items,
        Pocket::PokeBalls,
        Pocket::TmHm,
        Pocket::Berries,
        Pocket::KeyItems,
    ];

    /// Map a `POCKET_*` token suffix; unknown pockets fall back to `Items`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "POKE_BALLS" => Pocket::PokeBalls,
            "TM_HM" => Pocket::TmHm,
            "BERRIES" => Pocket::Berries,
            "KEY_ITEMS" => Pocket::KeyItems,
            _ => Pocket::Items,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pocket::Items => "Items",
            Pocket::PokeBalls => "Poké Balls",
            Pocket::TmHm => "TMs & HMs",
            Pocket::Berries => "Berries",
            Pocket::KeyItems => "Key Items",
        }
    }
}

/// An item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: u32,
    pub pocket: Pocket,
}
