use serde::{Deserialize, Serialize};

/// One route, cave or forest area with everything found there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    pub name: String,
    pub display_name: String,
    pub trainers: Vec<RouteTrainer>,
    pub items: Vec<RouteItem>,
    pub wild_encounters: WildEncounters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTrainer {
    pub id: u32,
    pub name: String,
    pub trainer_class: String,
    pub constant_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteItem {
    pub item: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WildEncounters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land: Option<Vec<WildMon>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<Vec<WildMon>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fishing: Option<Fishing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rock_smash: Option<Vec<WildMon>>,
}

/// Fishing encounters split by rod tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fishing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_rod: Option<Vec<WildMon>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_rod: Option<Vec<WildMon>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_rod: Option<Vec<WildMon>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WildMon {
    pub species: String,
    pub min_level: u32,
    pub max_level: u32,
}
