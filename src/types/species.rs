use serde::{Deserialize, Serialize};

/// A species record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: u32,
    pub name: String,
    pub nat_dex_num: u32,
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    pub abilities: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub description: String,
    pub category_name: String,
    pub catch_rate: u32,
    pub exp_yield: u32,
    pub gender_ratio: String,
    pub egg_cycles: u32,
    pub friendship: u32,
    pub growth_rate: String,
    pub egg_groups: Vec<String>,
    pub body_color: String,
    #[serde(default)]
    pub level_up_learnset: Vec<LevelUpMove>,
    #[serde(default)]
    pub teachable_learnset: Vec<String>,
    #[serde(default)]
    pub egg_move_learnset: Vec<String>,
    /// Overlay `modifications` object, copied through as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications: Option<serde_json::Value>,
}

/// Base stats with their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub total: u32,
}

impl BaseStats {
    /// Build stats; `total` is always the sum of the six.
    pub fn new(hp: u32, attack: u32, defense: u32, speed: u32, sp_attack: u32, sp_defense: u32) -> Self {
        Self {
            hp,
            attack,
            defense,
            speed,
            sp_attack,
            sp_defense,
            total: hp + attack + defense + speed + sp_attack + sp_defense,
        }
    }

    pub fn component_sum(&self) -> u32 {
        self.hp + self.attack + self.defense + self.speed + self.sp_attack + self.sp_defense
    }
}

/// A move learned on level-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpMove {
    pub level: u32,
    #[serde(rename = "move")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum() {
        let stats = BaseStats::new(45, 49, 49, 45, 65, 65);
        assert_eq!(stats.total, 318);
        assert_eq!(stats.total, stats.component_sum());
    }

    #[test]
    fn test_level_up_move_field_name() {
        let json = serde_json::to_value(LevelUpMove { level: 1, name: "Tackle".into() }).unwrap();
        assert_eq!(json["move"], "Tackle");
    }
}
