use serde::{Deserialize, Serialize};

/// A trainer and their full party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: u32,
    pub constant_name: String,
    pub name: String,
    pub trainer_class: String,
    pub pic: String,
    pub gender: String,
    pub music: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    pub double_battle: bool,
    pub ai_flags: Vec<String>,
    pub party: Vec<TrainerMon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One party member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerMon {
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ivs: Option<StatSpread>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evs: Option<StatSpread>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shiny: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball: Option<String>,
}

impl TrainerMon {
    pub const DEFAULT_LEVEL: u32 = 100;

    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            nickname: None,
            level: Self::DEFAULT_LEVEL,
            held_item: None,
            moves: None,
            ability: None,
            nature: None,
            ivs: None,
            evs: None,
            shiny: None,
            ball: None,
        }
    }
}

/// IV or EV spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSpread {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

impl StatSpread {
    pub fn uniform(value: u32) -> Self {
        Self {
            hp: value,
            attack: value,
            defense: value,
            sp_attack: value,
            sp_defense: value,
            speed: value,
        }
    }

    /// Set one stat by its party-file abbreviation. Returns false for an
    /// unknown abbreviation.
    pub fn set(&mut self, abbrev: &str, value: u32) -> bool {
        let slot = match abbrev {
            "HP" => &mut self.hp,
            "Atk" => &mut self.attack,
            "Def" => &mut self.defense,
            "SpA" => &mut self.sp_attack,
            "SpD" => &mut self.sp_defense,
            "Spe" => &mut self.speed,
            _ => return false,
        };
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_spread_set() {
        let mut ivs = StatSpread::uniform(31);
        assert!(ivs.set("SpA", 0));
        assert!(!ivs.set("Luck", 5));
        assert_eq!(ivs.sp_attack, 0);
        assert_eq!(ivs.hp, 31);
    }

    #[test]
    fn test_minimal_mon_shape() {
        let json = serde_json::to_value(TrainerMon::new("Poochyena")).unwrap();
        assert_eq!(json, serde_json::json!({ "species": "Poochyena", "level": 100 }));
    }
}
