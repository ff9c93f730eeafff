use serde::{Deserialize, Serialize};

use super::is_false;

/// A move record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub id: u32,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    pub power: u32,
    pub accuracy: u32,
    pub pp: u32,
    pub priority: i32,
    pub target: String,
    pub effect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_effects: Option<Vec<AdditionalEffect>>,
    #[serde(default)]
    pub flags: MoveFlags,
}

/// A secondary effect attached to a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalEffect {
    pub move_effect: String,
    pub chance: u32,
    #[serde(rename = "self")]
    pub affects_user: bool,
}

/// Move flags; only flags set in the source are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub makes_contact: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignores_protect: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub magic_coat_affected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub snatch_affected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub mirror_move_banned: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub kings_rock_affected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub high_crit_ratio: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sound_move: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub punch_move: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub biting_move: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub slicing_move: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ball_bomb_move: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub wind_move: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dance_move: bool,
}
