use serde::{Deserialize, Serialize};

use super::is_false;

/// An ability record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub ai_rating: i32,
    #[serde(default)]
    pub flags: AbilityFlags,
}

/// Ability flags; only flags set in the source are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub breakable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cant_be_swapped: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cant_be_traced: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cant_be_suppressed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cant_be_overwritten: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fails_on_max_guard: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flag_serializes_alone() {
        let flags = AbilityFlags {
            cant_be_swapped: true,
            ..Default::default()
        };
        insta::assert_json_snapshot!(flags, @r###"
        {
          "cantBeSwapped": true
        }
        "###);
    }

    #[test]
    fn test_no_flags_serialize_empty() {
        let json = serde_json::to_string(&AbilityFlags::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
