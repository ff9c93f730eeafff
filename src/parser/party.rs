//! Trainer party file parser.
//!
//! The party file is a flat, line-oriented format:
//!
//! ```text
//! === TRAINER_ROXANNE_1 ===
//! Name: ROXANNE
//! Class: Leader
//! Double Battle: No
//! AI: Check Bad Move / Try To Faint
//!
//! Geodude @ Oran Berry
//! Level: 12
//! Ability: 2
//! - Tackle
//! - Rock Tomb
//! ```
//!
//! Lines are folded through a small state machine: outside any trainer, in a
//! trainer's header, or inside one party member. A new `===` marker or the
//! end of input flushes the pending party member and the pending trainer.

use std::collections::HashMap;

use regex::Regex;

use crate::types::{Species, StatSpread, Trainer, TrainerMon};

use super::constants::ConstantTable;
use super::text::{constant_key, humanize, sanitize_key};

/// Species knowledge the party parser resolves against.
#[derive(Debug, Clone, Default)]
pub struct SpeciesLookup {
    /// Bare constant name (`MR_MIME`) → display name.
    names: HashMap<String, String>,
    /// Sanitized species name → ability list in slot order.
    abilities: HashMap<String, Vec<String>>,
}

impl SpeciesLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add display names from the species constant header.
    pub fn with_constants(mut self, table: &ConstantTable) -> Self {
        for (constant, display) in table.display_names() {
            let bare = constant
                .strip_prefix(table.prefix())
                .unwrap_or(&constant)
                .to_string();
            self.names.insert(bare, display);
        }
        self
    }

    /// Add ability slots from emitted species records.
    pub fn with_species(mut self, species: &[Species]) -> Self {
        for mon in species {
            self.abilities
                .insert(sanitize_key(&mon.name), mon.abilities.clone());
        }
        self
    }

    /// Display name for a species token, or the token as written.
    pub fn species_name(&self, token: &str) -> String {
        let token = token.trim();
        let bare = token.strip_prefix("SPECIES_").unwrap_or(token);
        self.names
            .get(&constant_key(bare))
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }

    /// Resolve a 1-based ability slot for `species`.
    ///
    /// An absent slot falls back to slot 2, then slot 1. Without a matching
    /// species the result is the placeholder `Slot N`.
    pub fn ability_slot(&self, species: &str, slot: usize) -> String {
        let placeholder = || format!("Slot {}", slot);
        let Some(abilities) = self.abilities.get(&sanitize_key(species)) else {
            return placeholder();
        };
        abilities
            .get(slot - 1)
            .or_else(|| abilities.get(1))
            .or_else(|| abilities.first())
            .cloned()
            .unwrap_or_else(placeholder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Outside,
    Header,
    Pokemon,
}

/// A trainer under construction.
#[derive(Debug, Default)]
struct TrainerDraft {
    constant_name: String,
    name: String,
    trainer_class: String,
    pic: String,
    gender: String,
    music: String,
    items: Vec<String>,
    double_battle: bool,
    ai_flags: Vec<String>,
    party: Vec<TrainerMon>,
}

/// Accumulator threaded through the line fold.
struct PartyState {
    phase: Phase,
    draft: TrainerDraft,
    mon: Option<TrainerMon>,
    trainers: Vec<Trainer>,
}

/// Parser for party files.
pub struct PartyParser<'a> {
    trainer_ids: &'a ConstantTable,
    species: &'a SpeciesLookup,
    marker: Regex,
    stat: Regex,
}

impl<'a> PartyParser<'a> {
    pub fn new(trainer_ids: &'a ConstantTable, species: &'a SpeciesLookup) -> Self {
        Self {
            trainer_ids,
            species,
            marker: Regex::new(r"^===\s*(TRAINER_\w+)\s*===").expect("literal pattern is valid"),
            stat: Regex::new(r"(\d+)\s+(HP|Atk|Def|SpA|SpD|Spe)")
                .expect("literal pattern is valid"),
        }
    }

    /// Parse a whole party file into trainers, in source order.
    ///
    /// Trainers with no `Name:`, an empty party, or a constant missing from
    /// the trainer header are dropped.
    pub fn parse(&self, source: &str) -> Vec<Trainer> {
        let initial = PartyState {
            phase: Phase::Outside,
            draft: TrainerDraft::default(),
            mon: None,
            trainers: Vec::new(),
        };

        let mut state = source
            .lines()
            .fold(initial, |state, line| self.step(state, line.trim()));

        self.flush_trainer(&mut state);
        state.trainers
    }

    fn step(&self, mut state: PartyState, line: &str) -> PartyState {
        if line.is_empty() || line.starts_with("/*") || line.starts_with('*') {
            return state;
        }

        if let Some(caps) = self.marker.captures(line) {
            self.flush_trainer(&mut state);
            state.draft = TrainerDraft {
                constant_name: caps[1].to_string(),
                ..Default::default()
            };
            state.phase = Phase::Header;
            return state;
        }

        if state.phase == Phase::Outside {
            return state;
        }

        if let Some(rest) = line.strip_prefix('-') {
            if let Some(mon) = state.mon.as_mut() {
                mon.moves
                    .get_or_insert_with(Vec::new)
                    .push(humanize(rest, "MOVE_"));
            }
            return state;
        }

        let Some((key, value)) = line.split_once(':') else {
            if !line.contains('[') {
                self.start_mon(&mut state, line);
            }
            return state;
        };
        let value = value.trim();

        match key.trim() {
            "Name" => state.draft.name = value.to_string(),
            "Class" => state.draft.trainer_class = value.to_string(),
            "Pic" => state.draft.pic = value.to_string(),
            // Inside a party member this is the member's gender, which is not emitted.
            "Gender" if state.phase == Phase::Header => state.draft.gender = value.to_string(),
            "Music" => state.draft.music = value.to_string(),
            "Items" => state.draft.items = split_list(value),
            "Double Battle" => state.draft.double_battle = value.contains("Yes"),
            "AI" => state.draft.ai_flags = split_list(value),
            field => {
                if let Some(mon) = state.mon.as_mut() {
                    self.apply_mon_field(mon, field, value);
                }
            }
        }
        state
    }

    fn start_mon(&self, state: &mut PartyState, line: &str) {
        if let Some(mon) = state.mon.take() {
            state.draft.party.push(mon);
        }

        let parsed = parse_species_line(line);
        if parsed.species.is_empty() {
            return;
        }

        let mut mon = TrainerMon::new(self.species.species_name(parsed.species));
        mon.nickname = parsed.nickname.map(str::to_string);
        mon.held_item = parsed.item.map(|item| humanize(item, "ITEM_"));
        state.mon = Some(mon);
        state.phase = Phase::Pokemon;
    }

    fn apply_mon_field(&self, mon: &mut TrainerMon, field: &str, value: &str) {
        match field {
            "Level" => {
                if let Ok(level) = value.parse() {
                    mon.level = level;
                }
            }
            "Ability" => mon.ability = Some(self.resolve_ability(&mon.species, value)),
            "Nature" => mon.nature = Some(humanize(value, "NATURE_")),
            "Shiny" => mon.shiny = Some(value.contains("Yes")),
            "Ball" => mon.ball = Some(humanize(value, "ITEM_")),
            "IVs" => mon.ivs = Some(self.parse_spread(value, 31)),
            "EVs" => mon.evs = Some(self.parse_spread(value, 0)),
            _ => {}
        }
    }

    fn resolve_ability(&self, species: &str, value: &str) -> String {
        match value.parse::<usize>() {
            Ok(slot @ 1..=3) => self.species.ability_slot(species, slot),
            _ => humanize(value, "ABILITY_"),
        }
    }

    /// Parse `<int> <Stat>` pairs in any order; unnamed stats keep `default`.
    fn parse_spread(&self, value: &str, default: u32) -> StatSpread {
        let mut spread = StatSpread::uniform(default);
        for caps in self.stat.captures_iter(value) {
            if let Ok(n) = caps[1].parse() {
                spread.set(&caps[2], n);
            }
        }
        spread
    }

    fn flush_trainer(&self, state: &mut PartyState) {
        if let Some(mon) = state.mon.take() {
            state.draft.party.push(mon);
        }
        let draft = std::mem::take(&mut state.draft);
        state.phase = Phase::Outside;

        if draft.name.is_empty() || draft.party.is_empty() {
            return;
        }
        let Some(id) = self.trainer_ids.entity_id(&draft.constant_name) else {
            return;
        };

        state.trainers.push(Trainer {
            id,
            constant_name: draft.constant_name,
            name: draft.name,
            trainer_class: draft.trainer_class,
            pic: draft.pic,
            gender: draft.gender,
            music: draft.music,
            items: (!draft.items.is_empty()).then_some(draft.items),
            double_battle: draft.double_battle,
            ai_flags: draft.ai_flags,
            party: draft.party,
            location: None,
        });
    }
}

/// Pieces of a species line: `Nickname (Species) (F) @ Item`.
#[derive(Debug, PartialEq, Eq)]
struct SpeciesLine<'a> {
    nickname: Option<&'a str>,
    species: &'a str,
    item: Option<&'a str>,
}

fn parse_species_line(line: &str) -> SpeciesLine<'_> {
    let (head, item) = match line.split_once('@') {
        Some((head, item)) => (head, Some(item.trim()).filter(|i| !i.is_empty())),
        None => (line, None),
    };

    let mut head = head.trim();
    while let Some(rest) = head
        .strip_suffix("(M)")
        .or_else(|| head.strip_suffix("(F)"))
    {
        head = rest.trim_end();
    }

    match head.split_once('(') {
        Some((nickname, rest)) => {
            let species = rest.split(')').next().unwrap_or("").trim();
            let nickname = Some(nickname.trim()).filter(|n| !n.is_empty());
            SpeciesLine {
                nickname,
                species,
                item,
            }
        }
        None => SpeciesLine {
            nickname: None,
            species: head,
            item,
        },
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
