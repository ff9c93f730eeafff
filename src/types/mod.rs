//! Emitted record types.
//!
//! Every record serializes to the camelCase JSON shape consumed by the web
//! front-end. Optional fields and unset boolean flags are omitted rather
//! than written as `null`/`false`.

mod ability;
mod item;
mod moves;
mod route;
mod species;
mod trainer;

pub use ability::{Ability, AbilityFlags};
pub use item::{Item, Pocket};
pub use moves::{AdditionalEffect, Move, MoveFlags};
pub use route::{Fishing, RouteData, RouteItem, RouteTrainer, WildEncounters, WildMon};
pub use species::{BaseStats, LevelUpMove, Species};
pub use trainer::{StatSpread, Trainer, TrainerMon};

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
