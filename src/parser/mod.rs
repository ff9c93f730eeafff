//! Text parsers for game-project source files.
//!
//! Everything in this module works on `&str` and never touches the
//! filesystem, apart from [`ConstantTable::load`] as a convenience for
//! required headers.
//!
//! # Source formats
//!
//! - Constant headers: `#define SPECIES_BULBASAUR 1`
//! - Struct tables: `[MOVE_POUND] = { .power = 40, ... },`
//! - Learnset tables: `static const u16 sBulbasaurTeachableLearnset[] = { ... };`
//! - Party files: `=== TRAINER_X ===` followed by key-value lines
//!
//! # Usage
//!
//! ```ignore
//! use pokedex::parser::{key_pattern, scan_blocks, NumericField};
//!
//! let pattern = key_pattern("ITEM_");
//! let price = NumericField::new("price");
//! for block in scan_blocks(&source, &pattern) {
//!     println!("{} costs {:?}", block.key, price.read(block.body));
//! }
//! ```

pub mod block;
pub mod constants;
pub mod fields;
pub mod learnset;
pub mod party;
pub mod text;

pub use block::{key_pattern, scan_blocks, Block, Blocks};
pub use constants::ConstantTable;
pub use fields::{has_flag, NumericField, StringField, TokenField};
pub use learnset::{LearnsetParser, LearnsetTable};
pub use party::{PartyParser, SpeciesLookup};
