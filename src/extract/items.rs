//! Item table extraction.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::output::plural;
use crate::parser::{key_pattern, scan_blocks, ConstantTable, NumericField, StringField, TokenField};
use crate::types::{Item, Pocket};

use super::Sources;

/// Parse the item table, sorted by pocket rank then id.
///
/// Items without a name are skipped. Price defaults to 0 and pocket to
/// [`Pocket::Items`].
pub fn parse_items(source: &str, ids: &ConstantTable) -> Vec<Item> {
    let pattern = key_pattern(ids.prefix());
    let name = StringField::new("name", &["ITEM_NAME", "COMPOUND_STRING"]);
    let description = StringField::new("description", &["COMPOUND_STRING", "_"]);
    let price = NumericField::new("price");
    let pocket = TokenField::new("pocket");

    let mut items: Vec<Item> = scan_blocks(source, &pattern)
        .filter_map(|block| {
            let id = ids.entity_id(block.key)?;
            let body = block.body;
            Some(Item {
                id,
                name: name.read(body)?,
                description: description.read(body).unwrap_or_default(),
                price: price.read_u32(body).unwrap_or(0),
                pocket: pocket
                    .read(body)
                    .and_then(|token| token.strip_prefix("POCKET_"))
                    .map(Pocket::from_token)
                    .unwrap_or_default(),
            })
        })
        .collect();

    items.sort_by_key(|item| (item.pocket, item.id));
    items
}

/// Count items per pocket, in pocket order.
pub fn pocket_counts(items: &[Item]) -> BTreeMap<Pocket, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.pocket).or_insert(0) += 1;
    }
    counts
}

/// Read the item header and table and parse them.
pub fn extract(sources: &Sources) -> Result<Vec<Item>> {
    let paths = sources.project().paths();
    let ids = sources.constants(&paths.item_constants, "ITEM_")?;
    let source = sources.required(&paths.items)?;

    let items = parse_items(&source, &ids);
    let printer = sources.printer();
    printer.info("Parsed", &plural(items.len(), "item", "items"));
    for (pocket, count) in pocket_counts(&items) {
        printer.info("", &printer.dim(&format!("{}: {}", pocket.label(), count)));
    }
    Ok(items)
}
