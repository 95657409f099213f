//! Catalog listing

use anyhow::Result;
use serde::Serialize;

use crate::catalog::{Item, SlotKind};
use crate::cli::output::{OutputFormat, print_formatted};
use crate::variant::Variant;

#[derive(Serialize)]
struct CatalogEntry {
    slot: SlotKind,
    label: &'static str,
    items: &'static [Item],
}

/// Slot kinds to list, in slot order without repeats
fn slot_kinds(variant: Option<Variant>) -> Vec<SlotKind> {
    let all = [SlotKind::Dish, SlotKind::Ingredient, SlotKind::Method];
    let Some(variant) = variant else {
        return all.to_vec();
    };

    let mut kinds = Vec::new();
    for &kind in variant.slots() {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

pub fn run(variant: Option<Variant>, format: OutputFormat) -> Result<()> {
    let entries: Vec<CatalogEntry> = slot_kinds(variant)
        .into_iter()
        .map(|slot| CatalogEntry { slot, label: slot.label(), items: slot.catalog() })
        .collect();

    print_formatted(&entries, format, |entries| {
        entries
            .iter()
            .map(|entry| {
                let items: Vec<String> = entry.items.iter().map(|i| format!("  {}", i)).collect();
                format!("{} ({} items)\n{}", entry.label, entry.items.len(), items.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    });

    Ok(())
}
