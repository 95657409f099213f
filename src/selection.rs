//! Current roulette selection: one item per slot.

use rand::Rng;
use rand::prelude::IndexedRandom;
use serde::Serialize;

use crate::catalog::{Item, SlotKind};

/// An item placed in a slot, remembering which catalog the slot uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotPick {
    pub kind: SlotKind,
    pub item: Item,
}

/// One pick per active slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    picks: Vec<SlotPick>,
}

impl Selection {
    /// Build the starting selection for a slot layout.
    ///
    /// Slot `i` starts at entry `i` of its catalog.
    pub fn initial(slots: &[SlotKind]) -> Self {
        let picks = slots
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let catalog = kind.catalog();
                SlotPick { kind, item: catalog[i % catalog.len()] }
            })
            .collect();
        Self { picks }
    }

    /// Draw every slot independently and uniformly from its catalog
    pub fn random<R: Rng + ?Sized>(slots: &[SlotKind], rng: &mut R) -> Self {
        let picks = slots
            .iter()
            .map(|&kind| {
                let item = *kind
                    .catalog()
                    .choose(rng)
                    .unwrap_or(&kind.catalog()[0]);
                SlotPick { kind, item }
            })
            .collect();
        Self { picks }
    }

    /// Build a selection from explicit picks
    pub fn from_picks(picks: Vec<SlotPick>) -> Self {
        Self { picks }
    }

    pub fn picks(&self) -> &[SlotPick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Item names in slot order
    pub fn names(&self) -> Vec<&'static str> {
        self.picks.iter().map(|p| p.item.name).collect()
    }

    /// True when every slot has a non-empty name
    pub fn is_complete(&self) -> bool {
        !self.picks.is_empty() && self.picks.iter().all(|p| !p.item.name.is_empty())
    }

    /// True when every pick comes from its own slot's catalog
    pub fn is_valid(&self) -> bool {
        self.picks.iter().all(|p| p.kind.contains(&p.item))
    }

    /// Icons joined for the roulette face, e.g. "🍜 × 🍛"
    pub fn icons_line(&self) -> String {
        self.picks
            .iter()
            .map(|p| p.item.icon)
            .collect::<Vec<_>>()
            .join(" × ")
    }

    /// Names joined for the caption, e.g. "ラーメン × カレー"
    pub fn names_line(&self) -> String {
        self.names().join(" × ")
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.picks.iter().map(|p| p.item.to_string()).collect();
        write!(f, "{}", parts.join(" × "))
    }
}
