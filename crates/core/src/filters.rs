//! Reward list helpers: aggregation and gold exclusion.

use std::collections::HashMap;

use crate::item::RawRewardItem;

/// Identifier fragments that denote gold / event-scaling currency.
const GOLD_MARKERS: &[&str] = &["eventcurrency_scaling", "eventscaling"];

/// Sum quantities of identical identifiers.
///
/// Output keeps the order of first occurrence and holds each identifier
/// once. The input is not modified.
pub fn aggregate(items: &[RawRewardItem]) -> Vec<RawRewardItem> {
    let mut out: Vec<RawRewardItem> = Vec::with_capacity(items.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        match index.get(item.item_type.as_str()) {
            Some(&i) => out[i].quantity += item.quantity,
            None => {
                index.insert(&item.item_type, out.len());
                out.push(item.clone());
            }
        }
    }
    out
}

pub fn is_gold(item_type: &str) -> bool {
    let lower = item_type.to_ascii_lowercase();
    GOLD_MARKERS.iter().any(|m| lower.contains(m))
}

/// Drop gold entries. Only used for base-reward (160 zone) listings.
pub fn exclude_gold(items: &[RawRewardItem]) -> Vec<RawRewardItem> {
    items
        .iter()
        .filter(|i| !is_gold(&i.item_type))
        .cloned()
        .collect()
}

pub fn total_quantity(items: &[RawRewardItem]) -> u64 {
    items.iter().map(|i| i.quantity).sum()
}
