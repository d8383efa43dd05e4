//! Top/worst seller ranking.

use crate::db::queries::ItemSales;

/// The two bounded seller lists. An item with a very low positive quantity
/// can appear in both when the catalogue is small; no deduplication.
#[derive(Debug, Clone, Default)]
pub struct TopWorstSplit {
    pub top: Vec<ItemSales>,
    pub worst: Vec<ItemSales>,
}

/// Split item performance into top sellers (qty > 0, descending) and worst
/// sellers (everything, ascending, zero-sale items included). Both sorts are
/// stable so ties keep their original relative order.
pub fn split(items: &[ItemSales], limit: usize) -> TopWorstSplit {
    if items.is_empty() {
        return TopWorstSplit::default();
    }

    let mut top: Vec<ItemSales> = items.iter().filter(|i| i.qty > 0).cloned().collect();
    top.sort_by(|a, b| b.qty.cmp(&a.qty));
    top.truncate(limit);

    let mut worst: Vec<ItemSales> = items.to_vec();
    worst.sort_by(|a, b| a.qty.cmp(&b.qty));
    worst.truncate(limit);

    TopWorstSplit { top, worst }
}
