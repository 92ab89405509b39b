use crate::core::classifier::Classifier;
use crate::core::weight::{extract_weight, parse_grams};
use crate::domain::model::{PriceEntry, PriceMap, Row};

fn build_row(key: &str, entry: &PriceEntry) -> Option<(u64, Row)> {
    let weight = extract_weight(key, entry.categories.as_deref())?;
    let grams = parse_grams(&weight)?;
    let buy_price = entry.buy_price?;
    let buyback_price = entry.buyback_price?;

    Some((
        grams,
        Row {
            weight,
            buy_price,
            buyback_price,
        },
    ))
}

/// Rows for every entry accepted by `classifier`, lightest first.
///
/// Entries without both prices or without a gram weight are skipped. Equal
/// weights keep their feed order.
pub fn build_rows(prices: &PriceMap, classifier: Classifier) -> Vec<Row> {
    let mut rows: Vec<(u64, Row)> = prices
        .iter()
        .filter(|(key, _)| classifier(key))
        .filter_map(|(key, entry)| {
            let row = build_row(key, entry);
            if row.is_none() {
                tracing::trace!("Skipping incomplete price entry '{}'", key);
            }
            row
        })
        .collect();

    rows.sort_by_key(|(grams, _)| *grams);
    rows.into_iter().map(|(_, row)| row).collect()
}
