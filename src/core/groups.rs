use crate::core::classifier::{is_classic_24k, is_kisagold_992, is_kisagold_999, Classifier};
use crate::core::rows::build_rows;
use crate::domain::model::{Group, Label, PriceMap};

#[derive(Debug, Clone)]
pub struct GroupDefinition {
    pub category_id: String,
    pub label: Label,
    pub classifier: Classifier,
}

impl GroupDefinition {
    pub fn new(category_id: &str, label: &str, classifier: Classifier) -> Self {
        Self {
            category_id: category_id.to_string(),
            label: Label::new(label, label),
            classifier,
        }
    }
}

/// Product lines shown on the price board, in display order.
pub fn default_group_definitions() -> Vec<GroupDefinition> {
    vec![
        GroupDefinition::new("classic-24k", "KISA24", is_classic_24k),
        GroupDefinition::new("kisagold-992", "KISAGOLD 99.2% (Non Brand)", is_kisagold_992),
        GroupDefinition::new("kisagold-999", "KISAGOLD 99.9% (KISA24)", is_kisagold_999),
    ]
}

/// One group per definition, in definition order, leaving out groups with no rows.
pub fn assemble_groups(prices: &PriceMap, definitions: &[GroupDefinition]) -> Vec<Group> {
    definitions
        .iter()
        .map(|def| Group {
            category_id: def.category_id.clone(),
            label: def.label.clone(),
            rows: build_rows(prices, def.classifier),
        })
        .filter(|group| !group.rows.is_empty())
        .collect()
}
