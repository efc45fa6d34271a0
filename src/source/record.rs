use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One row of the Item sheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemRecord {
    pub key: u32,
    /// UI category name
    pub category: String,
    pub name: String,
    pub level: u32,
    pub equip_slots: Vec<String>,
    pub can_be_hq: bool,
    pub is_untradable: bool,
    /// Base vendor price, 0 when unknown
    pub price: u32,
    /// Class/job the item is restricted to, empty when unrestricted
    pub class_job: String,
    pub sources: Vec<ItemSource>,
}

/// Where an item can be obtained
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum ItemSource {
    Recipe,
    RetainerTask,
    Quest,
    Leve,
    GilShop,
    GatheringPoint,
    GcShop,
    FishingSpot,
    FccShop,
    CompanyCraftSequence,
    Achievement,
    SpecialShop {
        #[serde(default)]
        listings: Vec<ShopListing>,
    },
    #[serde(other)]
    Unknown,
}

/// One entry of a special shop: what is handed out and what it costs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopListing {
    pub rewards: Vec<ItemCount>,
    pub costs: Vec<ItemCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ItemCount {
    pub item: u32,
    pub count: u32,
}

/// One row of the Recipe sheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipeRecord {
    pub key: u32,
    pub result_item: u32,
    pub result_count: u32,
    pub ingredients: Vec<ItemCount>,
}

/// One row of the World sheet, accessed by column name
#[derive(Debug, Clone, Deserialize)]
pub struct WorldRow {
    pub key: u32,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl WorldRow {
    /// Look up a column and render it as a string
    pub fn field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(true) => Some("True".to_string()),
            Value::Bool(false) => Some("False".to_string()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_with_sources() {
        let line = r#"{"key":100,"category":"Gladiator's Arm","name":"Iron Sword","level":10,
            "sources":[{"kind":"Recipe","key":5},{"kind":"GilShop"},{"kind":"Mogstation"}]}"#;
        let item: ItemRecord = serde_json::from_str(line).unwrap();

        assert_eq!(item.key, 100);
        assert_eq!(item.price, 0);
        assert!(item.class_job.is_empty());
        assert_eq!(
            item.sources,
            vec![ItemSource::Recipe, ItemSource::GilShop, ItemSource::Unknown]
        );
    }

    #[test]
    fn test_parse_special_shop() {
        let line = r#"{"kind":"SpecialShop","listings":[
            {"rewards":[{"item":100,"count":1}],"costs":[{"item":28,"count":375}]}]}"#;
        let source: ItemSource = serde_json::from_str(line).unwrap();

        match source {
            ItemSource::SpecialShop { listings } => {
                assert_eq!(listings.len(), 1);
                assert_eq!(listings[0].costs[0], ItemCount { item: 28, count: 375 });
            }
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[test]
    fn test_world_field_stringified() {
        let line = r#"{"key":21,"Name":"Ravana","IsPublic":true,"Region":3,"DataCenter":null}"#;
        let row: WorldRow = serde_json::from_str(line).unwrap();

        assert_eq!(row.key, 21);
        assert_eq!(row.field("Name").as_deref(), Some("Ravana"));
        assert_eq!(row.field("IsPublic").as_deref(), Some("True"));
        assert_eq!(row.field("Region").as_deref(), Some("3"));
        assert_eq!(row.field("DataCenter"), None);
        assert_eq!(row.field("Missing"), None);
    }
}
