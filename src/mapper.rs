//! Turns sheet records into entries

use crate::entry::{Ingredient, ItemEntry, Origin, RecipeEntry, SpecialCurrency, WorldEntry};
use crate::error::MappingWarning;
use crate::source::{ItemRecord, ItemSource, RecipeRecord, ShopListing, WorldRow};

pub fn map_item(record: &ItemRecord) -> ItemEntry {
    let (origins, special_currency) = classify_origins(record.key, &record.sources);

    ItemEntry {
        item_id: record.key,
        item_type: record.category.clone(),
        name: record.name.clone(),
        item_level: positive(record.level),
        equipment_types: record.equip_slots.clone(),
        origins,
        special_currency,
        high_qualityable: record.can_be_hq,
        marketable: !record.is_untradable,
        gil_price: positive(record.price),
        class_job_restriction: non_empty(&record.class_job),
    }
}

/// Tag each source with its origin. Unrecognized kinds produce no tag.
/// Special shops also yield the currency the item is bought with.
pub fn classify_origins(
    item_id: u32,
    sources: &[ItemSource],
) -> (Vec<Origin>, Option<SpecialCurrency>) {
    let mut origins = Vec::with_capacity(sources.len());
    let mut special_currency = None;

    for source in sources {
        let origin = match source {
            ItemSource::Recipe => Origin::Crafted,
            ItemSource::RetainerTask => Origin::Retainer,
            ItemSource::Quest => Origin::Quest,
            ItemSource::Leve => Origin::Leve,
            ItemSource::GilShop => Origin::GilMerchant,
            ItemSource::GatheringPoint => Origin::Gathering,
            ItemSource::GcShop => Origin::GcShop,
            ItemSource::FishingSpot => Origin::Fishing,
            ItemSource::FccShop => Origin::FcShop,
            ItemSource::CompanyCraftSequence => Origin::FcCraft,
            ItemSource::Achievement => Origin::Achievement,
            ItemSource::SpecialShop { listings } => {
                if let Some(currency) = find_special_currency(item_id, listings) {
                    special_currency = Some(currency);
                }
                Origin::SpecialShop
            }
            ItemSource::Unknown => continue,
        };
        origins.push(origin);
    }

    (origins, special_currency)
}

/// First cost of the first listing that rewards `item_id`. A matching
/// listing without costs ends the search with no currency.
fn find_special_currency(item_id: u32, listings: &[ShopListing]) -> Option<SpecialCurrency> {
    let listing = listings
        .iter()
        .find(|listing| listing.rewards.iter().any(|reward| reward.item == item_id))?;

    listing.costs.first().map(|cost| SpecialCurrency {
        item_id: positive(cost.item),
        count: positive(cost.count),
    })
}

pub fn map_recipe(record: &RecipeRecord) -> RecipeEntry {
    RecipeEntry {
        recipe_id: record.key,
        crafted_item_id: record.result_item,
        crafted_item_count: record.result_count,
        ingredients: record
            .ingredients
            .iter()
            .map(|i| Ingredient {
                ingredient_id: i.item,
                quantity: i.count,
            })
            .collect(),
    }
}

pub fn map_world(row: &WorldRow) -> Result<WorldEntry, MappingWarning> {
    let name = row.field("Name").ok_or(MappingWarning::MissingField {
        key: row.key,
        field: "Name",
    })?;
    let datacenter = row.field("DataCenter").ok_or(MappingWarning::MissingField {
        key: row.key,
        field: "DataCenter",
    })?;

    Ok(WorldEntry {
        world_id: row.key,
        name,
        datacenter,
        is_public: row.field("IsPublic").as_deref() == Some("True"),
    })
}

fn positive(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ItemCount;
    use std::collections::HashMap;

    fn listing(rewards: &[u32], costs: &[(u32, u32)]) -> ShopListing {
        ShopListing {
            rewards: rewards
                .iter()
                .map(|&item| ItemCount { item, count: 1 })
                .collect(),
            costs: costs
                .iter()
                .map(|&(item, count)| ItemCount { item, count })
                .collect(),
        }
    }

    #[test]
    fn test_no_sources_no_origins() {
        let (origins, currency) = classify_origins(1, &[]);
        assert!(origins.is_empty());
        assert_eq!(currency, None);
    }

    #[test]
    fn test_each_kind_maps_to_one_tag() {
        let cases = [
            (ItemSource::Recipe, "Crafted"),
            (ItemSource::RetainerTask, "Retainer"),
            (ItemSource::Quest, "Quest"),
            (ItemSource::Leve, "Leve"),
            (ItemSource::GilShop, "Gil Merchant"),
            (ItemSource::GatheringPoint, "Gathering"),
            (ItemSource::GcShop, "GC Shop"),
            (ItemSource::FishingSpot, "Fishing"),
            (ItemSource::FccShop, "FC Shop"),
            (ItemSource::CompanyCraftSequence, "FC Craft"),
            (ItemSource::Achievement, "Achievement"),
            (ItemSource::SpecialShop { listings: vec![] }, "Special Shop"),
        ];

        for (source, tag) in cases {
            let (origins, _) = classify_origins(1, &[source]);
            assert_eq!(origins.len(), 1);
            assert_eq!(origins[0].as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_kind_ignored() {
        let (origins, _) = classify_origins(1, &[ItemSource::Unknown, ItemSource::Quest]);
        assert_eq!(origins, vec![Origin::Quest]);
    }

    #[test]
    fn test_duplicates_kept() {
        let (origins, _) = classify_origins(1, &[ItemSource::GilShop, ItemSource::GilShop]);
        assert_eq!(origins, vec![Origin::GilMerchant, Origin::GilMerchant]);
    }

    #[test]
    fn test_special_currency_first_matching_listing() {
        let shop = ItemSource::SpecialShop {
            listings: vec![
                listing(&[7], &[(28, 10)]),
                listing(&[5, 100], &[(28, 375), (29, 1)]),
                listing(&[100], &[(30, 50)]),
            ],
        };
        let (origins, currency) = classify_origins(100, &[shop]);

        assert_eq!(origins, vec![Origin::SpecialShop]);
        assert_eq!(
            currency,
            Some(SpecialCurrency {
                item_id: Some(28),
                count: Some(375),
            })
        );
    }

    #[test]
    fn test_special_currency_zero_cost_fields_absent() {
        let shop = ItemSource::SpecialShop {
            listings: vec![listing(&[100], &[(0, 0)])],
        };
        let (_, currency) = classify_origins(100, &[shop]);
        assert_eq!(
            currency,
            Some(SpecialCurrency {
                item_id: None,
                count: None,
            })
        );

        let shop = ItemSource::SpecialShop {
            listings: vec![listing(&[100], &[(28, 0)])],
        };
        let (_, currency) = classify_origins(100, &[shop]);
        assert_eq!(
            currency,
            Some(SpecialCurrency {
                item_id: Some(28),
                count: None,
            })
        );
    }

    #[test]
    fn test_special_currency_absent_without_match() {
        let shop = ItemSource::SpecialShop {
            listings: vec![listing(&[7], &[(28, 10)])],
        };
        let (origins, currency) = classify_origins(100, &[shop]);

        assert_eq!(origins, vec![Origin::SpecialShop]);
        assert_eq!(currency, None);
    }

    #[test]
    fn test_matching_listing_without_costs_stops_search() {
        let shop = ItemSource::SpecialShop {
            listings: vec![listing(&[100], &[]), listing(&[100], &[(28, 10)])],
        };
        let (_, currency) = classify_origins(100, &[shop]);
        assert_eq!(currency, None);
    }

    #[test]
    fn test_map_item_sentinels_become_none() {
        let record = ItemRecord {
            key: 100,
            category: "Gladiator's Arm".into(),
            name: "Iron Sword".into(),
            level: 10,
            equip_slots: vec!["Main Hand".into()],
            can_be_hq: true,
            is_untradable: false,
            price: 0,
            class_job: String::new(),
            sources: vec![ItemSource::Recipe, ItemSource::GilShop],
        };
        let entry = map_item(&record);

        assert_eq!(entry.item_id, 100);
        assert_eq!(entry.item_level, Some(10));
        assert_eq!(entry.gil_price, None);
        assert_eq!(entry.class_job_restriction, None);
        assert!(entry.marketable);
        assert_eq!(entry.origins, vec![Origin::Crafted, Origin::GilMerchant]);
        assert_eq!(entry.special_currency, None);
    }

    #[test]
    fn test_map_item_level_zero_absent() {
        let entry = map_item(&ItemRecord {
            key: 2,
            is_untradable: true,
            price: 15,
            class_job: "Paladin".into(),
            ..Default::default()
        });

        assert_eq!(entry.item_level, None);
        assert_eq!(entry.gil_price, Some(15));
        assert_eq!(entry.class_job_restriction.as_deref(), Some("Paladin"));
        assert!(!entry.marketable);
    }

    #[test]
    fn test_map_recipe() {
        let entry = map_recipe(&RecipeRecord {
            key: 5,
            result_item: 100,
            result_count: 1,
            ingredients: vec![ItemCount { item: 200, count: 2 }, ItemCount { item: 201, count: 1 }],
        });

        assert_eq!(entry.crafted_item_id, 100);
        assert_eq!(
            entry.ingredients,
            vec![
                Ingredient { ingredient_id: 200, quantity: 2 },
                Ingredient { ingredient_id: 201, quantity: 1 },
            ]
        );
    }

    fn world_row(key: u32, fields: &[(&str, serde_json::Value)]) -> WorldRow {
        WorldRow {
            key,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_map_world() {
        let row = world_row(
            21,
            &[
                ("Name", "Ravana".into()),
                ("DataCenter", "Materia".into()),
                ("IsPublic", true.into()),
            ],
        );
        let entry = map_world(&row).unwrap();

        assert_eq!(entry.name, "Ravana");
        assert_eq!(entry.datacenter, "Materia");
        assert!(entry.is_public);
    }

    #[test]
    fn test_map_world_missing_datacenter() {
        let row = world_row(3, &[("Name", "Test".into())]);
        assert_eq!(
            map_world(&row),
            Err(MappingWarning::MissingField { key: 3, field: "DataCenter" })
        );
    }
}
