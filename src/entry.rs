//! Flat, insertion-ready records
//!
//! Fields that the game data marks as absent with 0 or an empty string are
//! `None` here and stored as NULL.

use std::fmt;

/// How an item can be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    Crafted,
    Retainer,
    Quest,
    Leve,
    GilMerchant,
    Gathering,
    GcShop,
    Fishing,
    FcShop,
    FcCraft,
    Achievement,
    SpecialShop,
}

impl Origin {
    /// Tag stored in `item_origins.origin`
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Crafted => "Crafted",
            Origin::Retainer => "Retainer",
            Origin::Quest => "Quest",
            Origin::Leve => "Leve",
            Origin::GilMerchant => "Gil Merchant",
            Origin::Gathering => "Gathering",
            Origin::GcShop => "GC Shop",
            Origin::Fishing => "Fishing",
            Origin::FcShop => "FC Shop",
            Origin::FcCraft => "FC Craft",
            Origin::Achievement => "Achievement",
            Origin::SpecialShop => "Special Shop",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Currency item and amount paid for an item in a special shop. Each field
/// is absent on its own when the listing's cost carries a 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialCurrency {
    pub item_id: Option<u32>,
    pub count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub item_id: u32,
    pub item_type: String,
    pub name: String,
    pub item_level: Option<u32>,
    pub equipment_types: Vec<String>,
    pub origins: Vec<Origin>,
    pub special_currency: Option<SpecialCurrency>,
    pub high_qualityable: bool,
    pub marketable: bool,
    pub gil_price: Option<u32>,
    pub class_job_restriction: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingredient {
    pub ingredient_id: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeEntry {
    pub recipe_id: u32,
    pub crafted_item_id: u32,
    pub crafted_item_count: u32,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldEntry {
    pub world_id: u32,
    pub name: String,
    pub datacenter: String,
    pub is_public: bool,
}
