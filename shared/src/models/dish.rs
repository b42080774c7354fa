//! Dish Model

use serde::{Deserialize, Serialize};

/// Category used for dishes saved without one
pub const FALLBACK_CATEGORY: &str = "Outros";

/// Menu ordering of categories; anything else sorts after, alphabetically
pub const CATEGORY_ORDER: [&str; 9] = [
    "Entradas",
    "Saladas",
    "Massas",
    "Aves",
    "Carnes",
    "Peixes",
    "Sobremesas",
    "Bebidas",
    FALLBACK_CATEGORY,
];

/// Dish entity (prato)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    /// Unique, compared case-insensitively
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in currency unit, never negative
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    /// Synthesized from the name when absent
    pub image_ref: Option<String>,
}

/// Update dish payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_ref: Option<String>,
}

/// Dishes of one category, as listed on the menu page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishGroup {
    pub category: String,
    pub dishes: Vec<Dish>,
}
