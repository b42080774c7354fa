//! Catalog Service - dishes and tables
//!
//! Dish names are unique case-insensitively, prices are finite and
//! non-negative, categories are required. Table numbers are unique positive
//! integers; tables are created free and never deleted.

pub mod image;

pub use image::{dish_image_ref, format_image_name, user_image_ref};

use crate::core::{EngineError, EngineResult, Entity};
use crate::order_money;
use crate::store::Store;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, optional_text, required_text,
};
use shared::models::{
    CATEGORY_ORDER, DiningTable, Dish, DishCreate, DishGroup, DishUpdate, FALLBACK_CATEGORY,
};
use shared::util::prefixed_id;
use std::cmp::Ordering;
use std::sync::Arc;

/// Menu position of a category: known ones first in fixed order, the rest after
fn category_rank(category: &str) -> usize {
    CATEGORY_ORDER
        .iter()
        .position(|known| *known == category)
        .unwrap_or(CATEGORY_ORDER.len())
}

/// Accent- and case-insensitive ordering for display names
fn compare_names(a: &str, b: &str) -> Ordering {
    let key = |s: &str| -> String { s.to_lowercase().chars().map(image::fold_accent).collect() };
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

fn compare_categories(a: &str, b: &str) -> Ordering {
    category_rank(a)
        .cmp(&category_rank(b))
        .then_with(|| compare_names(a, b))
}

fn display_category(dish: &Dish) -> &str {
    if dish.category.trim().is_empty() {
        FALLBACK_CATEGORY
    } else {
        &dish.category
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn validate_price(price: f64) -> EngineResult<f64> {
    if !order_money::is_valid_price(price) {
        return Err(EngineError::InvalidPrice(price));
    }
    Ok(price)
}

fn validate_category(category: &str) -> EngineResult<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(EngineError::MissingCategory);
    }
    required_text(category, "category", MAX_NAME_LEN)
}

/// Dish and table administration
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    // ========== Dishes ==========

    /// All dishes in menu order (category order, then name)
    pub fn list_dishes(&self) -> EngineResult<Vec<Dish>> {
        Ok(self
            .dishes_by_category()?
            .into_iter()
            .flat_map(|group| group.dishes)
            .collect())
    }

    /// Dishes grouped by category, as shown on the menu page
    pub fn dishes_by_category(&self) -> EngineResult<Vec<DishGroup>> {
        let mut groups: Vec<DishGroup> = Vec::new();
        for dish in self.store.dishes()? {
            let category = display_category(&dish).to_string();
            match groups.iter_mut().find(|g| g.category == category) {
                Some(group) => group.dishes.push(dish),
                None => groups.push(DishGroup {
                    category,
                    dishes: vec![dish],
                }),
            }
        }

        groups.sort_by(|a, b| compare_categories(&a.category, &b.category));
        for group in &mut groups {
            group.dishes.sort_by(|a, b| compare_names(&a.name, &b.name));
        }
        Ok(groups)
    }

    pub fn get_dish(&self, dish_id: &str) -> EngineResult<Dish> {
        self.store
            .dishes()?
            .into_iter()
            .find(|d| d.id == dish_id)
            .ok_or_else(|| EngineError::not_found(Entity::Dish, dish_id))
    }

    pub fn add_dish(&self, input: DishCreate) -> EngineResult<Dish> {
        let name = required_text(&input.name, "name", MAX_NAME_LEN)?;
        let mut dishes = self.store.dishes()?;
        if dishes.iter().any(|d| same_name(&d.name, &name)) {
            return Err(EngineError::DuplicateName(name));
        }
        let price = validate_price(input.price)?;
        let category = validate_category(&input.category)?;
        let description =
            optional_text(input.description.as_deref(), "description", MAX_NOTE_LEN)?
                .unwrap_or_default();
        let image_ref = optional_text(input.image_ref.as_deref(), "image_ref", MAX_URL_LEN)?
            .unwrap_or_else(|| dish_image_ref(&name, None));

        let dish = Dish {
            id: prefixed_id('d'),
            name,
            description,
            price,
            category,
            image_ref: Some(image_ref),
        };
        dishes.push(dish.clone());
        self.store.save_dishes(&dishes)?;

        tracing::info!(dish_id = %dish.id, name = %dish.name, price = dish.price, "Dish added");
        Ok(dish)
    }

    /// Same checks as [`add_dish`](Self::add_dish); the dish's own record is
    /// excluded from the duplicate-name check.
    pub fn update_dish(&self, dish_id: &str, patch: DishUpdate) -> EngineResult<Dish> {
        let mut dishes = self.store.dishes()?;
        let index = dishes
            .iter()
            .position(|d| d.id == dish_id)
            .ok_or_else(|| EngineError::not_found(Entity::Dish, dish_id))?;

        let mut dish = dishes[index].clone();
        if let Some(name) = patch.name.as_deref() {
            let name = required_text(name, "name", MAX_NAME_LEN)?;
            if dishes
                .iter()
                .any(|d| d.id != dish_id && same_name(&d.name, &name))
            {
                return Err(EngineError::DuplicateName(name));
            }
            dish.name = name;
        }
        if let Some(price) = patch.price {
            dish.price = validate_price(price)?;
        }
        if let Some(category) = patch.category.as_deref() {
            dish.category = validate_category(category)?;
        }
        if let Some(description) = patch.description.as_deref() {
            dish.description =
                optional_text(Some(description), "description", MAX_NOTE_LEN)?.unwrap_or_default();
        }
        if let Some(image_ref) = patch.image_ref.as_deref() {
            dish.image_ref = optional_text(Some(image_ref), "image_ref", MAX_URL_LEN)?;
        }

        dishes[index] = dish.clone();
        self.store.save_dishes(&dishes)?;

        tracing::info!(dish_id = %dish.id, name = %dish.name, "Dish updated");
        Ok(dish)
    }

    /// Remove a dish. Past orders keep their own snapshots.
    pub fn delete_dish(&self, dish_id: &str) -> EngineResult<Dish> {
        let mut dishes = self.store.dishes()?;
        let index = dishes
            .iter()
            .position(|d| d.id == dish_id)
            .ok_or_else(|| EngineError::not_found(Entity::Dish, dish_id))?;
        let removed = dishes.remove(index);
        self.store.save_dishes(&dishes)?;

        tracing::info!(dish_id = %removed.id, name = %removed.name, "Dish deleted");
        Ok(removed)
    }

    // ========== Tables ==========

    /// Tables sorted by number
    pub fn list_tables(&self) -> EngineResult<Vec<DiningTable>> {
        let mut tables = self.store.tables()?;
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    pub fn get_table(&self, table_id: &str) -> EngineResult<DiningTable> {
        self.store
            .tables()?
            .into_iter()
            .find(|t| t.id == table_id)
            .ok_or_else(|| EngineError::not_found(Entity::Table, table_id))
    }

    /// Create a free table with a unique positive number
    pub fn add_table(&self, number: i64) -> EngineResult<DiningTable> {
        let number = u32::try_from(number)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(EngineError::InvalidNumber(number))?;

        let mut tables = self.store.tables()?;
        if tables.iter().any(|t| t.number == number) {
            return Err(EngineError::DuplicateNumber(number));
        }

        let table = DiningTable::new(prefixed_id('t'), number);
        tables.push(table.clone());
        self.store.save_tables(&tables)?;

        tracing::info!(table_id = %table.id, number, "Table added");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::store::MemoryStore;
    use shared::models::TableStatus;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryStore::new()))
    }

    fn soup(name: &str) -> DishCreate {
        DishCreate {
            name: name.to_string(),
            description: Some("Caldo do dia".to_string()),
            price: 12.0,
            category: "Entradas".to_string(),
            image_ref: None,
        }
    }

    #[test]
    fn test_add_dish_synthesizes_image() {
        let catalog = service();
        let dish = catalog.add_dish(soup("Sopa de Cebola")).unwrap();
        assert!(dish.id.starts_with('d'));
        assert_eq!(dish.image_ref.as_deref(), Some("img/dishes/sopa_de_cebola.jpg"));
        assert_eq!(catalog.get_dish(&dish.id).unwrap(), dish);
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let catalog = service();
        catalog.add_dish(soup("Soup")).unwrap();
        let err = catalog.add_dish(soup("soup")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
        let err = catalog.add_dish(soup("  SOUP ")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
    }

    #[test]
    fn test_add_dish_validation_order() {
        let catalog = service();

        let mut negative = soup("Negative");
        negative.price = -1.0;
        assert_eq!(catalog.add_dish(negative).unwrap_err().kind(), ErrorKind::InvalidPrice);

        let mut nan = soup("Nan");
        nan.price = f64::NAN;
        assert_eq!(catalog.add_dish(nan).unwrap_err().kind(), ErrorKind::InvalidPrice);

        let mut no_category = soup("No Category");
        no_category.category = "   ".to_string();
        assert_eq!(
            catalog.add_dish(no_category).unwrap_err().kind(),
            ErrorKind::MissingCategory
        );

        let mut unnamed = soup("");
        unnamed.price = -1.0;
        assert_eq!(catalog.add_dish(unnamed).unwrap_err().kind(), ErrorKind::InvalidField);

        let mut free = soup("Água da Casa");
        free.price = 0.0;
        assert!(catalog.add_dish(free).is_ok());
    }

    #[test]
    fn test_update_dish_excludes_itself_from_duplicates() {
        let catalog = service();
        let soup_dish = catalog.add_dish(soup("Soup")).unwrap();
        catalog.add_dish(soup("Salad")).unwrap();

        let renamed = catalog
            .update_dish(
                &soup_dish.id,
                DishUpdate {
                    name: Some("SOUP".to_string()),
                    price: Some(14.5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "SOUP");
        assert_eq!(renamed.price, 14.5);
        assert_eq!(renamed.image_ref, soup_dish.image_ref);

        let err = catalog
            .update_dish(
                &soup_dish.id,
                DishUpdate {
                    name: Some("salad".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);

        let err = catalog
            .update_dish("d-missing", DishUpdate::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_dish() {
        let catalog = service();
        let dish = catalog.add_dish(soup("Soup")).unwrap();
        catalog.delete_dish(&dish.id).unwrap();
        assert!(catalog.list_dishes().unwrap().is_empty());
        assert_eq!(
            catalog.delete_dish(&dish.id).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_menu_order() {
        let store = Arc::new(MemoryStore::new());
        let dish = |id: &str, name: &str, category: &str| Dish {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: 1.0,
            category: category.to_string(),
            image_ref: None,
        };
        store
            .save_dishes(&[
                dish("d1", "Suco", "Bebidas"),
                dish("d2", "Pão", ""),
                dish("d3", "Zeppole", "Especiais"),
                dish("d4", "Bruschetta", "Entradas"),
                dish("d5", "Água", "Bebidas"),
                dish("d6", "Ceviche", "Antepastos"),
            ])
            .unwrap();
        let catalog = CatalogService::new(store);

        let groups = catalog.dishes_by_category().unwrap();
        let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Entradas", "Bebidas", "Outros", "Antepastos", "Especiais"]
        );
        let drinks: Vec<&str> = groups[1].dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(drinks, vec!["Água", "Suco"]);

        let flat: Vec<String> = catalog
            .list_dishes()
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(flat, vec!["d4", "d5", "d1", "d2", "d6", "d3"]);
    }

    #[test]
    fn test_add_table() {
        let catalog = service();
        let table = catalog.add_table(21).unwrap();
        assert_eq!(table.status, TableStatus::Free);
        assert_eq!(table.occupant_count, 0);

        assert_eq!(catalog.add_table(21).unwrap_err().kind(), ErrorKind::DuplicateNumber);
        assert_eq!(catalog.add_table(0).unwrap_err().kind(), ErrorKind::InvalidNumber);
        assert_eq!(catalog.add_table(-3).unwrap_err().kind(), ErrorKind::InvalidNumber);

        catalog.add_table(4).unwrap();
        let numbers: Vec<u32> = catalog.list_tables().unwrap().iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![4, 21]);
        assert_eq!(
            catalog.get_table("t-missing").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
