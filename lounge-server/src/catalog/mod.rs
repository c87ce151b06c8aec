//! Menu catalog
//!
//! In-memory menu store. Reads return clones; every mutation takes the
//! write lock once so it applies fully or not at all.

mod seed;

use chrono::Utc;
use parking_lot::RwLock;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery};
use shared::money;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::admin::filters;
use crate::utils::{AppError, AppResult, ErrorCode};

pub use seed::default_menu;

#[derive(Debug)]
pub struct MenuCatalog {
    items: RwLock<Vec<MenuItem>>,
    next_id: AtomicI64,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {} not found", id))
        .with_detail("id", id)
}

impl MenuCatalog {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Catalog pre-filled with the house menu
    pub fn with_items(items: Vec<MenuItemCreate>) -> AppResult<Self> {
        let catalog = Self::new();
        for item in items {
            catalog.create(item)?;
        }
        Ok(catalog)
    }

    /// All items, in insertion order
    pub fn all(&self) -> Vec<MenuItem> {
        self.items.read().clone()
    }

    /// Items matching the optional category filter and name search
    pub fn list(&self, query: &MenuQuery) -> Vec<MenuItem> {
        let items = self.items.read();
        filters::filter_menu(&items, query.category.as_deref(), query.search.as_deref())
    }

    pub fn get(&self, id: i64) -> AppResult<MenuItem> {
        self.items
            .read()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub fn count(&self) -> usize {
        self.items.read().len()
    }

    pub fn create(&self, payload: MenuItemCreate) -> AppResult<MenuItem> {
        money::validate_price(payload.price)?;

        let now = Utc::now();
        let item = MenuItem {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: payload.name.trim().to_string(),
            description: payload.description,
            price: payload.price,
            category: payload.category.trim().to_string(),
            section: payload.section,
            is_available: payload.is_available.unwrap_or(true),
            popular: payload.popular.unwrap_or(false),
            image_url: payload.image_url,
            created_at: now,
            updated_at: now,
        };

        self.items.write().push(item.clone());
        tracing::info!(id = item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    pub fn update(&self, id: i64, payload: MenuItemUpdate) -> AppResult<MenuItem> {
        if let Some(price) = payload.price {
            money::validate_price(price)?;
        }

        let mut items = self.items.write();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = payload.name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = payload.description {
            item.description = Some(description);
        }
        if let Some(price) = payload.price {
            item.price = price;
        }
        if let Some(category) = payload.category {
            item.category = category.trim().to_string();
        }
        if let Some(section) = payload.section {
            item.section = section;
        }
        if let Some(is_available) = payload.is_available {
            item.is_available = is_available;
        }
        if let Some(popular) = payload.popular {
            item.popular = popular;
        }
        if let Some(image_url) = payload.image_url {
            item.image_url = Some(image_url);
        }
        item.updated_at = Utc::now();

        Ok(item.clone())
    }

    pub fn delete(&self, id: i64) -> AppResult<MenuItem> {
        let mut items = self.items.write();
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = items.remove(idx);
        tracing::info!(id, name = %removed.name, "Menu item deleted");
        Ok(removed)
    }

    pub fn set_availability(&self, id: i64, is_available: bool) -> AppResult<MenuItem> {
        self.update(
            id,
            MenuItemUpdate {
                is_available: Some(is_available),
                ..Default::default()
            },
        )
    }

    pub fn set_popular(&self, id: i64, popular: bool) -> AppResult<MenuItem> {
        self.update(
            id,
            MenuItemUpdate {
                popular: Some(popular),
                ..Default::default()
            },
        )
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::new()
    }
}
