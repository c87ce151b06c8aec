//! House menu loaded on startup

use shared::models::{MenuItemCreate, MenuSection};

fn item(
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    section: MenuSection,
    popular: bool,
) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        category: category.to_string(),
        section,
        is_available: Some(true),
        popular: Some(popular),
        image_url: None,
    }
}

pub fn default_menu() -> Vec<MenuItemCreate> {
    use MenuSection::{Bar, Kitchen};
    vec![
        item("Jollof Rice & Chicken", "Smoky party jollof with grilled chicken", 120.0, "Mains", Kitchen, true),
        item("Banku & Tilapia", "Grilled tilapia with pepper sauce", 150.0, "Mains", Kitchen, false),
        item("Beef Suya", "Spiced skewers with onions", 80.0, "Grills", Kitchen, true),
        item("Kelewele", "Spicy fried plantain", 45.0, "Sides", Kitchen, false),
        item("Mojito", "Rum, mint, lime", 90.0, "Cocktails", Bar, true),
        item("Sobolo Spritz", "Hibiscus, prosecco, ginger", 85.0, "Cocktails", Bar, false),
        item("Hennessy VS", "Bottle service", 1200.0, "Bottles", Bar, false),
        item("Moët & Chandon", "Bottle service", 1500.0, "Bottles", Bar, true),
        item("Club Beer", "Local lager", 25.0, "Beer", Bar, false),
    ]
}
