// src/services/catalog.rs
use serde::Serialize;

/// A purchasable product. The catalog is compiled in and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub category: &'static str,
    pub rating: f64,
}

static PRODUCTS: [Product; 6] = [
    Product {
        id: 1,
        name: "Wireless Headphones",
        description: "Premium noise-cancelling wireless headphones with 30-hour battery life",
        price: 199.99,
        category: "Electronics",
        rating: 4.5,
    },
    Product {
        id: 2,
        name: "Smart Watch",
        description: "Fitness tracker with heart rate monitor and smartphone notifications",
        price: 159.99,
        category: "Electronics",
        rating: 4.3,
    },
    Product {
        id: 3,
        name: "Running Shoes",
        description: "Lightweight running shoes with cushioned soles for maximum comfort",
        price: 89.99,
        category: "Clothing",
        rating: 4.7,
    },
    Product {
        id: 4,
        name: "Coffee Maker",
        description: "Programmable coffee maker with thermal carafe to keep coffee hot",
        price: 79.99,
        category: "Home",
        rating: 4.2,
    },
    Product {
        id: 5,
        name: "Yoga Mat",
        description: "Eco-friendly non-slip yoga mat with carrying strap",
        price: 29.99,
        category: "Fitness",
        rating: 4.6,
    },
    Product {
        id: 6,
        name: "Bluetooth Speaker",
        description: "Waterproof portable speaker with 360° sound",
        price: 129.99,
        category: "Electronics",
        rating: 4.4,
    },
];

/// All products in authoring order.
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

pub fn find(id: u32) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Comma-joined product names, as quoted to the chat assistant.
pub fn product_names() -> String {
    PRODUCTS
        .iter()
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<u32> = products().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products().len());
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find(5).map(|p| p.name), Some("Yoga Mat"));
        assert!(find(42).is_none());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(find(1).unwrap()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Wireless Headphones");
        assert_eq!(json["price"], 199.99);
        assert_eq!(json["category"], "Electronics");
        assert_eq!(json["rating"], 4.5);
    }

    #[test]
    fn product_names_are_comma_joined() {
        let names = product_names();
        assert!(names.starts_with("Wireless Headphones, Smart Watch"));
        assert!(names.ends_with("Bluetooth Speaker"));
    }
}
