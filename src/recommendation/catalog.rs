//! The static product catalog.
//!
//! Compiled into the binary and shared by reference; never written after
//! startup, so concurrent reads need no synchronization.

use serde::Serialize;

/// A recommendable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub categories: &'static [&'static str],
}

const PRODUCTS: &[Product] = &[
    Product { id: "OLJCESPC7Z", name: "Sunglasses", categories: &["accessories"] },
    Product { id: "66VCHSJNUP", name: "Tank Top", categories: &["clothing"] },
    Product { id: "1YMWWN1N4O", name: "Watch", categories: &["accessories"] },
    Product { id: "L9ECAV7KIM", name: "Loafers", categories: &["footwear"] },
    Product { id: "2ZYFJ3GM2N", name: "Hairdryer", categories: &["beauty"] },
    Product { id: "0PUK6V6EV0", name: "Candle Holder", categories: &["home"] },
    Product { id: "LS4PSXUNUM", name: "Salt Shaker", categories: &["home"] },
    Product { id: "9SIQT8TOJO", name: "Bamboo Glass Jar", categories: &["home"] },
    Product { id: "6E92ZMYYFZ", name: "Mug", categories: &["home"] },
];

/// Read-only handle over a product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    products: &'static [Product],
}

impl Catalog {
    /// The storefront's built-in catalog.
    pub const fn builtin() -> Self {
        Self { products: PRODUCTS }
    }

    pub const fn from_static(products: &'static [Product]) -> Self {
        Self { products }
    }

    /// Products in catalog order.
    pub fn products(&self) -> &'static [Product] {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'static Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
