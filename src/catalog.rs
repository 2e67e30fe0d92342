use std::fs;
use std::sync::{PoisonError, RwLock};

use serde::Deserialize;
use tracing::{error, info};

use crate::error::Result;
use crate::persona::Persona;

/// One entry of the store catalog. Fields we do not display are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Product {
    pub brand: String,
    pub name: String,
    pub price: f64,
}

/// Read the catalog from an `http(s)://` URL or a local JSON file.
pub fn load(source: &str) -> Result<Vec<Product>> {
    let raw = if source.starts_with("http://") || source.starts_with("https://") {
        reqwest::blocking::get(source)?.error_for_status()?.text()?
    } else {
        fs::read_to_string(source)?
    };

    let products: Vec<Product> = serde_json::from_str(&raw)?;
    Ok(products)
}

/// `<brand> - <name> (₱<price>)` per product, joined by `; `.
pub fn summary(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| format!("{} - {} (₱{})", p.brand, p.name, p.price))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load the catalog and ground the persona on it.
/// Failures are logged and leave the persona untouched.
pub fn load_into(source: &str, persona: &RwLock<Persona>) -> Option<usize> {
    match load(source) {
        Ok(products) => {
            let line = summary(&products);
            persona
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .append_catalog(&line);
            info!(count = products.len(), source, "loaded products for assistant context");
            Some(products.len())
        }
        Err(err) => {
            error!(%err, source, "failed to load product catalog");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ChatError;

    const CATALOG: &str = r#"[
        {"brand": "Nike", "name": "Air Max 90", "price": 5999, "image": "img/airmax.png"},
        {"brand": "Adidas", "name": "Trefoil Cap", "price": 1299.5, "category": "caps"}
    ]"#;

    fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn summary_joins_products_with_semicolons() {
        let products = vec![
            Product { brand: "Nike".into(), name: "Air Max 90".into(), price: 5999.0 },
            Product { brand: "Adidas".into(), name: "Trefoil Cap".into(), price: 1299.5 },
        ];

        assert_eq!(
            summary(&products),
            "Nike - Air Max 90 (₱5999); Adidas - Trefoil Cap (₱1299.5)"
        );
    }

    #[test]
    fn loads_local_file_ignoring_extra_fields() {
        let file = catalog_file(CATALOG);
        let products = load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand, "Nike");
        assert_eq!(products[1].price, 1299.5);
    }

    #[test]
    fn loads_over_http() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/data/products.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CATALOG)
            .create();

        let products = load(&format!("{}/data/products.json", server.url())).unwrap();

        mock.assert();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn load_into_appends_summary_to_persona() {
        let file = catalog_file(CATALOG);
        let persona = RwLock::new(Persona::new("persona"));

        let count = load_into(file.path().to_str().unwrap(), &persona);

        assert_eq!(count, Some(2));
        let text = persona.read().unwrap().text().to_string();
        assert!(text.starts_with("persona"));
        assert!(text.contains("Nike - Air Max 90 (₱5999); Adidas - Trefoil Cap (₱1299.5)"));
    }

    #[test]
    fn missing_file_leaves_persona_unchanged() {
        let persona = RwLock::new(Persona::new("persona"));

        let count = load_into("/definitely/not/here/products.json", &persona);

        assert_eq!(count, None);
        assert_eq!(persona.read().unwrap().text(), "persona");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let file = catalog_file("{not json");
        let err = load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[test]
    fn empty_catalog_still_counts_as_loaded() {
        let file = catalog_file("[]");
        let persona = RwLock::new(Persona::new("persona"));

        let count = load_into(file.path().to_str().unwrap(), &persona);

        assert_eq!(count, Some(0));
        assert!(persona.read().unwrap().text().starts_with("persona\n\nComplete product catalog"));
    }
}
