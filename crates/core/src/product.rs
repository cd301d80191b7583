//! Product records as returned by the remote catalog.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Price, ProductId};

/// One catalog item.
///
/// Accepts both the English field names and the ones used by the hosted
/// catalog (`producto`, `categoria`, `descripcion`, `precio`, `avatar`).
/// A missing or `null` name or category reads as an empty string, and numbers
/// or booleans there are read as their text. A missing or `null` price is
/// zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(default, alias = "producto", deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, alias = "categoria", deserialize_with = "nullable_string")]
    pub category: String,
    #[serde(default, alias = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "precio", deserialize_with = "nullable_price")]
    pub price: Price,
    #[serde(
        default,
        alias = "avatar",
        alias = "image_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// Whether the lower-cased name or category contains `needle`.
    ///
    /// `needle` must already be trimmed and lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }

    /// The description, or `None` when it is missing or blank.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Scalar accepted where text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<LooseText> for String {
    fn from(value: LooseText) -> Self {
        match value {
            LooseText::Text(text) => text,
            LooseText::Integer(n) => n.to_string(),
            LooseText::Float(n) => n.to_string(),
            LooseText::Bool(b) => b.to_string(),
        }
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<LooseText>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn nullable_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
    Ok(Option::<Price>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_fields() {
        let json = r#"{
            "id": "3",
            "producto": "Mate de calabaza",
            "categoria": "Bazar",
            "descripcion": "Curado a mano",
            "precio": 8500,
            "avatar": "https://img.example/mate.jpg",
            "createdAt": "2025-01-01T00:00:00.000Z"
        }"#;

        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "3");
        assert_eq!(record.name, "Mate de calabaza");
        assert_eq!(record.category, "Bazar");
        assert_eq!(record.description(), Some("Curado a mano"));
        assert_eq!(record.price.display(), "$8.500,00");
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://img.example/mate.jpg")
        );
    }

    #[test]
    fn test_deserialize_english_fields() {
        let json = r#"{"id": 9, "name": "Lamp", "category": "Home", "price": "19.90", "imageUrl": "x.png"}"#;

        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "9");
        assert_eq!(record.name, "Lamp");
        assert_eq!(record.image_url.as_deref(), Some("x.png"));
        assert_eq!(record.description(), None);
    }

    #[test]
    fn test_missing_and_null_text_fields() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": "1", "producto": null}"#).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.category, "");
        assert_eq!(record.price, Price::ZERO);
    }

    #[test]
    fn test_null_price_is_zero() {
        let records: Vec<ProductRecord> = serde_json::from_str(
            r#"[
                {"id": "1", "producto": "Mate", "precio": null},
                {"id": "2", "producto": "Termo", "precio": "4500"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, Price::ZERO);
        assert_eq!(records[1].price.display(), "$4.500,00");
    }

    #[test]
    fn test_scalar_text_fields_become_strings() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": "1", "producto": 1234, "categoria": 3, "precio": 10}"#,
        )
        .unwrap();
        assert_eq!(record.name, "1234");
        assert_eq!(record.category, "3");
        assert!(record.matches("3"));

        let record: ProductRecord =
            serde_json::from_str(r#"{"id": "2", "producto": true, "categoria": 2.5}"#).unwrap();
        assert_eq!(record.name, "true");
        assert_eq!(record.category, "2.5");
    }

    #[test]
    fn test_matches_name_or_category() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": "1", "producto": "Yerba Orgánica", "categoria": "Almacén"}"#,
        )
        .unwrap();

        assert!(record.matches("yerba"));
        assert!(record.matches("almac"));
        assert!(!record.matches("bazar"));
    }

    #[test]
    fn test_blank_description_is_none() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": "1", "descripcion": "   "}"#).unwrap();
        assert_eq!(record.description(), None);
    }
}
