//! Product Model

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money;

/// Product entity as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub description: String,
    /// Stored image filename, served under `/uploads/`
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductRecord {
    /// `price × quantity`, derived and never stored
    pub fn total(&self) -> f64 {
        money::line_total(self.price, self.quantity)
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Case-insensitive substring match over name and description.
    ///
    /// `term` must already be lowercased; an empty term matches everything.
    pub fn matches_lowercase(&self, term: &str) -> bool {
        term.is_empty()
            || self.name.to_lowercase().contains(term)
            || self.description.to_lowercase().contains(term)
    }

    /// Case-insensitive substring match over name and description
    pub fn matches(&self, term: &str) -> bool {
        self.matches_lowercase(&term.to_lowercase())
    }
}

/// Form submission payload (create and update share it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub description: String,
}

impl ProductFields {
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Copy with name and description trimmed
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            price: self.price,
            quantity: self.quantity,
            description: self.description.trim().to_string(),
        }
    }

    /// Presence and non-negativity checks
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_price(self.price)?;
        validate_quantity(self.quantity)
    }
}

impl From<&ProductRecord> for ProductFields {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            price: record.price,
            quantity: record.quantity,
            description: record.description.clone(),
        }
    }
}

pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::NonFinitePrice);
    }
    if price < 0.0 {
        return Err(ValidationError::NegativePrice);
    }
    Ok(())
}

pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 0 {
        return Err(ValidationError::NegativeQuantity);
    }
    Ok(())
}

/// Aggregate statistics over a product list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    pub count: usize,
    pub total_value: f64,
}

impl ProductStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ProductRecord>) -> Self {
        let mut count = 0;
        let total_value = money::sum_line_totals(records.into_iter().map(|record| {
            count += 1;
            (record.price, record.quantity)
        }));
        Self { count, total_value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, price: f64, quantity: i64, description: &str) -> ProductRecord {
        ProductRecord {
            id,
            name: name.to_string(),
            price,
            quantity,
            description: description.to_string(),
            image: None,
        }
    }

    #[test]
    fn test_deserialize_server_shape() {
        let json = r#"[{"id":1,"name":"Pen","price":1000,"quantity":3,"description":""}]"#;
        let records: Vec<ProductRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 1000.0);
        assert_eq!(records[0].image, None);
        assert_eq!(records[0].total(), 3000.0);
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let json = r#"{"id":2,"name":"Ink","price":2.5,"quantity":4,"image":"ink_20240101_120000.png"}"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description, "");
        assert!(record.has_image());
        assert_eq!(record.total(), 10.0);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let pen = record(1, "Blue Pen", 1.0, 1, "Writes SMOOTHLY");
        assert!(pen.matches("blue"));
        assert!(pen.matches("PEN"));
        assert!(pen.matches("smooth"));
        assert!(pen.matches(""));
        assert!(!pen.matches("pencil"));
    }

    #[test]
    fn test_stats_sum_totals() {
        let records = vec![
            record(1, "Pen", 1000.0, 3, ""),
            record(2, "Ink", 0.1, 3, ""),
            record(3, "Pad", 5.0, 0, ""),
        ];
        let stats = ProductStats::from_records(&records);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_value, 3000.3);

        let empty = ProductStats::from_records(&Vec::<ProductRecord>::new());
        assert_eq!(empty, ProductStats::default());
    }

    #[test]
    fn test_stats_with_huge_values() {
        let records = vec![
            record(1, "Vault", 1e20, 10_000_000_000, ""),
            record(2, "Planet", 1e30, 2, ""),
        ];
        assert_eq!(records[0].total(), 1e30);
        assert_eq!(records[1].total(), 2e30);

        let stats = ProductStats::from_records(&records);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_value, 1e30 + 2e30);

        let max = vec![record(1, "Bulk", 1.0, i64::MAX, "")];
        assert_eq!(ProductStats::from_records(&max).total_value, i64::MAX as f64);
    }

    #[test]
    fn test_validate() {
        assert!(ProductFields::new("Pen", 0.0, 0).validate().is_ok());
        assert_eq!(
            ProductFields::new("   ", 1.0, 1).validate(),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            ProductFields::new("Pen", -0.5, 1).validate(),
            Err(ValidationError::NegativePrice)
        );
        assert_eq!(
            ProductFields::new("Pen", f64::NAN, 1).validate(),
            Err(ValidationError::NonFinitePrice)
        );
        assert_eq!(
            ProductFields::new("Pen", 1.0, -1).validate(),
            Err(ValidationError::NegativeQuantity)
        );
    }

    #[test]
    fn test_normalized_trims() {
        let fields = ProductFields::new("  Pen ", 1.0, 2).with_description(" blue\n");
        let normalized = fields.normalized();
        assert_eq!(normalized.name, "Pen");
        assert_eq!(normalized.description, "blue");
    }
}
