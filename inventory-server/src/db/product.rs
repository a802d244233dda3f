//! Product Repository
//!
//! Products live in one pretty-printed JSON array on disk. Every operation
//! reads the file, applies its change and writes it back while holding the
//! repository lock, so concurrent requests cannot interleave their
//! read-modify-write cycles.

use std::path::{Path, PathBuf};

use shared::{ProductFields, ProductRecord};
use tokio::sync::Mutex;

use crate::utils::{AppError, AppResult};

/// Fields of a product about to be created
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub fields: ProductFields,
    pub image: Option<String>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Apply to `record`, returning the image filename it replaced
    fn apply(self, record: &mut ProductRecord) -> Option<String> {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        match self.image {
            Some(image) => record.image.replace(image),
            None => None,
        }
    }
}

#[derive(Debug)]
pub struct ProductRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ProductRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn find_all(&self) -> AppResult<Vec<ProductRecord>> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<ProductRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.into_iter().find(|p| p.id == id))
    }

    /// Insert with id = max(existing) + 1
    pub async fn create(&self, product: NewProduct) -> AppResult<ProductRecord> {
        let _guard = self.lock.lock().await;
        let mut products = self.read_all().await?;

        let record = ProductRecord {
            id: next_id(&products),
            name: product.fields.name,
            price: product.fields.price,
            quantity: product.fields.quantity,
            description: product.fields.description,
            image: product.image,
        };
        products.push(record.clone());
        self.write_all(&products).await?;
        Ok(record)
    }

    /// Returns the updated record and the image filename it no longer uses
    pub async fn update(
        &self,
        id: i64,
        patch: ProductPatch,
    ) -> AppResult<(ProductRecord, Option<String>)> {
        let _guard = self.lock.lock().await;
        let mut products = self.read_all().await?;

        let record = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        let replaced_image = patch.apply(record);
        let updated = record.clone();

        self.write_all(&products).await?;
        Ok((updated, replaced_image))
    }

    /// Returns the removed record
    pub async fn delete(&self, id: i64) -> AppResult<ProductRecord> {
        let _guard = self.lock.lock().await;
        let mut products = self.read_all().await?;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        let removed = products.remove(index);

        self.write_all(&products).await?;
        Ok(removed)
    }

    /// Missing file reads as an empty list
    async fn read_all(&self) -> AppResult<Vec<ProductRecord>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::internal(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&json).map_err(|e| {
            AppError::internal(format!("Corrupt data file {}: {}", self.path.display(), e))
        })
    }

    async fn write_all(&self, products: &[ProductRecord]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(products)
            .map_err(|e| AppError::internal(format!("Failed to encode products: {}", e)))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::internal(format!("Failed to create data dir: {}", e)))?;
        }
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            AppError::internal(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

fn next_id(products: &[ProductRecord]) -> i64 {
    products.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_product(name: &str, price: f64, quantity: i64) -> NewProduct {
        NewProduct {
            fields: ProductFields::new(name, price, quantity),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProductRepository::new(temp_dir.path().join("products.json"));
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_continue_from_max() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"id":7,"name":"Old","price":1.0,"quantity":1,"description":"","image":null}]"#,
        )
        .unwrap();
        let repo = ProductRepository::new(&path);

        let first = repo.create(new_product("Pen", 1000.0, 3)).await.unwrap();
        let second = repo.create(new_product("Ink", 5.0, 2)).await.unwrap();
        assert_eq!(first.id, 8);
        assert_eq!(second.id, 9);

        // persisted across instances
        let reopened = ProductRepository::new(&path);
        let ids: Vec<i64> = reopened.find_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProductRepository::new(temp_dir.path().join("products.json"));
        let created = repo
            .create(NewProduct {
                fields: ProductFields::new("Pen", 1000.0, 3).with_description("blue"),
                image: Some("pen_old.png".into()),
            })
            .await
            .unwrap();

        let patch = ProductPatch {
            quantity: Some(10),
            image: Some("pen_new.png".into()),
            ..Default::default()
        };
        let (updated, replaced) = repo.update(created.id, patch).await.unwrap();
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.description, "blue");
        assert_eq!(updated.quantity, 10);
        assert_eq!(updated.image.as_deref(), Some("pen_new.png"));
        assert_eq!(replaced.as_deref(), Some("pen_old.png"));

        let (_, replaced) = repo
            .update(created.id, ProductPatch::default())
            .await
            .unwrap();
        assert_eq!(replaced, None);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProductRepository::new(temp_dir.path().join("products.json"));
        assert!(matches!(
            repo.update(3, ProductPatch::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(repo.delete(3).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_reuse_max_plus_one() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProductRepository::new(temp_dir.path().join("products.json"));
        repo.create(new_product("A", 1.0, 1)).await.unwrap();
        let b = repo.create(new_product("B", 1.0, 1)).await.unwrap();

        let removed = repo.delete(b.id).await.unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        // max + 1 over what is left
        let c = repo.create(new_product("C", 1.0, 1)).await.unwrap();
        assert_eq!(c.id, 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_internal_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.json");
        std::fs::write(&path, "[{").unwrap();
        let repo = ProductRepository::new(&path);
        assert!(matches!(repo.find_all().await, Err(AppError::Internal(_))));
    }
}
