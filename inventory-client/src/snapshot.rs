// inventory-client/src/snapshot.rs
// 本地快照 - 服务器不可达时的只读展示数据

use serde::{Deserialize, Serialize};
use shared::ProductRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Last successfully loaded product list plus the next-id counter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<ProductRecord>,
    pub next_id: i64,
}

impl Snapshot {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().map_or(1, |max| max + 1);
        Self { products, next_id }
    }
}

/// JSON file holding a [`Snapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotStorage {
    path: PathBuf,
}

impl SnapshotStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 确保目录存在
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, snapshot: &Snapshot) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)
    }

    /// Missing or unreadable files yield `None`
    pub fn load(&self) -> Option<Snapshot> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
