//! 数据层 - JSON 文件存储

pub mod product;

pub use product::{NewProduct, ProductPatch, ProductRepository};
