use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::ProductRepository;
use crate::services::ImageStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一次。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 配置项 (不可变)
    pub config: Arc<Config>,
    /// 商品数据
    pub products: Arc<ProductRepository>,
    /// 上传图片
    pub images: Arc<ImageStore>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 创建工作目录和图片目录
    pub async fn initialize(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.work_dir).await?;

        let images = ImageStore::new(config.upload_path());
        images.ensure_dir().await?;

        let products = ProductRepository::new(config.data_path());
        tracing::info!(
            data_file = %products.path().display(),
            upload_dir = %images.dir().display(),
            "Server state initialized"
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            products: Arc::new(products),
            images: Arc::new(images),
        })
    }
}
