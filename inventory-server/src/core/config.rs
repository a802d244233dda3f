use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | . | 工作目录 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATA_FILE | products.json | 商品数据文件 (相对 WORK_DIR) |
/// | UPLOAD_DIR | uploads | 图片目录 (相对 WORK_DIR) |
/// | MAX_UPLOAD_BYTES | 16777216 | 请求体上限 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (unset) | 日志目录, 未设置时输出到终端 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/inventory HTTP_PORT=8080 cargo run --bin inventory-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据文件、图片和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 商品数据文件
    pub data_file: String,
    /// 上传图片目录
    pub upload_dir: String,
    /// 请求体大小上限 (字节)
    pub max_upload_bytes: usize,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| ".".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_file: std::env::var("DATA_FILE").unwrap_or_else(|_| "products.json".into()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16 * 1024 * 1024),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.data_file = "products.json".into();
        config.upload_dir = "uploads".into();
        config
    }

    /// 商品数据文件路径
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.data_file)
    }

    /// 图片目录路径
    pub fn upload_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.upload_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_relative_to_work_dir() {
        let config = Config::with_overrides("/srv/inventory", 8080);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.data_path(), PathBuf::from("/srv/inventory/products.json"));
        assert_eq!(config.upload_path(), PathBuf::from("/srv/inventory/uploads"));
    }
}
