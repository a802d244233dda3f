//! Inventory Server - 商品库存 REST 后端
//!
//! # 模块结构
//!
//! ```text
//! inventory-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # JSON 文件商品仓库
//! ├── services/      # 上传图片存储
//! └── utils/         # 错误响应、日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

pub fn print_banner() {
    println!(
        r#"
 ___                      _
|_ _|_ ____   _____ _ __ | |_ ___  _ __ _   _
 | || '_ \ \ / / _ \ '_ \| __/ _ \| '__| | | |
 | || | | \ V /  __/ | | | || (_) | |  | |_| |
|___|_| |_|\_/ \___|_| |_|\__\___/|_|   \__, |
                                        |___/
    "#
    );
}
