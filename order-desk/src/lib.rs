//! Order Desk - 购物车与订单状态引擎
//!
//! # 架构概述
//!
//! 用户浏览固定的商品目录，组建购物车并提交订单。订单被记录到历史，
//! 导出为表格，并生成预填内容的消息转发链接。
//!
//! - **商品目录** (`catalog`): 只读目录与搜索建议
//! - **购物车** (`cart`): 合并、调整数量、移除
//! - **订单记录** (`orders`): 不可变订单快照与历史
//! - **通知** (`notify`): 自动过期的提示消息
//! - **导出** (`export`): xlsx / CSV 表格
//!
//! # 模块结构
//!
//! ```text
//! order-desk/src/
//! ├── core/          # 配置
//! ├── utils/         # 日志、错误
//! ├── catalog.rs     # 商品目录与搜索
//! ├── cart.rs        # 购物车
//! ├── orders/        # 订单记录与历史
//! ├── notify/        # 通知队列与自动过期
//! ├── export/        # 表格导出 (xlsx / CSV)
//! ├── relay.rs       # 转发链接
//! ├── desk/          # 编排层
//! └── shell.rs       # 终端命令解析
//! ```
//!
//! # 控制流
//!
//! ```text
//! 用户操作 ─▶ 目录搜索 / 选择 ─▶ 购物车变更 ─▶ 通知
//!                                   │
//!                                 提交
//!                                   ▼
//!           OrderRecorder ─▶ ExportGateway + RelayLinkBuilder
//! ```

pub mod cart;
pub mod catalog;
pub mod core;
pub mod desk;
pub mod export;
pub mod notify;
pub mod orders;
pub mod relay;
pub mod shell;
pub mod utils;

// Re-export 公共类型
pub use cart::{AddOutcome, Cart, Notice};
pub use catalog::{CatalogAccessor, CatalogError, StaticCatalog};
pub use crate::core::Config;
pub use desk::{OrderDesk, PlacedOrder};
pub use export::{
    CsvExporter, ExportArtifact, ExportError, ExportFormat, ExportGateway, FileExporter,
    OrderSheet, SheetEncoder, XlsxExporter,
};
pub use notify::NotificationCenter;
pub use orders::{EmptyCartError, OrderHistory, OrderRecorder};
pub use relay::{RelayError, RelayLinkBuilder};
pub use utils::{DeskError, DeskResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置环境 (dotenv, 日志)
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
