// ==========================================
// 助教聘任管理系统 - 配置层
// ==========================================
// 职责: 导入导出参数（匹配阈值 / 工作项列余量 / 导出文件前缀）
// 存储: key-value（内存 / JSON 文件），缺省时回落默认值
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::{ImportConfig, ImportConfigReader};
