// ==========================================
// 助教聘任管理系统 - 导出
// ==========================================
// 流程: 快照 → 最小表示 → 格式化 → 打包
// ==========================================

pub mod formatter;
pub mod packager;

pub use formatter::{to_json, SpreadsheetFormatter};
pub use packager::{export_file_name, to_csv_bytes, to_json_bytes, ExportFile, ExportFormat};
