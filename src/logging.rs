// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    // 从环境变量读取日志级别，默认为 info
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=ta_appointments_import=trace
/// - LOG_FORMAT: 设为 json 时按 JSON 行输出（带当前 span）
///
/// # 示例
/// ```no_run
/// use ta_appointments_import::logging;
/// logging::init();
/// ```
pub fn init() {
    if json_requested(std::env::var("LOG_FORMAT").ok().as_deref()) {
        fmt()
            .json()
            .with_env_filter(env_filter())
            .with_current_span(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .init();
    }
}

fn json_requested(format: Option<&str>) -> bool {
    matches!(format, Some(f) if f.trim().eq_ignore_ascii_case("json"))
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_requested() {
        assert!(json_requested(Some("json")));
        assert!(json_requested(Some(" JSON ")));
        assert!(!json_requested(Some("text")));
        assert!(!json_requested(None));
    }
}
