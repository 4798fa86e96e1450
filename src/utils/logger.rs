use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 函式庫與 flagctl 執行檔使用同一層級，其餘套件只顯示 warn
fn default_directive(level: &str) -> String {
    format!("category_tax_flags={level},flagctl={level},warn")
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

pub fn init_cli_logger(verbose: bool) {
    init_cli_logger_with_level(if verbose { "debug" } else { "info" });
}

/// 以指定層級初始化 CLI 日誌 (RUST_LOG 優先)
pub fn init_cli_logger_with_level(level: &str) {
    tracing_subscriber::registry()
        .with(default_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
