use env_logger::Env;

/// 初始化日誌系統
///
/// 預設顯示 info 以上的訊息，`verbose` 時降到 debug，
/// 仍可用 `RUST_LOG` 環境變數覆蓋
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}
