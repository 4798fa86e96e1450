use anyhow::Result;
use category_tax_flags::app::run_command;
use category_tax_flags::utils::logger;
use category_tax_flags::{CliConfig, StoreError};
use clap::Parser;

fn main() -> Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌 (--verbose 優先於設定檔)
    if cli.verbose {
        logger::init_cli_logger(true);
    } else {
        logger::init_cli_logger_with_level(config.log_level());
    }
    tracing::debug!("Resolved config: {:?}", config);

    match run_command(&config, cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            tracing::error!("❌ Command failed: {:#}", e);
            eprintln!("❌ {:#}", e);
            if let Some(store_error) = e.downcast_ref::<StoreError>() {
                eprintln!("💡 Suggestion: {}", store_error.recovery_suggestion());
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
