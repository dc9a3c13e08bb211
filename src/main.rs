use clap::Parser;
use qpcr_plan::core::ConfigProvider;
use qpcr_plan::utils::error::ErrorSeverity;
use qpcr_plan::utils::{logger, validation::Validate};
use qpcr_plan::{CliConfig, LocalStorage, OutputFormat, PlanEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting qpcr-plan");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證命令列參數
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let format: OutputFormat = config.format().parse()?;
    let engine = PlanEngine::new(LocalStorage::new("."), config.strict());

    match engine
        .run(
            config.config_path(),
            |qpcr| config.apply_overrides(qpcr),
            format,
            config.output_path(),
        )
        .await
    {
        Ok(rendered) => match config.output_path() {
            Some(output) => println!("✅ Plan written to {}", output),
            None => print!("{}", rendered),
        },
        Err(e) => {
            tracing::error!(
                "❌ Planning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
