use clap::Parser;
use digitsum::utils::{logger, validation::Validate};
use digitsum::{BatchEngine, CasePipeline, CliConfig, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting digitsum CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if config.cases.is_some() {
        run_batch(config).await
    } else {
        run_single(&config)
    }
}

async fn run_batch(config: CliConfig) -> anyhow::Result<()> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = CasePipeline::new(storage, config);
    let engine = BatchEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Batch completed successfully");
            println!("✅ Batch completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Batch run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run_single(config: &CliConfig) -> anyhow::Result<()> {
    let left = config.left.as_deref().map(digit_codes);
    let right = config.right.as_deref().map(digit_codes);

    match digitsum::add(left.as_deref(), right.as_deref()) {
        Ok(Some(digits)) => {
            let rendered: String = digits.iter().map(|d| d.to_string()).collect();
            println!("{}", rendered);
        }
        Ok(None) => {
            tracing::warn!("Missing operand, nothing to add");
            println!("no result (missing operand)");
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Translates a raw operand string into digit codes. Non-digit characters map
/// to out-of-range codes so the adder rejects them; no parsing happens here.
fn digit_codes(raw: &str) -> Vec<i32> {
    raw.chars().map(|c| c as i32 - '0' as i32).collect()
}
