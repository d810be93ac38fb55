use clap::Parser;
use digitsum::config::toml_config::TomlConfig;
use digitsum::utils::{logger, validation::Validate};
use digitsum::{BatchEngine, CasePipeline, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-batch")]
#[command(about = "Batch digit addition driven by a TOML run definition")]
struct Args {
    /// Path to the TOML run definition
    #[arg(short, long, default_value = "digitsum.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines (for automation)
    #[arg(long)]
    json_logs: bool,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Loading run definition from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("Run '{}': {}", config.run.name, config.run.description);

    if args.dry_run {
        println!(
            "🔍 Dry run: would read cases from {} and write results under {}",
            config.cases.path, config.load.output_path
        );
        return Ok(());
    }

    let storage = LocalStorage::new(config.load.output_path.clone());
    let pipeline = CasePipeline::new(storage, config);
    let engine = BatchEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Batch completed successfully!");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Batch run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
