use clap::Parser;
use sdk_mockery::utils::{logger, validation::Validate};
use sdk_mockery::{CliConfig, LocalStorage, ManifestGuard, MockPipeline, MockeryEngine};

fn main() {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sdk-mockery");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Resolve both directories up front so the files generated never depend
    // on the invocation working directory (the engine changes it per call).
    config.sdk_dir = match std::path::absolute(&config.sdk_dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("❌ Failed to resolve --sdk-dir: {}", e);
            std::process::exit(1);
        }
    };
    config.out_dir = match std::path::absolute(&config.out_dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("❌ Failed to resolve --out-dir: {}", e);
            std::process::exit(1);
        }
    };

    if !config.sdk_dir.exists() {
        eprintln!("❌ --sdk-dir [{}] not found", config.sdk_dir.display());
        std::process::exit(1);
    }

    // Path-based resolution needs the checkout to look like a crate; keep a
    // stub manifest around for the duration of the run if it has none.
    let _manifest = match ManifestGuard::ensure(&config.sdk_dir, &config.sdk_crate) {
        Ok(guard) => guard,
        Err(e) => {
            tracing::error!("❌ Failed to prepare SDK manifest: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    let services = config.services.clone();
    let storage = LocalStorage::new(config.out_dir.clone());
    let pipeline = MockPipeline::new(storage, config);
    let engine = MockeryEngine::new(pipeline);

    match engine.run(&services) {
        Ok(written) => {
            tracing::info!("✅ Generated {} mock client(s)", written.len());
            println!("✅ Generated {} mock client(s)", written.len());
            for path in written {
                println!("📁 {}", path.display());
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                sdk_mockery::utils::error::ErrorSeverity::Low => 0,
                sdk_mockery::utils::error::ErrorSeverity::Medium => 2,
                sdk_mockery::utils::error::ErrorSeverity::High => 1,
                sdk_mockery::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
