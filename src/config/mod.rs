pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::{MockeryError, Result};
use crate::utils::validation::{validate_crate_name, validate_path, validate_service_ids, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sdk-mockery")]
#[command(about = "Generate mock clients for selected vendored SDK service traits")]
pub struct CliConfig {
    #[arg(long, help = "SDK checkout root (the directory containing service/)")]
    pub sdk_dir: PathBuf,

    #[arg(long, help = "Output directory; its basename is the output package name")]
    pub out_dir: PathBuf,

    #[arg(
        long = "service",
        value_delimiter = ',',
        help = "Comma-separated service ids (SDK dir names under service/)"
    )]
    pub services: Vec<String>,

    #[arg(long, default_value = "1", help = "SDK major version (only 1 is supported)")]
    pub sdk_ver: String,

    #[arg(
        long,
        default_value = "aws_sdk",
        help = "Crate name used in generated use paths"
    )]
    pub sdk_crate: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn sdk_dir(&self) -> &Path {
        &self.sdk_dir
    }

    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn sdk_crate(&self) -> &str {
        &self.sdk_crate
    }

    fn services(&self) -> &[String] {
        &self.services
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("sdk-dir", &self.sdk_dir)?;
        validate_path("out-dir", &self.out_dir)?;
        validate_service_ids("service", &self.services)?;
        validate_crate_name("sdk-crate", &self.sdk_crate)?;

        if self.sdk_ver != "1" {
            return Err(MockeryError::InvalidConfigValueError {
                field: "sdk-ver".to_string(),
                value: self.sdk_ver.clone(),
                reason: "Only SDK v1 is supported".to_string(),
            });
        }

        Ok(())
    }
}
