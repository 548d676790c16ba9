use crate::domain::model::{GenerationResult, ServiceDescriptor};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn sdk_dir(&self) -> &Path;
    fn out_dir(&self) -> &Path;
    fn sdk_crate(&self) -> &str;
    fn services(&self) -> &[String];
}

pub trait Pipeline: Send + Sync {
    fn discover(&self) -> Result<HashMap<String, ServiceDescriptor>>;
    fn generate(&self, service: &ServiceDescriptor) -> Result<GenerationResult>;
    fn emit(&self, service: &ServiceDescriptor, raw: GenerationResult) -> Result<PathBuf>;
}

/// Destination for engine output. The in-memory implementation has nothing to
/// close, so its cleanup is a no-op.
pub trait StreamProvider {
    fn writer(&mut self) -> &mut dyn std::io::Write;
    fn cleanup(&mut self) -> Result<()>;
}
