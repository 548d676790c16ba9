use crate::core::discovery::{available_services, SERVICE_DIR};
use crate::core::postprocess;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{GenerationRequest, GenerationResult, ServiceDescriptor};
use crate::mockery;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Discovery, generation, and post-processing against one SDK checkout.
pub struct MockPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MockPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn service_dir(&self) -> PathBuf {
        self.config.sdk_dir().join(SERVICE_DIR)
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for MockPipeline<S, C> {
    fn discover(&self) -> Result<HashMap<String, ServiceDescriptor>> {
        available_services(&self.service_dir())
    }

    fn generate(&self, service: &ServiceDescriptor) -> Result<GenerationResult> {
        let iface_dir = self
            .service_dir()
            .join(&service.package_name)
            .join(&service.interface_package);

        mockery::generate(&GenerationRequest {
            dir: iface_dir,
            name: service.interface_short.clone(),
            in_package: false,
        })
    }

    fn emit(&self, service: &ServiceDescriptor, raw: GenerationResult) -> Result<PathBuf> {
        let file_name = format!("{}.rs", service.package_name);
        let out_file = self.config.out_dir().join(&file_name);
        let out_package = self
            .config
            .out_dir()
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(mockery::MOCK_PACKAGE)
            .to_string();

        let formatted = postprocess::finalize(
            &raw.text,
            service,
            &out_package,
            self.config.sdk_crate(),
            &out_file,
        )?;
        self.storage.write_file(&file_name, &formatted)?;
        Ok(out_file)
    }
}
