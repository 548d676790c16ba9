use crate::core::Pipeline;
use crate::domain::model::ServiceDescriptor;
use crate::utils::error::{MockeryError, Result};
use std::path::PathBuf;

/// Drives the whole run: discover every available service, resolve the
/// requested ids, then generate and write one mock client per service.
/// Fail-fast: the first failing service aborts the remainder of the batch.
pub struct MockeryEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> MockeryEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self, services: &[String]) -> Result<Vec<PathBuf>> {
        tracing::info!("Discovering services...");
        let available = self.pipeline.discover()?;
        tracing::info!(
            "Found {} services with an interface subpackage",
            available.len()
        );

        // Resolve the full selection before generating anything, so an
        // unknown id fails the batch with no files written.
        let mut selected: Vec<ServiceDescriptor> = Vec::with_capacity(services.len());
        for id in services {
            match available.get(id) {
                Some(service) => selected.push(service.clone()),
                None => {
                    return Err(MockeryError::ServiceNotFoundError {
                        service: id.clone(),
                    })
                }
            }
        }

        let mut written = Vec::with_capacity(selected.len());
        for service in &selected {
            tracing::info!("Generating mock client for [{}]", service.package_name);
            let out_file = self
                .add_mock_client(service)
                .map_err(|source| MockeryError::GenerationError {
                    service: service.package_name.clone(),
                    source: Box::new(source),
                })?;
            tracing::info!("Wrote [{}]", out_file.display());
            written.push(out_file);
        }

        Ok(written)
    }

    fn add_mock_client(&self, service: &ServiceDescriptor) -> Result<PathBuf> {
        let raw = self.pipeline.generate(service)?;
        self.pipeline.emit(service, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::GenerationResult;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Stub pipeline recording which services were generated.
    struct StubPipeline {
        available: HashMap<String, ServiceDescriptor>,
        generated: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    fn descriptor(name: &str) -> ServiceDescriptor {
        ServiceDescriptor {
            package_name: name.to_string(),
            interface_package: format!("{name}iface"),
            interface_short: "StubApi".to_string(),
            interface_qualified: format!("{name}iface::StubApi"),
            proper_name: "Stub".to_string(),
        }
    }

    impl StubPipeline {
        fn new(names: &[&str], fail_on: Option<&str>) -> Self {
            let available = names
                .iter()
                .map(|name| (name.to_string(), descriptor(name)))
                .collect();
            Self {
                available,
                generated: Mutex::new(Vec::new()),
                fail_on: fail_on.map(str::to_string),
            }
        }
    }

    impl Pipeline for StubPipeline {
        fn discover(&self) -> crate::utils::error::Result<HashMap<String, ServiceDescriptor>> {
            Ok(self.available.clone())
        }

        fn generate(
            &self,
            service: &ServiceDescriptor,
        ) -> crate::utils::error::Result<GenerationResult> {
            if self.fail_on.as_deref() == Some(service.package_name.as_str()) {
                return Err(MockeryError::TraitNotFoundError {
                    name: service.interface_short.clone(),
                    dir: "stub".to_string(),
                });
            }
            self.generated
                .lock()
                .unwrap()
                .push(service.package_name.clone());
            Ok(GenerationResult {
                text: "// package mocks".to_string(),
            })
        }

        fn emit(
            &self,
            service: &ServiceDescriptor,
            _raw: GenerationResult,
        ) -> crate::utils::error::Result<PathBuf> {
            Ok(PathBuf::from(format!("/out/{}.rs", service.package_name)))
        }
    }

    #[test]
    fn test_run_processes_services_in_request_order() {
        let engine = MockeryEngine::new(StubPipeline::new(&["kms", "sns", "route53"], None));
        let written = engine
            .run(&["sns".to_string(), "kms".to_string()])
            .unwrap();
        assert_eq!(
            written,
            vec![PathBuf::from("/out/sns.rs"), PathBuf::from("/out/kms.rs")]
        );
    }

    #[test]
    fn test_unknown_service_fails_before_any_generation() {
        let pipeline = StubPipeline::new(&["kms"], None);
        let engine = MockeryEngine::new(pipeline);
        let err = engine
            .run(&["kms".to_string(), "nope".to_string()])
            .unwrap_err();
        match &err {
            MockeryError::ServiceNotFoundError { service } => assert_eq!(service, "nope"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(engine.pipeline.generated.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failure_aborts_remaining_batch_with_service_context() {
        let pipeline = StubPipeline::new(&["kms", "sns", "route53"], Some("sns"));
        let engine = MockeryEngine::new(pipeline);
        let err = engine
            .run(&[
                "kms".to_string(),
                "sns".to_string(),
                "route53".to_string(),
            ])
            .unwrap_err();
        match &err {
            MockeryError::GenerationError { service, .. } => assert_eq!(service, "sns"),
            other => panic!("unexpected error: {other}"),
        }
        // kms completed, sns failed, route53 never started.
        assert_eq!(
            engine.pipeline.generated.lock().unwrap().clone(),
            vec!["kms".to_string()]
        );
    }
}
