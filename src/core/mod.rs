pub mod discovery;
pub mod engine;
pub mod locator;
pub mod pipeline;
pub mod postprocess;

pub use crate::domain::model::{
    DeclaredKind, DeclaredType, GenerationRequest, GenerationResult, ServiceDescriptor,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, StreamProvider};
pub use crate::utils::error::Result;
