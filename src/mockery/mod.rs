//! Programmatic runner for the generic mock engine.
//!
//! The engine is built for console use: it resolves packages through the
//! process working directory and two process-wide environment toggles. This
//! module operates it repeatedly inside one process without leaking that
//! state between invocations: every call is serialized through one lock,
//! toggles and the working directory are scoped guards restored on every
//! exit path, and output lands in an in-memory buffer instead of a stream.

pub mod generator;
pub mod walker;

use crate::domain::model::{GenerationRequest, GenerationResult};
use crate::domain::ports::StreamProvider;
use crate::utils::error::{MockeryError, Result};
use self::generator::MockGenerator;
use self::walker::{is_possible_vendor_path, Walker};
use regex::Regex;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Toggle enabling path-based package resolution; must be "on" to scan
/// absolute directories.
pub const MODULE_MODE_VAR: &str = "MOCKERY_MODULE_MODE";
/// Space-separated engine flags.
pub const FLAGS_VAR: &str = "MOCKERY_FLAGS";
/// Flag permitting scans under a vendor/ layout.
pub const VENDOR_FLAG: &str = "-mod=vendor";
/// Placeholder package name in raw engine output.
pub const MOCK_PACKAGE: &str = "mocks";

// The engine mutates process-wide state (env, working directory), so calls
// must never overlap.
static ENGINE_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch the engine's process-wide state.
#[cfg(test)]
pub(crate) fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    ENGINE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs the engine for exactly one target trait, capturing its output.
pub fn generate(request: &GenerationRequest) -> Result<GenerationResult> {
    let _serial = ENGINE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let generator = MockGenerator::new(request.in_package, MOCK_PACKAGE);
    let walker = Walker {
        base_dir: request.dir.clone(),
        filter: Regex::new(&format!("^{}$", request.name))?,
        limit_one: true,
    };

    let _module_mode = ensure_module_mode();
    let _vendor = ensure_vendor_flags(&request.dir);
    let _cwd = DirGuard::enter(&request.dir)?;

    let mut sink = BufferSink::default();
    let generated = walker.walk(&generator, &mut sink)?;

    if !request.name.is_empty() && !generated {
        return Err(MockeryError::TraitNotFoundError {
            name: request.name.clone(),
            dir: request.dir.display().to_string(),
        });
    }

    Ok(GenerationResult {
        text: sink.into_string(),
    })
}

/// Restores one environment variable to its captured prior value on drop,
/// removing it if it was unset.
struct EnvGuard {
    key: &'static str,
    prior: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let prior = env::var(key).ok();
        env::set_var(key, value);
        Self { key, prior }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prior {
            Some(value) => env::set_var(self.key, value),
            None => env::remove_var(self.key),
        }
    }
}

fn ensure_module_mode() -> Option<EnvGuard> {
    if env::var(MODULE_MODE_VAR).as_deref() == Ok("on") {
        return None;
    }
    Some(EnvGuard::set(MODULE_MODE_VAR, "on"))
}

fn ensure_vendor_flags(dir: &Path) -> Option<EnvGuard> {
    if !is_possible_vendor_path(dir) {
        return None;
    }
    let prior = env::var(FLAGS_VAR).unwrap_or_default();
    if prior.split_whitespace().any(|flag| flag == VENDOR_FLAG) {
        return None;
    }
    let next = if prior.is_empty() {
        VENDOR_FLAG.to_string()
    } else {
        format!("{prior} {VENDOR_FLAG}")
    };
    Some(EnvGuard::set(FLAGS_VAR, &next))
}

/// Scoped working-directory change; the engine's resolution is sensitive to
/// the working directory, so the switch lives here rather than on the caller.
struct DirGuard {
    original: PathBuf,
}

impl DirGuard {
    fn enter(dir: &Path) -> Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(dir).map_err(|source| MockeryError::EnvironmentError {
            message: format!(
                "failed to change working directory to [{}]: {source}",
                dir.display()
            ),
        })?;
        Ok(Self { original })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if let Err(error) = env::set_current_dir(&self.original) {
            tracing::warn!(
                "failed to restore working directory to [{}]: {error}",
                self.original.display()
            );
        }
    }
}

/// In-memory sink for engine output.
#[derive(Default)]
pub struct BufferSink {
    buf: Vec<u8>,
}

impl BufferSink {
    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

impl StreamProvider for BufferSink {
    fn writer(&mut self) -> &mut dyn Write {
        &mut self.buf
    }

    fn cleanup(&mut self) -> Result<()> {
        // No file handle was opened.
        Ok(())
    }
}

/// Ensures a Cargo.toml exists at the SDK root for the duration of the run,
/// so path-based resolution treats the checkout as a crate. A stub manifest
/// created here is removed on drop; a pre-existing one is left alone.
pub struct ManifestGuard {
    created: Option<PathBuf>,
}

impl ManifestGuard {
    pub fn ensure(sdk_dir: &Path, crate_name: &str) -> Result<Self> {
        let manifest = sdk_dir.join("Cargo.toml");
        if manifest.exists() {
            return Ok(Self { created: None });
        }
        fs::write(
            &manifest,
            format!(
                "[package]\nname = \"{}\"\nversion = \"0.0.0\"\nedition = \"2021\"\n",
                crate_name.replace('_', "-")
            ),
        )?;
        Ok(Self {
            created: Some(manifest),
        })
    }
}

impl Drop for ManifestGuard {
    fn drop(&mut self) {
        if let Some(manifest) = &self.created {
            if let Err(error) = fs::remove_file(manifest) {
                tracing::warn!("failed to remove [{}]: {error}", manifest.display());
            }
        }
    }
}
