use crate::domain::ports::StreamProvider;
use crate::mockery::generator::MockGenerator;
use crate::mockery::{FLAGS_VAR, MODULE_MODE_VAR, VENDOR_FLAG};
use crate::utils::error::{MockeryError, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};
use syn::Item;

/// Walks a directory tree and emits a mock for every trait whose name
/// matches the filter.
pub struct Walker {
    pub base_dir: PathBuf,
    pub filter: Regex,
    pub limit_one: bool,
}

impl Walker {
    /// Returns whether anything was generated.
    pub fn walk(&self, generator: &MockGenerator, sink: &mut dyn StreamProvider) -> Result<bool> {
        let module_mode = env::var(MODULE_MODE_VAR)
            .map(|value| value == "on")
            .unwrap_or(false);

        if !module_mode && self.base_dir.is_absolute() {
            return Err(MockeryError::EnvironmentError {
                message: format!(
                    "cannot scan absolute path [{}] with {} unset",
                    self.base_dir.display(),
                    MODULE_MODE_VAR
                ),
            });
        }

        if is_possible_vendor_path(&self.base_dir) {
            let flags = env::var(FLAGS_VAR).unwrap_or_default();
            if !flags.split_whitespace().any(|flag| flag == VENDOR_FLAG) {
                return Err(MockeryError::EnvironmentError {
                    message: format!(
                        "vendored path [{}] requires {} in {}",
                        self.base_dir.display(),
                        VENDOR_FLAG,
                        FLAGS_VAR
                    ),
                });
            }
        }

        // Path-based resolution only works from inside a crate.
        if module_mode {
            let absolute = std::path::absolute(&self.base_dir)?;
            if find_crate_root(&absolute).is_none() {
                return Err(MockeryError::EnvironmentError {
                    message: format!(
                        "no Cargo.toml found above [{}]; the scan root must sit inside a crate",
                        absolute.display()
                    ),
                });
            }
        }

        let mut generated = false;
        self.walk_dir(&self.base_dir, generator, sink, &mut generated)?;
        Ok(generated)
    }

    fn walk_dir(
        &self,
        dir: &Path,
        generator: &MockGenerator,
        sink: &mut dyn StreamProvider,
        generated: &mut bool,
    ) -> Result<()> {
        let mut entries: Vec<_> =
            fs::read_dir(dir)?.collect::<std::result::Result<Vec<_>, std::io::Error>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                self.walk_dir(&path, generator, sink, generated)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                self.walk_file(&path, generator, sink, generated)?;
            }
            if *generated && self.limit_one {
                return Ok(());
            }
        }

        Ok(())
    }

    fn walk_file(
        &self,
        path: &Path,
        generator: &MockGenerator,
        sink: &mut dyn StreamProvider,
        generated: &mut bool,
    ) -> Result<()> {
        let src = fs::read_to_string(path)?;
        let file = syn::parse_file(&src).map_err(|source| MockeryError::SourceParseError {
            path: path.display().to_string(),
            source,
        })?;

        // The file's package is its enclosing directory.
        let package = path
            .parent()
            .and_then(|parent| parent.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        for item in trait_items(&file.items) {
            if !self.filter.is_match(&item.ident.to_string()) {
                continue;
            }
            let text = generator.generate(&package, item)?;
            sink.writer().write_all(text.as_bytes())?;
            sink.cleanup()?;
            *generated = true;
            if self.limit_one {
                return Ok(());
            }
        }

        Ok(())
    }
}

fn trait_items(items: &[Item]) -> Vec<&syn::ItemTrait> {
    let mut found = Vec::new();
    for item in items {
        match item {
            Item::Trait(item) => found.push(item),
            Item::Mod(item) => {
                if let Some((_, items)) = &item.content {
                    found.extend(trait_items(items));
                }
            }
            _ => {}
        }
    }
    found
}

/// Whether the directory sits under a dependency-vendoring layout.
pub fn is_possible_vendor_path(dir: &Path) -> bool {
    dir.components()
        .any(|component| matches!(component, Component::Normal(name) if name == "vendor"))
}

fn find_crate_root(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .find(|ancestor| ancestor.join("Cargo.toml").is_file())
        .map(Path::to_path_buf)
}
