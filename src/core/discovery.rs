use crate::core::locator;
use crate::domain::model::ServiceDescriptor;
use crate::utils::error::{MockeryError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Directory under the SDK root holding one subdirectory per service.
pub const SERVICE_DIR: &str = "service";
/// Suffix appended to a service's package name to form its interface subpackage.
pub const IFACE_SUFFIX: &str = "iface";
/// Conventionally-named file holding the service's trait declaration.
pub const IFACE_FILE: &str = "interface.rs";

/// Returns a ServiceDescriptor for each service found in the SDK, keyed by
/// package name.
pub fn available_services(service_dir: &Path) -> Result<HashMap<String, ServiceDescriptor>> {
    let entries = fs::read_dir(service_dir).map_err(|source| MockeryError::ServiceRootError {
        path: service_dir.display().to_string(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| MockeryError::ServiceRootError {
            path: service_dir.display().to_string(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| MockeryError::ServiceRootError {
            path: service_dir.display().to_string(),
            source,
        })?;
        if !file_type.is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    collect_services(service_dir, names)
}

/// Builds descriptors for the given directory names. Split from the directory
/// listing so the duplicate-name path stays testable; the first occurrence of
/// a name wins and later duplicates are silently skipped.
pub fn collect_services<I>(service_dir: &Path, names: I) -> Result<HashMap<String, ServiceDescriptor>>
where
    I: IntoIterator<Item = String>,
{
    let mut avail = HashMap::new();

    for name in names {
        if avail.contains_key(&name) {
            continue;
        }

        let interface_package = format!("{name}{IFACE_SUFFIX}");
        let iface_dir = service_dir.join(&name).join(&interface_package);
        if !iface_dir.exists() {
            // e.g. service package vendored but not the interface
            continue;
        }

        let iface_file = iface_dir.join(IFACE_FILE);
        let src =
            fs::read_to_string(&iface_file).map_err(|source| MockeryError::InterfaceReadError {
                service: name.clone(),
                source,
            })?;
        let file = syn::parse_file(&src).map_err(|source| MockeryError::InterfaceParseError {
            service: name.clone(),
            source,
        })?;
        let interface_short =
            locator::first_trait_name(&file).map_err(|source| MockeryError::InterfaceNameError {
                service: name.clone(),
                source: Box::new(source),
            })?;

        let descriptor = ServiceDescriptor {
            interface_qualified: format!("{interface_package}::{interface_short}"),
            proper_name: proper_name(&interface_short),
            package_name: name.clone(),
            interface_package,
            interface_short,
        };
        avail.insert(name, descriptor);
    }

    Ok(avail)
}

fn proper_name(interface_short: &str) -> String {
    interface_short
        .strip_suffix("Api")
        .or_else(|| interface_short.strip_suffix("API"))
        .unwrap_or(interface_short)
        .to_string()
}
