use crate::domain::model::ServiceDescriptor;
use crate::mockery::MOCK_PACKAGE;
use crate::utils::error::{MockeryError, Result};
use std::path::Path;

/// Final adjustments to raw engine output: swap the package placeholder for
/// the real header and import, append the compile-time conformance
/// assertion, then parse and canonically reformat. The result is ready to
/// persist as `<out_dir>/<service>.rs`.
pub fn finalize(
    raw: &str,
    service: &ServiceDescriptor,
    out_package: &str,
    sdk_crate: &str,
    out_file: &Path,
) -> Result<Vec<u8>> {
    let placeholder = format!("// package {MOCK_PACKAGE}");
    let header = format!(
        "//! Generated mock of `{qualified}` for the `{out_package}` package. DO NOT EDIT.\n\n\
         use {sdk_crate}::service::{package}::{iface_package};",
        qualified = service.interface_qualified,
        package = service.package_name,
        iface_package = service.interface_package,
    );

    let mut text = raw.replacen(&placeholder, &header, 1);
    text.push_str(&format!(
        "\n\nconst _: () = {{\n    \
         const fn assert_mock_satisfies<T: {qualified}>() {{}}\n    \
         assert_mock_satisfies::<{short}>();\n\
         }};\n",
        qualified = service.interface_qualified,
        short = service.interface_short,
    ));

    let file = syn::parse_file(&text).map_err(|source| MockeryError::FormatError {
        path: out_file.display().to_string(),
        source,
    })?;

    Ok(prettyplease::unparse(&file).into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mockery::generator::MockGenerator;
    use std::path::PathBuf;

    fn widget_descriptor() -> ServiceDescriptor {
        ServiceDescriptor {
            package_name: "widget".to_string(),
            interface_package: "widgetiface".to_string(),
            interface_short: "WidgetApi".to_string(),
            interface_qualified: "widgetiface::WidgetApi".to_string(),
            proper_name: "Widget".to_string(),
        }
    }

    fn widget_raw() -> String {
        let generator = MockGenerator::new(false, MOCK_PACKAGE);
        let item: syn::ItemTrait =
            syn::parse_str("pub trait WidgetApi { fn get(&self) -> String; }").unwrap();
        generator.generate("widgetiface", &item).unwrap()
    }

    #[test]
    fn test_finalize_rewrites_header_and_appends_assertion() {
        let bytes = finalize(
            &widget_raw(),
            &widget_descriptor(),
            "mocks",
            "aws_sdk",
            &PathBuf::from("/out/widget.rs"),
        )
        .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("the `mocks` package"));
        assert!(text.contains("use aws_sdk::service::widget::widgetiface;"));
        assert!(text.contains("assert_mock_satisfies::<WidgetApi>()"));
        assert!(text.contains("widgetiface::WidgetApi"));
        assert!(!text.contains("// package mocks"));
    }

    #[test]
    fn test_finalize_output_is_valid_source() {
        let bytes = finalize(
            &widget_raw(),
            &widget_descriptor(),
            "mocks",
            "aws_sdk",
            &PathBuf::from("/out/widget.rs"),
        )
        .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(syn::parse_file(&text).is_ok());
    }

    #[test]
    fn test_finalize_is_deterministic() {
        let descriptor = widget_descriptor();
        let raw = widget_raw();
        let out = PathBuf::from("/out/widget.rs");
        let first = finalize(&raw, &descriptor, "mocks", "aws_sdk", &out).unwrap();
        let second = finalize(&raw, &descriptor, "mocks", "aws_sdk", &out).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_finalize_rejects_invalid_generation_output() {
        let err = finalize(
            "// package mocks\n\npub struct {{{",
            &widget_descriptor(),
            "mocks",
            "aws_sdk",
            &PathBuf::from("/out/widget.rs"),
        )
        .unwrap_err();
        match err {
            MockeryError::FormatError { path, .. } => assert_eq!(path, "/out/widget.rs"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
