use crate::domain::model::{DeclaredKind, DeclaredType};
use crate::utils::error::{MockeryError, Result};
use syn::Item;

/// Returns every type declaration in the file in document order, recursing
/// into inline modules.
pub fn declared_types(file: &syn::File) -> Vec<DeclaredType> {
    let mut found = Vec::new();
    collect(&file.items, &mut found);
    found
}

fn collect(items: &[Item], found: &mut Vec<DeclaredType>) {
    for item in items {
        match item {
            Item::Struct(item) => push(found, &item.ident, DeclaredKind::Struct),
            Item::Enum(item) => push(found, &item.ident, DeclaredKind::Enum),
            Item::Trait(item) => push(found, &item.ident, DeclaredKind::Trait),
            Item::Type(item) => push(found, &item.ident, DeclaredKind::Alias),
            Item::Union(item) => push(found, &item.ident, DeclaredKind::Union),
            Item::Mod(item) => {
                if let Some((_, items)) = &item.content {
                    collect(items, found);
                }
            }
            _ => {}
        }
    }
}

fn push(found: &mut Vec<DeclaredType>, ident: &syn::Ident, kind: DeclaredKind) {
    found.push(DeclaredType {
        name: ident.to_string(),
        kind,
    });
}

/// Returns the name of the first declared trait found in the file.
///
/// It's brittle in that it expects the SDK to keep its interface.rs
/// convention of one trait per file; with several traits only the first wins.
pub fn first_trait_name(file: &syn::File) -> Result<String> {
    declared_types(file)
        .into_iter()
        .find(|declared| declared.kind == DeclaredKind::Trait)
        .map(|declared| declared.name)
        .ok_or(MockeryError::NoTraitError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> syn::File {
        syn::parse_file(src).expect("test source must parse")
    }

    #[test]
    fn test_single_trait_is_found() {
        let file = parse("pub trait WidgetApi { fn get(&self) -> String; }");
        assert_eq!(first_trait_name(&file).unwrap(), "WidgetApi");
    }

    #[test]
    fn test_no_trait_is_an_error() {
        let file = parse("pub struct Widget { pub id: u32 }");
        let err = first_trait_name(&file).unwrap_err();
        assert!(matches!(err, MockeryError::NoTraitError));
    }

    #[test]
    fn test_first_of_several_traits_wins() {
        // Pins the document-order dependence.
        let file = parse(
            "pub trait FirstApi { fn a(&self); }\n\
             pub trait SecondApi { fn b(&self); }",
        );
        assert_eq!(first_trait_name(&file).unwrap(), "FirstApi");
    }

    #[test]
    fn test_trait_after_other_declarations() {
        let file = parse(
            "pub struct Input;\n\
             pub enum Kind { A }\n\
             pub trait WidgetApi { fn get(&self) -> String; }",
        );
        assert_eq!(first_trait_name(&file).unwrap(), "WidgetApi");
    }

    #[test]
    fn test_trait_inside_inline_module() {
        let file = parse("mod inner { pub trait InnerApi { fn x(&self); } }");
        assert_eq!(first_trait_name(&file).unwrap(), "InnerApi");
    }

    #[test]
    fn test_declared_types_document_order() {
        let file = parse(
            "pub struct A;\n\
             pub type B = A;\n\
             pub trait C {}\n\
             pub enum D {}",
        );
        let kinds: Vec<DeclaredKind> = declared_types(&file).iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DeclaredKind::Struct,
                DeclaredKind::Alias,
                DeclaredKind::Trait,
                DeclaredKind::Enum,
            ]
        );
    }
}
