use crate::utils::error::{MockeryError, Result};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{parse_quote, FnArg, Pat, TraitItem, TraitItemFn, Type};

/// Emits mock source for one trait. Mirrors the console generator's behavior:
/// the output opens with a package placeholder line and is not yet a valid
/// standalone file.
pub struct MockGenerator {
    in_package: bool,
    package_name: String,
}

impl MockGenerator {
    pub fn new(in_package: bool, package_name: &str) -> Self {
        Self {
            in_package,
            package_name: package_name.to_string(),
        }
    }

    /// Generates the mock for `item`, qualifying the trait with
    /// `iface_package` unless output targets the trait's own package.
    pub fn generate(&self, iface_package: &str, item: &syn::ItemTrait) -> Result<String> {
        if !item.generics.params.is_empty() {
            return Err(MockeryError::UnsupportedTraitError {
                name: item.ident.to_string(),
                reason: "generic traits are not supported".to_string(),
            });
        }

        let trait_ident = &item.ident;
        let mock_ident = if self.in_package {
            format_ident!("Mock{}", trait_ident)
        } else {
            trait_ident.clone()
        };
        let trait_path: syn::Path = if self.in_package {
            parse_quote!(#trait_ident)
        } else {
            let package = format_ident!("{}", iface_package);
            parse_quote!(#package::#trait_ident)
        };
        let mock_name = mock_ident.to_string();

        let mut stub_fields = Vec::new();
        let mut methods = Vec::new();
        for trait_item in &item.items {
            match trait_item {
                TraitItem::Fn(method) => {
                    let (field, body) = self.mock_method(&mock_name, trait_ident, method)?;
                    stub_fields.extend(field);
                    methods.push(body);
                }
                TraitItem::Const(_) | TraitItem::Type(_) => {
                    return Err(MockeryError::UnsupportedTraitError {
                        name: trait_ident.to_string(),
                        reason: "associated consts and types are not supported".to_string(),
                    });
                }
                _ => {}
            }
        }

        let tokens = quote! {
            #[derive(Default)]
            pub struct #mock_ident {
                pub calls: ::std::sync::Mutex<::std::vec::Vec<::std::string::String>>,
                #(#stub_fields)*
            }

            impl #mock_ident {
                pub fn recorded_calls(&self) -> ::std::vec::Vec<::std::string::String> {
                    self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
                }
            }

            impl #trait_path for #mock_ident {
                #(#methods)*
            }
        };

        Ok(format!("// package {}\n\n{}\n", self.package_name, tokens))
    }

    fn mock_method(
        &self,
        mock_name: &str,
        trait_ident: &syn::Ident,
        method: &TraitItemFn,
    ) -> Result<(Option<TokenStream>, TokenStream)> {
        let sig = &method.sig;
        if sig.asyncness.is_some() {
            return Err(MockeryError::UnsupportedTraitError {
                name: trait_ident.to_string(),
                reason: format!("async method [{}] is not supported", sig.ident),
            });
        }
        if sig.receiver().is_none() {
            return Err(MockeryError::UnsupportedTraitError {
                name: trait_ident.to_string(),
                reason: format!("associated function [{}] has no receiver", sig.ident),
            });
        }

        let name = &sig.ident;
        let name_str = name.to_string();
        let output = &sig.output;

        // Normalize argument patterns so the stub call can name every value.
        let mut inputs: Punctuated<FnArg, Comma> = Punctuated::new();
        let mut arg_idents = Vec::new();
        let mut arg_types: Vec<Type> = Vec::new();
        for (index, input) in sig.inputs.iter().enumerate() {
            match input {
                FnArg::Receiver(receiver) => inputs.push(FnArg::Receiver(receiver.clone())),
                FnArg::Typed(pat_type) => {
                    let ident = match &*pat_type.pat {
                        Pat::Ident(pat) => pat.ident.clone(),
                        _ => format_ident!("arg{}", index),
                    };
                    let ty = (*pat_type.ty).clone();
                    inputs.push(parse_quote!(#ident: #ty));
                    arg_idents.push(ident);
                    arg_types.push(ty);
                }
            }
        }

        // Methods with their own generics cannot be stubbed through a boxed
        // closure field; they still record and then panic.
        if !sig.generics.params.is_empty() {
            let body = quote! {
                fn #name(#inputs) #output {
                    if let Ok(mut calls) = self.calls.lock() {
                        calls.push(#name_str.to_string());
                    }
                    panic!("{}::{} has no generated stub (generic method)", #mock_name, #name_str)
                }
            };
            return Ok((None, body));
        }

        let field = format_ident!("{}_fn", name);
        let field_decl = quote! {
            pub #field: ::std::option::Option<
                ::std::boxed::Box<dyn Fn(#(#arg_types),*) #output + Send + Sync>,
            >,
        };
        let body = quote! {
            fn #name(#inputs) #output {
                if let Ok(mut calls) = self.calls.lock() {
                    calls.push(#name_str.to_string());
                }
                match &self.#field {
                    Some(stub) => stub(#(#arg_idents),*),
                    None => panic!("{}::{} called without a stub", #mock_name, #name_str),
                }
            }
        };

        Ok((Some(field_decl), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trait_item(src: &str) -> syn::ItemTrait {
        syn::parse_str(src).expect("test trait must parse")
    }

    #[test]
    fn test_generate_opens_with_package_placeholder() {
        let generator = MockGenerator::new(false, "mocks");
        let item = trait_item("pub trait WidgetApi { fn get(&self) -> String; }");
        let out = generator.generate("widgetiface", &item).unwrap();
        assert!(out.starts_with("// package mocks\n"));
    }

    #[test]
    fn test_generate_emits_stub_field_and_trait_impl() {
        let generator = MockGenerator::new(false, "mocks");
        let item = trait_item(
            "pub trait WidgetApi { fn get(&self) -> String; fn put(&self, id: u32, body: String); }",
        );
        let out = generator.generate("widgetiface", &item).unwrap();
        assert!(out.contains("pub struct WidgetApi"));
        assert!(out.contains("get_fn"));
        assert!(out.contains("put_fn"));
        assert!(out.contains("widgetiface :: WidgetApi for WidgetApi"));
    }

    #[test]
    fn test_in_package_mode_prefixes_mock_name() {
        let generator = MockGenerator::new(true, "mocks");
        let item = trait_item("pub trait WidgetApi { fn get(&self) -> String; }");
        let out = generator.generate("widgetiface", &item).unwrap();
        assert!(out.contains("pub struct MockWidgetApi"));
        assert!(!out.contains("widgetiface :: WidgetApi"));
    }

    #[test]
    fn test_generic_trait_is_unsupported() {
        let generator = MockGenerator::new(false, "mocks");
        let item = trait_item("pub trait WidgetApi<T> { fn get(&self) -> T; }");
        let err = generator.generate("widgetiface", &item).unwrap_err();
        assert!(matches!(err, MockeryError::UnsupportedTraitError { .. }));
    }

    #[test]
    fn test_async_method_is_unsupported() {
        let generator = MockGenerator::new(false, "mocks");
        let item = trait_item("pub trait WidgetApi { async fn get(&self) -> String; }");
        assert!(generator.generate("widgetiface", &item).is_err());
    }

    #[test]
    fn test_output_body_parses_once_import_is_supplied() {
        let generator = MockGenerator::new(false, "mocks");
        let item = trait_item("pub trait WidgetApi { fn get(&self) -> String; }");
        let out = generator.generate("widgetiface", &item).unwrap();
        let body = out.replacen("// package mocks", "", 1);
        assert!(syn::parse_file(&body).is_ok());
    }
}
