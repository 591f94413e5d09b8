//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parse::{parse_record, RecordArgs, RecordFieldArgs};

/// Generate the Value/Record/Typed implementations
pub fn derive_record(input: DeriveInput) -> TokenStream {
    match parse_record(&input) {
        Ok(args) => generate_impl(args),
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: RecordArgs) -> TokenStream {
    let struct_name = &args.ident;

    if !args.generics.params.is_empty() || args.generics.where_clause.is_some() {
        return syn::Error::new_spanned(
            &args.generics,
            "Record cannot be derived for generic structs",
        )
        .to_compile_error();
    }

    let fields = match args.data {
        darling::ast::Data::Struct(fields) => fields.fields,
        _ => {
            return syn::Error::new_spanned(
                &args.ident,
                "Record can only be derived for structs with named fields",
            )
            .to_compile_error()
        }
    };

    let descriptor_entries: Vec<_> = fields.iter().map(generate_descriptor).collect();
    let field_arms: Vec<_> = fields.iter().map(generate_field_arm).collect();
    let field_mut_arms: Vec<_> = fields.iter().map(generate_field_mut_arm).collect();

    quote! {
        impl ::fieldpath_core::Typed for #struct_name {
            const IS_RECORD: bool = true;
        }

        impl ::fieldpath_core::Value for #struct_name {
            fn type_name(&self) -> &'static str {
                ::std::any::type_name::<#struct_name>()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn kind(&self) -> ::fieldpath_core::Kind {
                ::fieldpath_core::Kind::Record
            }

            fn shape(&self) -> ::fieldpath_core::Shape<'_> {
                ::fieldpath_core::Shape::Record(self)
            }

            fn shape_mut(&mut self) -> ::fieldpath_core::ShapeMut<'_> {
                ::fieldpath_core::ShapeMut::Record(self)
            }

            fn clone_value(&self) -> ::std::boxed::Box<dyn ::fieldpath_core::Value> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn value_eq(&self, other: &dyn ::fieldpath_core::Value) -> bool {
                match other.as_any().downcast_ref::<Self>() {
                    ::std::option::Option::Some(o) => self == o,
                    ::std::option::Option::None => false,
                }
            }

            fn is_default(&self) -> bool {
                *self == <Self as ::std::default::Default>::default()
            }

            fn assign(
                &mut self,
                value: ::std::boxed::Box<dyn ::fieldpath_core::Value>,
            ) -> ::std::result::Result<(), ::fieldpath_core::AssignError> {
                ::fieldpath_core::assign_downcast(self, value)
            }
        }

        impl ::fieldpath_core::Record for #struct_name {
            fn descriptors(&self) -> &'static [::fieldpath_core::FieldDescriptor] {
                static DESCRIPTORS: ::std::sync::LazyLock<
                    ::std::vec::Vec<::fieldpath_core::FieldDescriptor>,
                > = ::std::sync::LazyLock::new(|| {
                    ::std::vec![
                        #(#descriptor_entries),*
                    ]
                });
                DESCRIPTORS.as_slice()
            }

            fn field(&self, name: &str) -> ::std::option::Option<&dyn ::fieldpath_core::Value> {
                match name {
                    #(#field_arms)*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::std::option::Option<&mut dyn ::fieldpath_core::Value> {
                match name {
                    #(#field_mut_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }
}

fn generate_descriptor(field: &RecordFieldArgs) -> TokenStream {
    let name = field.ident.as_ref().unwrap().to_string();
    let ty = &field.ty;
    let visible = field.is_visible();
    let tag_pairs = field.sorted_tags();
    let keys = tag_pairs.iter().map(|(k, _)| k.as_str());
    let values = tag_pairs.iter().map(|(_, v)| v.as_str());

    quote! {
        ::fieldpath_core::FieldDescriptor {
            name: #name,
            type_name: ::std::any::type_name::<#ty>(),
            visible: #visible,
            tags: &[#((#keys, #values)),*],
        }
    }
}

fn generate_field_arm(field: &RecordFieldArgs) -> TokenStream {
    let ident = field.ident.as_ref().unwrap();
    let name = ident.to_string();

    quote! {
        #name => ::std::option::Option::Some(&self.#ident),
    }
}

fn generate_field_mut_arm(field: &RecordFieldArgs) -> TokenStream {
    let ident = field.ident.as_ref().unwrap();
    let name = ident.to_string();

    quote! {
        #name => ::std::option::Option::Some(&mut self.#ident),
    }
}
