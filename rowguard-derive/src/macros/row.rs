//! Row derive macro implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields, Ident, Type};

use crate::attributes;
use crate::utils;

/// Derive macro for `Row` - generates `<Name>Row` bound to one table
///
/// # Example
/// ```ignore
/// use rowguard::Row;
///
/// #[derive(Row)]
/// #[table_name = "Customers"]
/// pub struct Customer {
///     #[primary_key]
///     #[auto_increment]
///     #[column_name = "Id"]
///     pub id: i64,
///     #[column_name = "Name"]
///     pub name: String,
/// }
///
/// // CustomerRow::ID, CustomerRow::NAME, CustomerRow::new(), ...
/// ```
pub fn derive_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Everything generated for one struct field.
struct FieldCode {
    constant: TokenStream2,
    const_name: Ident,
    accessors: TokenStream2,
    from_model: TokenStream2,
    to_model: TokenStream2,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let row_name = format_ident!("{}Row", struct_name);

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Row cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Row can only be derived for structs with named fields",
            ));
        }
    };

    let table_name = attributes::extract_table_name(&input.attrs)?
        .unwrap_or_else(|| utils::snake_case(&struct_name.to_string()));

    let mut primary_key: Option<(usize, Type)> = None;
    let mut generated = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = attributes::parse_column_attributes(field)?;
        let field_type = &field.ty;
        let storage_type = utils::option_inner_type(field_type).unwrap_or(field_type);

        if attrs.is_primary_key {
            if primary_key.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one #[primary_key] field is supported",
                ));
            }
            primary_key = Some((index, storage_type.clone()));
        }

        generated.push(field_code(index, field_ident, field_type, &table_name, &attrs));
    }

    let constants = generated.iter().map(|f| &f.constant);
    let const_names: Vec<_> = generated.iter().map(|f| &f.const_name).collect();
    let accessors = generated.iter().map(|f| &f.accessors);
    let from_model = generated.iter().map(|f| &f.from_model);
    let to_model = generated.iter().map(|f| &f.to_model);

    let id_row_impl = match primary_key {
        Some((index, id_type)) => quote! {
            impl ::rowguard::IdRow for #row_name {
                type Id = #id_type;

                fn id_field() -> &'static ::rowguard::FieldDef {
                    &Self::FIELDS[#index]
                }
            }
        },
        None => quote! {},
    };

    let row_doc = format!("Row type of table `{}`, generated from [`{}`].", table_name, struct_name);

    Ok(quote! {
        #[doc = #row_doc]
        #[derive(Debug, Clone)]
        #vis struct #row_name {
            state: ::rowguard::RowState,
        }

        impl #row_name {
            pub const TABLE_NAME: &'static str = #table_name;

            #(#constants)*

            const FIELDS: &'static [::rowguard::FieldDef] = &[#(Self::#const_names),*];

            /// A new row with every field unset, tracking assignments only.
            pub fn new() -> Self {
                <Self as ::rowguard::Row>::with_mode(::rowguard::TrackingMode::Assignments)
            }

            /// A row with every field of `model` assigned.
            pub fn from_model(model: &#struct_name) -> Self {
                let mut row = Self::new();
                #(#from_model)*
                row
            }

            /// Convert back to the plain struct.
            ///
            /// Fails when a non-`Option` field is null, or, for rows loaded
            /// with checks, when a table field was not loaded. Expression
            /// fields that were not selected convert as null.
            pub fn to_model(&self) -> ::std::result::Result<#struct_name, ::rowguard::RowError> {
                ::std::result::Result::Ok(#struct_name {
                    #(#to_model)*
                })
            }

            #(#accessors)*
        }

        impl ::std::default::Default for #row_name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::rowguard::Row for #row_name {
            fn table_name() -> &'static str {
                #table_name
            }

            fn fields() -> &'static [::rowguard::FieldDef] {
                Self::FIELDS
            }

            fn from_state(state: ::rowguard::RowState) -> Self {
                Self { state }
            }

            fn state(&self) -> &::rowguard::RowState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut ::rowguard::RowState {
                &mut self.state
            }
        }

        #id_row_impl
    })
}

fn field_code(
    index: usize,
    field_ident: &Ident,
    field_type: &Type,
    table_name: &str,
    attrs: &attributes::ColumnAttributes,
) -> FieldCode {
    let field_name = field_ident.unraw().to_string();
    let column_name = attrs.column_name.clone().unwrap_or_else(|| field_name.clone());
    let const_name = format_ident!("{}", utils::screaming_snake_case(&field_name));
    let is_option = utils::option_inner_type(field_type).is_some();
    let storage_type = utils::option_inner_type(field_type).unwrap_or(field_type);

    let mut def = quote! {
        ::rowguard::FieldDef::new(
            #index,
            #table_name,
            #field_name,
            #column_name,
            <#storage_type as ::rowguard::ValueType>::null_value,
        )
    };
    if attrs.is_primary_key {
        def = quote! { #def.primary_key() };
    }
    if attrs.is_auto_increment {
        def = quote! { #def.identity() };
    }
    if let Some(sql) = &attrs.expression {
        def = quote! { #def.expression(#sql) };
    }

    let const_doc = format!("Field `{}` (column `{}`).", field_name, column_name);
    let constant = quote! {
        #[doc = #const_doc]
        pub const #const_name: ::rowguard::FieldDef = #def;
    };

    let try_getter = format_ident!("try_{}", field_name);
    let setter = format_ident!("set_{}", field_name);
    let null_setter = format_ident!("set_{}_null", field_name);

    let setters = if attrs.expression.is_some() {
        quote! {}
    } else {
        quote! {
            pub fn #setter(&mut self, value: #field_type) -> &mut Self {
                self.state.assign(&Self::#const_name, ::rowguard::ValueType::into_value(value));
                self
            }

            pub fn #null_setter(&mut self) -> &mut Self {
                self.state.assign(&Self::#const_name, Self::#const_name.null_value());
                self
            }
        }
    };

    let accessors = quote! {
        pub fn #field_ident(&self) -> ::std::option::Option<#storage_type> {
            self.state.get(&Self::#const_name)
        }

        pub fn #try_getter(
            &self,
        ) -> ::std::result::Result<::std::option::Option<#storage_type>, ::rowguard::RowError> {
            self.state.try_get(&Self::#const_name)
        }

        #setters
    };

    let from_model = quote! {
        row.state.assign(
            &Self::#const_name,
            ::rowguard::ValueType::into_value(::std::clone::Clone::clone(&model.#field_ident)),
        );
    };

    // Expression fields are not selected by default, so an unloaded one reads as null.
    let read = if attrs.expression.is_some() {
        quote! { self.state.get::<#storage_type>(&Self::#const_name) }
    } else {
        quote! { self.state.try_get::<#storage_type>(&Self::#const_name)? }
    };
    let to_model = if is_option {
        quote! {
            #field_ident: #read,
        }
    } else {
        let message = format!("field '{}' of '{}' is null", field_name, table_name);
        quote! {
            #field_ident: #read
                .ok_or_else(|| ::rowguard::RowError::InvalidPrecondition(#message.to_string()))?,
        }
    };

    FieldCode {
        constant,
        const_name,
        accessors,
        from_model,
        to_model,
    }
}
