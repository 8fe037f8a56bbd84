//! Attribute parsing utilities

use syn::{Attribute, ExprLit, Field, Lit};

/// Read the string of a `#[name = "value"]` attribute.
///
/// Any other shape, or an empty string, is an error pointing at the attribute.
fn string_value(attr: &Attribute) -> syn::Result<String> {
    let meta = attr.meta.require_name_value()?;
    if let syn::Expr::Lit(ExprLit {
        lit: Lit::Str(s),
        ..
    }) = &meta.value
    {
        let value = s.value();
        if value.trim().is_empty() {
            return Err(syn::Error::new_spanned(attr, "attribute value must not be empty"));
        }
        return Ok(value);
    }
    Err(syn::Error::new_spanned(attr, "expected a string literal, e.g. #[name = \"value\"]"))
}

/// Extract table name from struct attributes
pub fn extract_table_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        if attr.path().is_ident("table_name") {
            return string_value(attr).map(Some);
        }
    }
    Ok(None)
}

/// Field-level attributes understood by `#[derive(Row)]`
#[derive(Default)]
pub struct ColumnAttributes {
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub column_name: Option<String>,
    /// SQL for a computed column; such fields are never written.
    pub expression: Option<String>,
}

/// Parse all column attributes from a field
pub fn parse_column_attributes(field: &Field) -> syn::Result<ColumnAttributes> {
    let mut attrs = ColumnAttributes::default();

    for attr in &field.attrs {
        if attr.path().is_ident("primary_key") {
            attr.meta.require_path_only()?;
            attrs.is_primary_key = true;
        } else if attr.path().is_ident("auto_increment") {
            attr.meta.require_path_only()?;
            attrs.is_auto_increment = true;
        } else if attr.path().is_ident("column_name") {
            attrs.column_name = Some(string_value(attr)?);
        } else if attr.path().is_ident("expression") {
            attrs.expression = Some(string_value(attr)?);
        }
    }

    if attrs.expression.is_some() && (attrs.is_primary_key || attrs.is_auto_increment) {
        return Err(syn::Error::new_spanned(
            field,
            "an #[expression] field cannot be a #[primary_key] or #[auto_increment]",
        ));
    }
    if attrs.is_auto_increment && !attrs.is_primary_key {
        return Err(syn::Error::new_spanned(
            field,
            "#[auto_increment] is only supported on the #[primary_key] field",
        ));
    }

    Ok(attrs)
}
