//! Parsing of `#[entity(...)]` and `#[expose(...)]`, plus the `#[serde(...)]`
//! keys that decide serialized field names.

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Field, LitStr, Meta, Type};

use crate::{ENTITY_ATTRIBUTE_NAME, EXPOSE_ATTRIBUTE_NAME, SERDE_ATTRIBUTE_NAME};

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes found in `#[entity(...)]` on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `extends = Base`
    pub extends: Option<Type>,
    /// `auto_register`
    pub auto_register: Option<Span>,
    /// `#[serde(rename_all = "...")]`
    pub rename_all: RenameRule,
}

impl TypeAttributes {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(ENTITY_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("extends") {
                    if parsed.extends.is_some() {
                        return Err(meta.error("an entity extends at most one supertype"));
                    }
                    parsed.extends = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("auto_register") {
                    parsed.auto_register = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("expected `extends = Type` or `auto_register`"))
                }
            })?;
        }

        for attr in attrs {
            if !attr.path().is_ident(SERDE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if !meta.path.is_ident("rename_all") {
                    return skip_meta(&meta);
                }
                if let Some(rule) = parse_serialize_name(&meta)? {
                    parsed.rename_all = RenameRule::from_lit(&rule)?;
                }
                Ok(())
            })?;
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// RenameRule

/// The field half of serde's `rename_all` rules.
#[derive(Default, Clone, Copy)]
pub(crate) enum RenameRule {
    #[default]
    None,
    UpperCase,
    PascalCase,
    CamelCase,
    ScreamingSnakeCase,
    KebabCase,
    ScreamingKebabCase,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        Ok(match lit.value().as_str() {
            "lowercase" | "snake_case" => Self::None,
            "UPPERCASE" => Self::UpperCase,
            "PascalCase" => Self::PascalCase,
            "camelCase" => Self::CamelCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            "kebab-case" => Self::KebabCase,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebabCase,
            _ => return Err(syn::Error::new(lit.span(), "unknown `rename_all` rule")),
        })
    }

    /// Applies the rule to a snake_case field name.
    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            Self::None => field.to_owned(),
            Self::UpperCase | Self::ScreamingSnakeCase => field.to_ascii_uppercase(),
            Self::PascalCase => pascal_case(field),
            Self::CamelCase => {
                let pascal = pascal_case(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            Self::KebabCase => field.replace('_', "-"),
            Self::ScreamingKebabCase => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

fn pascal_case(field: &str) -> String {
    let mut pascal = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(ch);
        }
    }
    pascal
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// A literal sub-shape written as `shape(a, b(c))`.
pub(crate) struct Shape(pub Vec<(String, Option<Shape>)>);

/// How an exposed field appears in the mask.
pub(crate) enum ExposeKind {
    Plain,
    Entity(Type),
    Entities(Type),
    Shape(Shape),
}

/// Attributes found in `#[expose(...)]` on one field.
pub(crate) struct FieldAttributes {
    pub kind: ExposeKind,
    pub rename: Option<LitStr>,
    /// The serialized name from `#[serde(rename = "...")]`.
    pub serde_rename: Option<LitStr>,
}

impl FieldAttributes {
    /// Returns `None` for a field without `#[expose]`.
    pub(crate) fn parse(field: &Field) -> syn::Result<Option<Self>> {
        let mut parsed: Option<Self> = None;

        for attr in &field.attrs {
            if !attr.path().is_ident(EXPOSE_ATTRIBUTE_NAME) {
                continue;
            }
            if parsed.is_some() {
                return Err(syn::Error::new(
                    attr.span(),
                    "`#[expose]` may appear once per field",
                ));
            }

            let mut attrs = Self {
                kind: ExposeKind::Plain,
                rename: None,
                serde_rename: None,
            };

            match &attr.meta {
                Meta::Path(_) => {}
                Meta::List(_) => {
                    let mut kind_set = false;
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("rename") {
                            attrs.rename = Some(meta.value()?.parse()?);
                            return Ok(());
                        }

                        let kind = if meta.path.is_ident("entity") {
                            ExposeKind::Entity(meta.value()?.parse()?)
                        } else if meta.path.is_ident("entities") {
                            ExposeKind::Entities(meta.value()?.parse()?)
                        } else if meta.path.is_ident("shape") {
                            ExposeKind::Shape(parse_shape(&meta)?)
                        } else {
                            return Err(meta.error(
                                "expected `entity = Type`, `entities = Type`, `shape(...)` or `rename = \"...\"`",
                            ));
                        };

                        if kind_set {
                            return Err(meta.error(
                                "`entity`, `entities` and `shape` are mutually exclusive",
                            ));
                        }
                        kind_set = true;
                        attrs.kind = kind;
                        Ok(())
                    })?;
                }
                Meta::NameValue(meta) => {
                    return Err(syn::Error::new(
                        meta.span(),
                        "expected `#[expose]` or `#[expose(...)]`",
                    ));
                }
            }

            parsed = Some(attrs);
        }

        if let Some(attrs) = &mut parsed {
            attrs.serde_rename = parse_serde_rename(field)?;
        }

        Ok(parsed)
    }
}

fn parse_serde_rename(field: &Field) -> syn::Result<Option<LitStr>> {
    let mut rename = None;
    for attr in &field.attrs {
        if !attr.path().is_ident(SERDE_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return skip_meta(&meta);
            }
            if let Some(name) = parse_serialize_name(&meta)? {
                rename = Some(name);
            }
            Ok(())
        })?;
    }
    Ok(rename)
}

/// Reads `key = "..."` or `key(serialize = "...", ...)`.
fn parse_serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(syn::token::Paren) {
        let mut name = None;
        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("serialize") {
                name = Some(inner.value()?.parse()?);
                Ok(())
            } else {
                skip_meta(&inner)
            }
        })?;
        Ok(name)
    } else {
        Ok(Some(meta.value()?.parse()?))
    }
}

/// Consumes a serde key this derive does not care about.
fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn parse_shape(meta: &ParseNestedMeta) -> syn::Result<Shape> {
    let mut entries = Vec::new();
    meta.parse_nested_meta(|inner| {
        let Some(ident) = inner.path.get_ident() else {
            return Err(inner.error("expected an attribute name"));
        };
        let name = ident.unraw().to_string();
        if entries.iter().any(|(existing, _)| *existing == name) {
            return Err(inner.error(format!("`{name}` appears twice in this shape")));
        }

        let sub = if inner.input.peek(syn::token::Paren) {
            Some(parse_shape(&inner)?)
        } else {
            None
        };
        entries.push((name, sub));
        Ok(())
    })?;
    Ok(Shape(entries))
}

#[cfg(test)]
mod tests {
    use super::RenameRule;

    #[test]
    fn rename_rules_match_serde() {
        let field = "user_id_v2";
        assert_eq!(RenameRule::None.apply(field), "user_id_v2");
        assert_eq!(RenameRule::UpperCase.apply(field), "USER_ID_V2");
        assert_eq!(RenameRule::PascalCase.apply(field), "UserIdV2");
        assert_eq!(RenameRule::CamelCase.apply(field), "userIdV2");
        assert_eq!(RenameRule::ScreamingSnakeCase.apply(field), "USER_ID_V2");
        assert_eq!(RenameRule::KebabCase.apply(field), "user-id-v2");
        assert_eq!(RenameRule::ScreamingKebabCase.apply(field), "USER-ID-V2");
    }
}
