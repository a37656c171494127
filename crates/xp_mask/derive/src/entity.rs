use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

use crate::attributes::{ExposeKind, FieldAttributes, Shape, TypeAttributes};
use crate::path;

// -----------------------------------------------------------------------------
// EntityDerive

/// A parsed `#[derive(Entity)]` input.
pub(crate) struct EntityDerive<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<(LitStr, ExposeKind)>,
}

impl<'a> EntityDerive<'a> {
    pub(crate) fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "`Entity` cannot be derived for generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Some(&named.named),
                Fields::Unit => None,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "`Entity` requires named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`Entity` can only be derived for structs",
                ));
            }
        };

        let attrs = TypeAttributes::parse(&ast.attrs)?;

        let mut fields = Vec::new();
        for field in named.into_iter().flatten() {
            let Some(field_attrs) = FieldAttributes::parse(field)? else {
                continue;
            };
            // Same precedence as serde: explicit names, then `rename_all`.
            let name = match (field_attrs.rename, field_attrs.serde_rename, &field.ident) {
                (Some(rename), _, _) | (None, Some(rename), _) => rename,
                (None, None, Some(ident)) => {
                    let name = attrs.rename_all.apply(&ident.unraw().to_string());
                    LitStr::new(&name, ident.span())
                }
                (None, None, None) => continue,
            };
            fields.push((name, field_attrs.kind));
        }

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields,
        })
    }

    pub(crate) fn to_tokens(&self) -> TokenStream {
        let xp_mask_path = path::xp_mask();
        let entity_ = path::entity_(&xp_mask_path);
        let entity_decl_ = path::entity_decl_(&xp_mask_path);
        let ident = self.ident;

        let extends = self.attrs.extends.as_ref().map(|base| {
            quote! { decl.extends::<#base>(); }
        });

        let fields = self.fields.iter().map(|(name, kind)| match kind {
            ExposeKind::Plain => quote! { decl.expose(#name); },
            ExposeKind::Entity(ty) => quote! { decl.expose_entity::<#ty>(#name); },
            ExposeKind::Entities(ty) => quote! { decl.expose_entities::<#ty>(#name); },
            ExposeKind::Shape(shape) => {
                let shape = shape_tokens(&xp_mask_path, shape);
                quote! { decl.expose_shape(#name, #shape); }
            }
        });

        let auto_register = self.auto_register_tokens(&xp_mask_path);

        quote! {
            const _: () = {
                impl #entity_ for #ident {
                    fn declare(decl: &mut #entity_decl_<'_>) {
                        #extends
                        #(#fields)*
                    }
                }

                #auto_register
            };
        }
    }

    #[cfg(feature = "auto_register")]
    fn auto_register_tokens(&self, xp_mask_path: &syn::Path) -> TokenStream {
        let Some(span) = self.attrs.auto_register else {
            return TokenStream::new();
        };
        let auto_register_ = path::auto_register_(xp_mask_path);
        let ident = self.ident;

        quote::quote_spanned! { span =>
            #auto_register_::inventory::submit! {
                #auto_register_::__AutoRegisterFunc(#auto_register_::__register::<#ident>)
            }
        }
    }

    #[cfg(not(feature = "auto_register"))]
    fn auto_register_tokens(&self, _: &syn::Path) -> TokenStream {
        TokenStream::new()
    }
}

fn shape_tokens(xp_mask_path: &syn::Path, shape: &Shape) -> TokenStream {
    let mask_ = path::mask_(xp_mask_path);
    let mask_value_ = path::mask_value_(xp_mask_path);

    let entries = shape.0.iter().map(|(name, sub)| match sub {
        None => quote! { mask.insert(#name, #mask_value_::Expose); },
        Some(sub) => {
            let sub = shape_tokens(xp_mask_path, sub);
            quote! { mask.insert(#name, #mask_value_::Nested(#sub)); }
        }
    });

    quote! {
        {
            let mut mask = #mask_::new();
            #(#entries)*
            mask
        }
    }
}
