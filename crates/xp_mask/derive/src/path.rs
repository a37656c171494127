//! Paths into the `xp_mask` crate used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `xp_mask` crate.
///
/// 1. For crates that depend on `xp_mask`, `::xp_mask` is returned.
/// 2. For crates that depend on `xp_core`, `::xp_core::mask` is returned.
/// 3. For crates that depend on `xp`, `::xp::mask` is returned.
/// 4. Otherwise `::xp_mask` is returned, which may be incorrect.
pub(crate) fn xp_mask() -> syn::Path {
    xp_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("xp_mask"))
}

#[inline(always)]
pub(crate) fn entity_(xp_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #xp_mask_path::registry::Entity
    }
}

#[inline(always)]
pub(crate) fn entity_decl_(xp_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #xp_mask_path::registry::EntityDecl
    }
}

#[inline(always)]
pub(crate) fn mask_(xp_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #xp_mask_path::mask::Mask
    }
}

#[inline(always)]
pub(crate) fn mask_value_(xp_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #xp_mask_path::mask::MaskValue
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(xp_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #xp_mask_path::__macro_exports::auto_register
    }
}
