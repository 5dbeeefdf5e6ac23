//! Fallback-related macros.
//!
//! This module contains:
//! - `#[fallbacks]` - Turns `on_<event>` methods of an impl block into a `Fallbacks` table

use proc_macro::TokenStream;
use quote::quote;
use syn::{FnArg, ImplItem, ItemImpl, LitStr, parse_macro_input};

const PREFIX: &str = "on_";

/// Implementation of the `#[fallbacks]` attribute macro.
pub fn fallbacks_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[fallbacks] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemImpl);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[fallbacks] must be placed on an inherent impl block",
        ));
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let mut arms = Vec::new();
    for item in &input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let method_name = &method.sig.ident;
        let Some(event) = method_name.to_string().strip_prefix(PREFIX).map(str::to_owned) else {
            continue;
        };
        if event.is_empty() {
            continue;
        }

        let mut inputs = method.sig.inputs.iter();
        let takes_mut_self = matches!(
            inputs.next(),
            Some(FnArg::Receiver(receiver)) if receiver.mutability.is_some() && receiver.reference.is_some()
        );
        if !takes_mut_self || inputs.count() != 1 {
            return Err(syn::Error::new_spanned(
                &method.sig,
                "fallback methods must have the signature `fn on_<event>(&mut self, args: &[Arg]) -> R`",
            ));
        }

        let event = LitStr::new(&event, method_name.span());
        arms.push(quote! {
            #event => ::core::option::Option::Some(::bellhop::Handler::new(
                |host: &mut Self, args: &[<Self as ::bellhop::DispatchHost>::Arg]| {
                    Self::#method_name(host, args)
                },
            )),
        });
    }

    Ok(quote! {
        #input

        impl #impl_generics ::bellhop::Fallbacks for #self_ty #where_clause {
            fn resolve(
                &self,
                event: &str,
            ) -> ::core::option::Option<::bellhop::Handler<Self>> {
                match event {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
