//! Host-related macros.
//!
//! This module contains:
//! - `#[derive(DispatchHost)]` - Wires a registry field into a `DispatchHost` implementation

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Ident, LitStr, Member, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Struct-level `#[dispatch(...)]` arguments.
#[derive(Default)]
pub(crate) struct HostArgs {
    pub arg: Option<Type>,
    pub error_event: Option<LitStr>,
    pub fallbacks: bool,
}

impl HostArgs {
    fn merge(&mut self, other: HostArgs) {
        if other.arg.is_some() {
            self.arg = other.arg;
        }
        if other.error_event.is_some() {
            self.error_event = other.error_event;
        }
        self.fallbacks |= other.fallbacks;
    }
}

impl Parse for HostArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = HostArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "arg" => {
                    input.parse::<Token![=]>()?;
                    args.arg = Some(input.parse()?);
                }
                "error_event" => {
                    input.parse::<Token![=]>()?;
                    args.error_event = Some(input.parse()?);
                }
                "fallbacks" => args.fallbacks = true,
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

/// Implementation of `#[derive(DispatchHost)]`.
pub fn derive_dispatch_host_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut args = HostArgs::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("dispatch")) {
        args.merge(attr.parse_args()?);
    }

    let registry = registry_member(input)?;

    let arg_type = match args.arg {
        Some(ty) => quote! { #ty },
        None => quote! { ::bellhop::Value },
    };

    let error_event = args.error_event.map(|lit| {
        quote! {
            const ERROR_EVENT: &'static str = #lit;
        }
    });

    let fallback = args.fallbacks.then(|| {
        quote! {
            fn fallback(
                &self,
                event: &str,
            ) -> ::core::option::Option<::bellhop::Handler<Self>> {
                <Self as ::bellhop::Fallbacks>::resolve(self, event)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::bellhop::DispatchHost for #name #ty_generics #where_clause {
            type Arg = #arg_type;

            #error_event

            fn registry(&self) -> ::core::option::Option<&::bellhop::Registry<Self>> {
                self.#registry.as_ref()
            }

            fn registry_mut(&mut self) -> ::core::option::Option<&mut ::bellhop::Registry<Self>> {
                self.#registry.as_mut()
            }

            fn set_registry(
                &mut self,
                registry: ::bellhop::Registry<Self>,
            ) -> &mut ::bellhop::Registry<Self> {
                self.#registry.insert(registry)
            }

            #fallback
        }
    })
}

/// Find the field holding the registry.
///
/// A field marked `#[dispatch(registry)]` wins; otherwise a field named
/// `registry` is used.
fn registry_member(input: &DeriveInput) -> syn::Result<Member> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "DispatchHost can only be derived for structs",
        ));
    };

    let mut marked = None;
    let mut named = None;
    for (index, field) in data.fields.iter().enumerate() {
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(index.into()),
        };

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("dispatch")) {
            let ident: Ident = attr.parse_args()?;
            if ident != "registry" {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown field attribute: {}", ident),
                ));
            }
            if marked.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "only one field can be marked #[dispatch(registry)]",
                ));
            }
            marked = Some(member.clone());
        }

        if field.ident.as_ref().is_some_and(|i| i == "registry") {
            named = Some(member);
        }
    }

    marked.or(named).ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "DispatchHost needs a `registry` field or one marked #[dispatch(registry)]",
        )
    })
}
