//! Procedural macros for bellhop.
//!
//! Use through the `bellhop` crate with the `macros` feature; generated code
//! refers to `::bellhop` paths.

use proc_macro::TokenStream;

mod fallbacks;
mod host;

/// Derive macro for implementing `DispatchHost`.
///
/// The registry lives in a field of type `Option<Registry<Self>>`, either
/// named `registry` or marked `#[dispatch(registry)]`.
///
/// Struct attributes:
/// - `#[dispatch(arg = Type)]` - handler argument type, default `bellhop::Value`
/// - `#[dispatch(error_event = "name")]` - rename the error event
/// - `#[dispatch(fallbacks)]` - use the type's `#[fallbacks]` table
///
/// ```rust,ignore
/// #[derive(Default, bellhop::DispatchHost)]
/// #[dispatch(fallbacks)]
/// struct Greeter {
///     #[dispatch(registry)]
///     handlers: Option<bellhop::Registry<Self>>,
///     greeted: usize,
/// }
/// ```
#[proc_macro_derive(DispatchHost, attributes(dispatch))]
pub fn derive_dispatch_host(input: TokenStream) -> TokenStream {
    host::derive_dispatch_host_impl(input)
}

/// Attribute macro turning `on_<event>` methods into fallback handlers.
///
/// Every method of the annotated inherent impl block whose name starts with
/// `on_` must take `(&mut self, args: &[Arg])`; it becomes the fallback for
/// the event named by the rest of the method name.
///
/// ```rust,ignore
/// #[bellhop::fallbacks]
/// impl Greeter {
///     fn on_greet(&mut self, _args: &[bellhop::Value]) -> bool {
///         self.greeted += 1;
///         true
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn fallbacks(attr: TokenStream, item: TokenStream) -> TokenStream {
    fallbacks::fallbacks_impl(attr, item)
}
