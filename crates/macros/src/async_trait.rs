use proc_macro::TokenStream;
use quote::quote;
use syn::{Item, parse_macro_input};

/// Browser futures are not `Send`, so the wasm expansion opts out of the
/// `Send` bound that `async_trait` adds by default.
pub(crate) fn async_trait(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as Item);
    quote! {
        #[cfg_attr(
            all(target_family = "wasm", target_os = "unknown"),
            async_trait::async_trait(?Send)
        )]
        #[cfg_attr(
            not(all(target_family = "wasm", target_os = "unknown")),
            async_trait::async_trait
        )]
        #item
    }
    .into()
}
