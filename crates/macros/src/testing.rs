use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input};

pub(crate) fn async_test_all(_args: TokenStream, input: TokenStream) -> TokenStream {
    let test_fn = parse_macro_input!(input as ItemFn);
    quote! {
        #[cfg_attr(
            all(target_family = "wasm", target_os = "unknown"),
            wasm_bindgen_test::wasm_bindgen_test
        )]
        #[cfg_attr(
            not(all(target_family = "wasm", target_os = "unknown")),
            tokio::test
        )]
        #test_fn
    }
    .into()
}

pub(crate) fn test_all(_args: TokenStream, input: TokenStream) -> TokenStream {
    let test_fn = parse_macro_input!(input as ItemFn);
    quote! {
        #[cfg_attr(
            all(target_family = "wasm", target_os = "unknown"),
            wasm_bindgen_test::wasm_bindgen_test
        )]
        #[cfg_attr(not(all(target_family = "wasm", target_os = "unknown")), test)]
        #test_fn
    }
    .into()
}
