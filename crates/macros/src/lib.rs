mod async_trait;
mod testing;

use proc_macro::TokenStream;

/// Attribute macro switch `async_trait` usage depending on WASM target
#[proc_macro_attribute]
pub fn async_trait(args: TokenStream, input: TokenStream) -> TokenStream {
    async_trait::async_trait(args, input)
}

/// Attribute macro to async test all targets
#[proc_macro_attribute]
pub fn async_test_all(args: TokenStream, input: TokenStream) -> TokenStream {
    testing::async_test_all(args, input)
}

/// Attribute macro to test all targets
#[proc_macro_attribute]
pub fn test_all(args: TokenStream, input: TokenStream) -> TokenStream {
    testing::test_all(args, input)
}
