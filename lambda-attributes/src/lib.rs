#![deny(missing_docs)]

//! Attribute macros for the event transformer function.
//!
//! An asynchronous `main` annotated with `#[lambda]` must accept an event of
//! a type implementing `serde::Deserialize` and a `lambda_runtime::Context`,
//! and return a `Result<B, E>` where `B` implements `serde::Serialize` and
//! `E` converts into a `lambda_runtime::Diagnostic`.
//!
//! ```ignore
//! use event_transformer::{lambda, Error, Event};
//! use lambda_runtime::Context;
//!
//! #[lambda]
//! #[tokio::main]
//! async fn main(event: Event, context: Context) -> Result<Event, Error> {
//!     event_transformer::handle(event, context)
//! }
//! ```
//!
//! Only `main` can be tagged:
//!
//! ```compile_fail
//! use event_transformer_attributes::lambda;
//!
//! #[lambda]
//! async fn handler(event: String, context: ()) -> Result<String, ()> {
//!     Ok(event)
//! }
//!
//! fn main() {}
//! ```
//!
//! The attribute takes no arguments:
//!
//! ```compile_fail
//! use event_transformer_attributes::lambda;
//!
//! #[lambda(http)]
//! async fn main(event: String, context: ()) -> Result<String, ()> {
//!     Ok(event)
//! }
//! ```

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote_spanned;
use syn::{spanned::Spanned, AttributeArgs, FnArg, ItemFn, PatType};

/// Returns the typed argument at `index`, or the compile error to emit.
fn typed_arg<'a>(input: &'a ItemFn, index: usize, what: &str) -> Result<&'a PatType, TokenStream> {
    let inputs = &input.sig.inputs;
    match inputs.iter().nth(index) {
        Some(FnArg::Typed(arg)) => Ok(arg),
        _ => {
            let message = format!("fn main's {} argument must be fully formed", what);
            let tokens = quote_spanned! { inputs.span() =>
                compile_error!(#message);
            };
            Err(TokenStream::from(tokens))
        }
    }
}

#[proc_macro_attribute]
/// Wrap an async function into a Lambda function `main`.
pub fn lambda(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemFn);
    let args = syn::parse_macro_input!(attr as AttributeArgs);
    let ret = &input.sig.output;
    let name = &input.sig.ident;
    let body = &input.block;
    let attrs = &input.attrs;
    let asyncness = &input.sig.asyncness;
    let inputs = &input.sig.inputs;

    if !args.is_empty() {
        let tokens = quote_spanned! { args[0].span() =>
            compile_error!("#[lambda] takes no arguments");
        };
        return TokenStream::from(tokens);
    }

    if name != "main" {
        let tokens = quote_spanned! { name.span() =>
            compile_error!("only the main function can be tagged with #[lambda]");
        };
        return TokenStream::from(tokens);
    }

    if asyncness.is_none() {
        let tokens = quote_spanned! { input.span() =>
          compile_error!("the async keyword is missing from the function declaration");
        };
        return TokenStream::from(tokens);
    }

    if inputs.len() != 2 {
        let tokens = quote_spanned! { inputs.span() =>
            compile_error!("The #[lambda] macro expects two arguments: a triggered event and lambda context.");
        };
        return TokenStream::from(tokens);
    }

    let event = match typed_arg(&input, 0, "first") {
        Ok(arg) => arg,
        Err(tokens) => return tokens,
    };
    let context = match typed_arg(&input, 1, "second") {
        Ok(arg) => arg,
        Err(tokens) => return tokens,
    };
    let event_name = &event.pat;
    let event_type = &event.ty;
    let context_name = &context.pat;
    let context_type = &context.ty;

    let result = quote_spanned! { input.span() =>

        #(#attrs)*
        #asyncness fn main() -> ::std::result::Result<(), ::lambda_runtime::Error> {
            async fn actual(#event_name: #event_type, #context_name: #context_type) #ret #body

            ::event_transformer::logging::init();
            let f = ::lambda_runtime::service_fn(|event: ::lambda_runtime::LambdaEvent<#event_type>| async move {
                let (payload, context) = event.into_parts();
                actual(payload, context).await
            });
            ::lambda_runtime::run(f).await
        }
    };

    result.into()
}
