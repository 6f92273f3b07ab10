//! Procedural macros for tracekit.
//!
//! Generated code refers to items through `::tracekit`, so the facade
//! crate must be a dependency of the crate using these macros.

mod constructor;
mod instrument;
mod method;
mod tags;

use proc_macro::TokenStream;
use syn::{DeriveInput, ImplItemFn, parse_macro_input};

/// Announces every call to a method through the global logger.
///
/// The arguments are printed on entry and the return type once the method
/// has returned. A method returning `Result` only reports an `Ok`; an
/// `Err` is returned unchanged without a result line. Every parameter must
/// be a plain identifier whose type implements `Debug`.
///
/// # Example
///
/// ```ignore
/// impl Account {
///     #[trace_method(label = "deposit funds", color = "yellow")]
///     fn deposit(&mut self, amount: u64) -> u64 {
///         self.balance += amount;
///         self.balance
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn trace_method(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as method::MethodArgs);
    let function = parse_macro_input!(item as ImplItemFn);

    match method::handle(args, function) {
        Ok(codegen) => codegen.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Announces every construction through the global logger.
///
/// Put it on an associated function returning `Self`; the announcement
/// `New: <Type> [<args>]` is printed before the body runs, with the
/// parameter tags of the type applied.
///
/// # Example
///
/// ```ignore
/// impl Account {
///     #[trace_constructor]
///     fn new(owner: String, pin: u32) -> Self {
///         Self { owner, pin, balance: 0 }
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn trace_constructor(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = proc_macro2::TokenStream::from(attr);
    if !attr.is_empty() {
        return syn::Error::new_spanned(attr, "trace_constructor takes no arguments")
            .to_compile_error()
            .into();
    }
    let function = parse_macro_input!(item as ImplItemFn);

    match constructor::handle(function) {
        Ok(codegen) => codegen.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Generates the `Instrument` impl describing a type's tags.
///
/// # Example
///
/// ```ignore
/// #[derive(Instrument)]
/// #[instrument(color = "cyan", label = "Acct", param(1, redact))]
/// pub struct Account {
///     pub owner: String,
///     #[instrument(redact)]
///     pub pin: u32,
///     #[instrument(label = "funds", color = "green")]
///     pub balance: u64,
/// }
/// ```
///
/// Type level: `color`, `label`, `redact`, `mute`,
/// `param(<index>, <tags>...)` for constructor parameters and
/// `method("<name>", <tags>...)` for `#[trace_method]` methods. Field level:
/// `color`, `label`, `redact`, `mute`. Color names are checked here;
/// duplicate tags are reported by `MetadataRegistry::install`.
#[proc_macro_derive(Instrument, attributes(instrument))]
pub fn derive_instrument(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let result = instrument::handle(ast);
    match result {
        Ok(codegen) => codegen.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
