use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{FnArg, Ident, ImplItemFn, LitStr, Pat, ReturnType, Token, Type};

use crate::tags::TagSpec;

/// Arguments of `#[trace_method(...)]`.
#[derive(Default)]
pub(crate) struct MethodArgs {
    label: Option<LitStr>,
    color: Option<Ident>,
}

impl Parse for MethodArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = MethodArgs::default();
        let specs = Punctuated::<TagSpec, Token![,]>::parse_terminated(input)?;
        for spec in specs {
            match spec {
                TagSpec::Label(label) => args.label = Some(label),
                TagSpec::Color(color) => args.color = Some(color),
                TagSpec::Redact | TagSpec::Mute => {
                    return Err(input.error(
                        "trace_method accepts label and color; for redact or mute add \
                         method(\"<name>\", redact) to the type's #[instrument(...)]",
                    ));
                }
            }
        }
        Ok(args)
    }
}

/// Identifiers of the typed parameters, in order.
pub(crate) fn argument_idents(function: &ImplItemFn, macro_name: &str) -> syn::Result<Vec<Ident>> {
    let mut idents = Vec::new();
    for input in &function.sig.inputs {
        let FnArg::Typed(typed) = input else {
            continue;
        };
        let Pat::Ident(pat) = typed.pat.as_ref() else {
            return Err(syn::Error::new_spanned(
                &typed.pat,
                format!("{macro_name} requires plain identifier parameters"),
            ));
        };
        idents.push(pat.ident.clone());
    }
    Ok(idents)
}

/// Whether the last path segment of the return type is `Result`.
fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = ty.as_ref() else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Result")
}

/// Return type to annotate the body closure with, when it can be written.
///
/// Closures accept neither `impl Trait` nor elided lifetimes in their
/// return type; those are left to inference.
fn closure_return(output: &ReturnType) -> TokenStream {
    match output {
        ReturnType::Default => quote!(-> ()),
        ReturnType::Type(_, ty) => {
            let text = ty.to_token_stream().to_string();
            if text.contains("impl") || text.contains('&') || text.contains("'_") {
                TokenStream::new()
            } else {
                quote!(-> #ty)
            }
        }
    }
}

pub(crate) fn handle(args: MethodArgs, function: ImplItemFn) -> syn::Result<TokenStream> {
    if let Some(asyncness) = &function.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "trace_method does not support async methods",
        ));
    }

    let idents = argument_idents(&function, "trace_method")?;
    let name = function.sig.ident.to_string();
    let label = args.label.map(|label| quote!(.with_label(#label)));
    let color = args
        .color
        .map(|color| quote!(.with_color(::tracekit::Color::#color)));
    let finish = if returns_result(&function.sig.output) {
        quote!(finished)
    } else {
        quote!(returned)
    };
    let closure_output = closure_return(&function.sig.output);

    let ImplItemFn {
        attrs,
        vis,
        defaultness,
        sig,
        block,
    } = function;

    Ok(quote! {
        #(#attrs)*
        #vis #defaultness #sig {
            let __tracekit_interceptor = ::tracekit::MethodInterceptor::of::<Self>(#name)
                #label
                #color;
            let __tracekit_invocation = __tracekit_interceptor
                .enter(&[#(&#idents as &dyn ::std::fmt::Debug),*]);
            #[allow(clippy::redundant_closure_call)]
            let __tracekit_result = (|| #closure_output #block)();
            __tracekit_invocation.#finish(__tracekit_result)
        }
    })
}
