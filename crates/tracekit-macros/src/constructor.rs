use proc_macro2::TokenStream;
use quote::quote;
use syn::{ImplItemFn, ReturnType};

use crate::method::argument_idents;

pub(crate) fn handle(function: ImplItemFn) -> syn::Result<TokenStream> {
    if matches!(function.sig.output, ReturnType::Default) {
        return Err(syn::Error::new_spanned(
            &function.sig,
            "trace_constructor expects a constructor returning Self",
        ));
    }
    if let Some(receiver) = function.sig.receiver() {
        return Err(syn::Error::new_spanned(
            receiver,
            "trace_constructor expects an associated function without self",
        ));
    }

    let idents = argument_idents(&function, "trace_constructor")?;
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
            ::tracekit::ConstructorInterceptor::of::<Self>()
                .announce(&[#(&#idents as &dyn ::std::fmt::Debug),*]);
            #block
        }
    })
}
