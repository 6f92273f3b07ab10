use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Ident, LitInt, LitStr, Token};

use crate::tags::TagSpec;

/// One entry of a type-level `instrument(...)` list.
enum TypeItem {
    Tag(TagSpec),
    Param(usize, Vec<TagSpec>),
    Method(LitStr, Vec<TagSpec>),
}

/// Tags after the leading `<index>,` or `"name",` of a nested entry.
fn nested_tags(content: ParseStream, key: &Ident) -> syn::Result<Vec<TagSpec>> {
    content.parse::<Token![,]>()?;
    let tags = Punctuated::<TagSpec, Token![,]>::parse_terminated(content)?;
    if tags.is_empty() {
        return Err(syn::Error::new(
            key.span(),
            format!("{key}(...) needs at least one tag"),
        ));
    }
    Ok(tags.into_iter().collect())
}

impl Parse for TypeItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Ident) && input.peek2(syn::token::Paren) {
            let key: Ident = input.parse()?;
            let content;
            syn::parenthesized!(content in input);
            return match key.to_string().as_str() {
                "param" => {
                    let index: LitInt = content.parse()?;
                    let tags = nested_tags(&content, &key)?;
                    Ok(TypeItem::Param(index.base10_parse()?, tags))
                }
                "method" => {
                    let name: LitStr = content.parse()?;
                    let tags = nested_tags(&content, &key)?;
                    Ok(TypeItem::Method(name, tags))
                }
                _ => Err(syn::Error::new(
                    key.span(),
                    format!(
                        "unknown entry `{key}`, expected param(<index>, <tags>...) \
                         or method(\"<name>\", <tags>...)"
                    ),
                )),
            };
        }
        Ok(TypeItem::Tag(input.parse()?))
    }
}

fn instrument_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("instrument"))
}

pub(crate) fn handle(ast: DeriveInput) -> syn::Result<TokenStream> {
    let type_name = &ast.ident;
    let mut staged: Vec<TokenStream> = Vec::new();

    for attr in instrument_attrs(&ast.attrs) {
        let items = attr.parse_args_with(Punctuated::<TypeItem, Token![,]>::parse_terminated)?;
        for item in items {
            match item {
                TypeItem::Tag(tag) => {
                    let tag = tag.to_tokens();
                    staged.push(quote!(tags.on_type(#tag);));
                }
                TypeItem::Param(index, param_tags) => {
                    for tag in param_tags {
                        let tag = tag.to_tokens();
                        staged.push(quote!(tags.param(#index, #tag);));
                    }
                }
                TypeItem::Method(name, method_tags) => {
                    for tag in method_tags {
                        let tag = tag.to_tokens();
                        staged.push(quote!(tags.method(#name, #tag);));
                    }
                }
            }
        }
    }

    match &ast.data {
        Data::Struct(data) => {
            for (position, field) in data.fields.iter().enumerate() {
                let name = field
                    .ident
                    .as_ref()
                    .map_or_else(|| position.to_string(), ToString::to_string);
                for attr in instrument_attrs(&field.attrs) {
                    let specs =
                        attr.parse_args_with(Punctuated::<TagSpec, Token![,]>::parse_terminated)?;
                    for spec in specs {
                        let tag = spec.to_tokens();
                        staged.push(quote!(tags.property(#name, #tag);));
                    }
                }
            }
        }
        Data::Enum(_) => {}
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(type_name, "unions are not supported"));
        }
    }

    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tracekit::Instrument for #type_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn describe(tags: &mut ::tracekit::TypeTags) {
                #(#staged)*
            }
        }
    })
}
