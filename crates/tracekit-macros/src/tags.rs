use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Ident, LitStr, Token};

const COLORS: [(&str, &str); 9] = [
    ("reset", "Reset"),
    ("black", "Black"),
    ("red", "Red"),
    ("green", "Green"),
    ("yellow", "Yellow"),
    ("blue", "Blue"),
    ("magenta", "Magenta"),
    ("cyan", "Cyan"),
    ("white", "White"),
];

/// Resolves a color name to its `Color` variant, ignoring case.
pub(crate) fn color_variant(name: &LitStr) -> syn::Result<Ident> {
    let value = name.value();
    COLORS
        .iter()
        .find(|(color, _)| color.eq_ignore_ascii_case(value.trim()))
        .map(|(_, variant)| Ident::new(variant, Span::call_site()))
        .ok_or_else(|| {
            let known: Vec<&str> = COLORS.iter().map(|(color, _)| *color).collect();
            syn::Error::new(
                name.span(),
                format!("unknown color `{value}`, expected one of: {}", known.join(", ")),
            )
        })
}

/// One tag in an `instrument(...)` list.
pub(crate) enum TagSpec {
    Color(Ident),
    Label(LitStr),
    Redact,
    Mute,
}

impl TagSpec {
    pub(crate) fn to_tokens(&self) -> TokenStream {
        match self {
            TagSpec::Color(variant) => {
                quote!(::tracekit::Tag::Color(::tracekit::Color::#variant))
            }
            TagSpec::Label(label) => {
                quote!(::tracekit::Tag::Label(::std::string::String::from(#label)))
            }
            TagSpec::Redact => quote!(::tracekit::Tag::Redact),
            TagSpec::Mute => quote!(::tracekit::Tag::Mute),
        }
    }
}

impl Parse for TagSpec {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        match key.to_string().as_str() {
            "redact" => Ok(TagSpec::Redact),
            "mute" => Ok(TagSpec::Mute),
            "label" => {
                input.parse::<Token![=]>()?;
                Ok(TagSpec::Label(input.parse()?))
            }
            "color" => {
                input.parse::<Token![=]>()?;
                let name: LitStr = input.parse()?;
                Ok(TagSpec::Color(color_variant(&name)?))
            }
            other => Err(syn::Error::new(
                key.span(),
                format!("unknown tag `{other}`, expected color, label, redact or mute"),
            )),
        }
    }
}
