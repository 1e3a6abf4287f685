use crate::macros::error::single_generic_type;
use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Generics, Ident, Lit, LitStr, Meta, Path, Token,
    Type, parse_quote,
};

#[derive(Default)]
struct ModelArgs {
    display_name: Option<LitStr>,
    help: Option<LitStr>,
    deprecated: bool,
    krate: Option<Path>,
}

/// How a field is bound to its parameter.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Constructor argument: required on read, always written.
    Mandatory,
    /// `Option<T>` property: absent reads as `None`, `None` is not written.
    Optional,
    /// Property falling back to `Default`: omitted on write when equal to the default.
    Defaulted,
    /// Not a parameter at all; filled from `Default` on read.
    Skipped,
}

struct FieldSpec {
    ident: Ident,
    ty: Type,
    name: LitStr,
    binding: Binding,
    deprecated: bool,
    help: Option<String>,
}

/// Expands the `#[data_model]` macro.
pub fn expand_model(args: TokenStream, mut input: DeriveInput) -> TokenStream {
    let args = match parse_model_args(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return syn::Error::new_spanned(lifetime, "data_model types must own their data")
            .to_compile_error();
    }
    let specs = match field_specs(&input) {
        Ok(specs) => specs,
        Err(err) => return err.to_compile_error(),
    };
    strip_field_attrs(&mut input);

    let krate = args.krate.clone().unwrap_or_else(|| parse_quote!(::databind_kernel));
    let deprecated = args.deprecated || input.attrs.iter().any(|a| a.path().is_ident("deprecated"));
    let help = args.help.as_ref().map(LitStr::value).or_else(|| doc_text(&input.attrs));

    let describable = describable_tokens(&input, &krate, &specs, &args, deprecated, help.as_deref());
    let data_value = data_value_tokens(&input, &krate);

    quote! {
        #input
        #describable
        #data_value
    }
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ModelArgs::default();

    for meta in metas {
        match &meta {
            Meta::Path(path) if path.is_ident("deprecated") => parsed.deprecated = true,
            Meta::NameValue(nv) if nv.path.is_ident("display_name") => {
                set_once(&mut parsed.display_name, string_literal(&nv.value)?, &meta)?;
            },
            Meta::NameValue(nv) if nv.path.is_ident("help") => {
                set_once(&mut parsed.help, string_literal(&nv.value)?, &meta)?;
            },
            Meta::NameValue(nv) if nv.path.is_ident("crate") => {
                let path = string_literal(&nv.value)?.parse::<Path>()?;
                set_once(&mut parsed.krate, path, &meta)?;
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    meta,
                    "expected `display_name = \"...\"`, `help = \"...\"`, `crate = \"...\"` or `deprecated`",
                ));
            },
        }
    }

    Ok(parsed)
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &Meta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(meta, "duplicate data_model argument"));
    }
    *slot = Some(value);
    Ok(())
}

fn string_literal(expr: &Expr) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit) => Ok(lit.clone()),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

fn field_specs(input: &DeriveInput) -> syn::Result<Vec<FieldSpec>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "data_model only supports structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "data_model only supports structs with named fields",
        ));
    };

    let mut seen = FxHashSet::default();
    let mut specs = Vec::with_capacity(fields.named.len());

    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "data_model only supports named fields"));
        };

        let mut rename: Option<LitStr> = None;
        let mut optional = false;
        let mut skip = false;
        let mut deprecated = false;
        let mut help: Option<String> = None;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("data")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("optional") || meta.path.is_ident("default") {
                    optional = true;
                } else if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("deprecated") {
                    deprecated = true;
                } else if meta.path.is_ident("help") {
                    let lit: LitStr = meta.value()?.parse()?;
                    help = Some(lit.value());
                } else {
                    return Err(meta.error(
                        "unknown data attribute, expected rename, optional, default, skip, deprecated or help",
                    ));
                }
                Ok(())
            })?;
        }

        let binding = if skip {
            Binding::Skipped
        } else if single_generic_type(&field.ty, "Option").is_some() {
            Binding::Optional
        } else if optional {
            Binding::Defaulted
        } else {
            Binding::Mandatory
        };

        let name = rename.unwrap_or_else(|| {
            let raw = ident.to_string();
            LitStr::new(raw.strip_prefix("r#").unwrap_or(&raw), ident.span())
        });
        if binding != Binding::Skipped && !seen.insert(name.value()) {
            return Err(syn::Error::new_spanned(
                &name,
                format!("duplicate parameter name `{}`", name.value()),
            ));
        }

        specs.push(FieldSpec {
            ident,
            ty: field.ty.clone(),
            name,
            binding,
            deprecated: deprecated || field.attrs.iter().any(|a| a.path().is_ident("deprecated")),
            help: help.or_else(|| doc_text(&field.attrs)),
        });
    }

    Ok(specs)
}

/// Helper attributes must not survive into the emitted struct.
fn strip_field_attrs(input: &mut DeriveInput) {
    if let Data::Struct(data) = &mut input.data {
        for field in &mut data.fields {
            field.attrs.retain(|a| !a.path().is_ident("data"));
        }
    }
}

/// Joins `///` lines, dropping the single leading space rustdoc inserts.
fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr_lit) => match &expr_lit.lit {
                    Lit::Str(lit) => Some(lit.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').map_or_else(|| line.clone(), str::to_owned))
        .collect();

    let text = lines.join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn where_clause_with_bounds(generics: &Generics, krate: &Path) -> TokenStream {
    let mut predicates = generics.where_clause.as_ref().map(|w| w.predicates.clone()).unwrap_or_default();
    for param in generics.type_params() {
        let ident = &param.ident;
        predicates.push(parse_quote!(
            #ident: #krate::DataValue + ::core::marker::Send + ::core::marker::Sync + 'static
        ));
    }

    if predicates.is_empty() { quote! {} } else { quote! { where #predicates } }
}

fn optional_str(value: Option<&str>) -> TokenStream {
    value.map_or_else(
        || quote! { ::core::option::Option::None },
        |v| quote! { ::core::option::Option::Some(#v) },
    )
}

fn describable_tokens(
    input: &DeriveInput,
    krate: &Path,
    specs: &[FieldSpec],
    args: &ModelArgs,
    deprecated: bool,
    help: Option<&str>,
) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = where_clause_with_bounds(&input.generics, krate);

    let parameters = specs.iter().filter(|s| s.binding != Binding::Skipped).map(|s| {
        let FieldSpec { ty, name, .. } = s;
        let mandatory = s.binding == Binding::Mandatory;
        let help = s.help.as_ref().map(|h| quote! { .with_help(#h) });
        let deprecated = s.deprecated.then(|| quote! { .deprecated(true) });
        quote! {
            #krate::DataModelParameter::new(
                #name,
                <#ty as #krate::DataValue>::parameter_type(),
                #mandatory,
            ) #help #deprecated
        }
    });

    let reads = specs.iter().map(|s| {
        let FieldSpec { ident, ty, name, .. } = s;
        match s.binding {
            Binding::Mandatory => quote! {
                let #ident: #ty = __arguments.required::<#ty>(#name, __context)?;
            },
            Binding::Optional | Binding::Defaulted => quote! {
                let #ident: #ty = __arguments.optional::<#ty>(#name, __context)?.unwrap_or_default();
            },
            Binding::Skipped => quote! {
                let #ident: #ty = ::core::default::Default::default();
            },
        }
    });
    let idents = specs.iter().map(|s| &s.ident);

    let writes = specs.iter().map(|s| {
        let FieldSpec { ident, ty, name, .. } = s;
        match s.binding {
            Binding::Mandatory => quote! {
                __arguments.insert(#name, &self.#ident, __context)?;
            },
            Binding::Optional => quote! {
                __arguments.insert_optional(#name, &self.#ident, __context)?;
            },
            Binding::Defaulted => quote! {
                if self.#ident != <#ty as ::core::default::Default>::default() {
                    __arguments.insert_optional(#name, &self.#ident, __context)?;
                }
            },
            Binding::Skipped => quote! {},
        }
    });

    let display_name = optional_str(args.display_name.as_ref().map(LitStr::value).as_deref());
    let help = optional_str(help);

    quote! {
        #[allow(deprecated, clippy::used_underscore_binding)]
        #[automatically_derived]
        impl #impl_generics #krate::Describable for #name #ty_generics #where_clause {
            fn parameters() -> ::std::vec::Vec<#krate::DataModelParameter> {
                ::std::vec![#(#parameters),*]
            }

            fn instantiate(
                __arguments: &mut #krate::Arguments,
                __context: &mut #krate::DataContext,
            ) -> ::core::result::Result<Self, #krate::DataError> {
                #(#reads)*
                ::core::result::Result::Ok(Self { #(#idents),* })
            }

            fn uninstantiate(
                &self,
                __arguments: &mut #krate::Arguments,
                __context: &mut #krate::DataContext,
            ) -> ::core::result::Result<(), #krate::DataError> {
                #(#writes)*
                ::core::result::Result::Ok(())
            }

            fn deprecated() -> bool {
                #deprecated
            }

            fn display_name() -> ::core::option::Option<&'static str> {
                #display_name
            }

            fn help() -> ::core::option::Option<&'static str> {
                #help
            }
        }
    }
}

fn data_value_tokens(input: &DeriveInput, krate: &Path) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = where_clause_with_bounds(&input.generics, krate);

    quote! {
        #[allow(deprecated)]
        #[automatically_derived]
        impl #impl_generics #krate::DataValue for #name #ty_generics #where_clause {
            fn parameter_type() -> #krate::ParameterType {
                #krate::ParameterType::Model(#krate::ModelRef::of::<Self>())
            }

            fn write_value(
                &self,
                context: &mut #krate::DataContext,
            ) -> ::core::result::Result<#krate::TreeNode, #krate::DataError> {
                #krate::reflect::write_describable(self, context)
            }

            fn read_value(
                node: &#krate::TreeNode,
                context: &mut #krate::DataContext,
            ) -> ::core::result::Result<Self, #krate::DataError> {
                #krate::reflect::read_describable::<Self>(node, context)
            }
        }
    }
}
