use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, GenericArgument, ItemFn, Pat, PathArguments, ReturnType, Type};

/// Turns a function of positional number arguments into a constructor of a
/// `mathexpr_rs::Callback`.
///
/// The annotated function keeps its name but takes no arguments and returns the
/// callback; its arity is the number of parameters. Every parameter must have the
/// number type the function returns, either directly or as `Result<N, String>`.
/// Generic functions need `N: mathexpr_rs::Number` among their bounds.
///
/// ```ignore
/// #[mathexpr_fn]
/// fn hypot(x: f64, y: f64) -> f64 {
///     x.hypot(y)
/// }
///
/// evaluator.connect("hypot", hypot());
/// ```
#[proc_macro_attribute]
pub fn mathexpr_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &ItemFn) -> syn::Result<TokenStream2> {
    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_attrs = &input.attrs;
    let fn_sig = &input.sig;
    let fn_body = &input.block;
    let generics = &input.sig.generics;
    let where_clause = &generics.where_clause;

    let ReturnType::Type(_, output) = &input.sig.output else {
        return Err(syn::Error::new(
            input.sig.span(),
            "expected a function returning a number",
        ));
    };
    let (number, fallible) = match result_value_type(output) {
        Some(ty) => (ty, true),
        None => (&**output, false),
    };
    let number_name = quote!(#number).to_string();

    let mut arg_patterns = Vec::new();
    let mut arg_names = Vec::new();
    for arg in &input.sig.inputs {
        let FnArg::Typed(pat_type) = arg else {
            return Err(syn::Error::new(arg.span(), "methods are not supported"));
        };
        let Pat::Ident(pat_ident) = &*pat_type.pat else {
            return Err(syn::Error::new(
                pat_type.pat.span(),
                "expected a plain argument name",
            ));
        };
        let ty = &pat_type.ty;
        if quote!(#ty).to_string() != number_name {
            return Err(syn::Error::new(
                ty.span(),
                format!("expected every argument to be `{number_name}`"),
            ));
        }
        arg_patterns.push(&pat_type.pat);
        arg_names.push(&pat_ident.ident);
    }

    let arity = arg_names.len();
    let indices = 0..arity;
    let call = quote! { #fn_name(#(#arg_names),*) };
    let result = if fallible {
        call
    } else {
        quote! { ::core::result::Result::Ok(#call) }
    };

    Ok(quote! {
        #(#fn_attrs)*
        #fn_vis fn #fn_name #generics () -> ::mathexpr_rs::Callback<#number> #where_clause {
            #fn_sig #fn_body

            ::mathexpr_rs::Callback::try_new(#arity, |mathexpr_args: &[#number]| {
                if mathexpr_args.len() != #arity {
                    return ::core::result::Result::Err(::std::format!(
                        "Expected {} arguments, but got {}",
                        #arity,
                        mathexpr_args.len()
                    ));
                }
                #(let #arg_patterns = mathexpr_args[#indices];)*
                #result
            })
        }
    })
}

/// `T` when `ty` is spelled `Result<T, ...>`.
fn result_value_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}
