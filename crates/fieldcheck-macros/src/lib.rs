//! Procedural macros for fieldcheck
//!
//! This crate provides `#[derive(Verify)]`, re-exported as
//! `fieldcheck::Verify`. The derive turns `#[verify(...)]` field attributes
//! into a static field table and a field reader, implementing
//! `fieldcheck::Inspect` for the type.
//!
//! Supported field attributes:
//!
//! - `#[verify(interval(min = 10, max = 100))]`
//! - `#[verify(max = 100.0)]` / `#[verify(min = -5)]`
//! - `#[verify(max_size = 3)]` / `#[verify(min_size = 1)]`
//! - `#[verify(not_null)]`
//! - `#[verify(category = "numeric")]` - override the category inferred from
//!   the field type, for type aliases and newtypes the macro cannot see through
//!
//! Several constraints may be combined in one attribute or spread over
//! several; they are evaluated in the order written.

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::{format_ident, quote, ToTokens};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Fields, GenericArgument, Index, Lit,
    PathArguments, Type,
};

/// Derive `fieldcheck::Inspect` (and with it `fieldcheck::Verify`).
///
/// # Example
///
/// ```rust,ignore
/// use fieldcheck::Verify;
///
/// #[derive(Verify)]
/// struct Person {
///     #[verify(interval(min = 10.0, max = 100.0))]
///     age: i32,
///
///     #[verify(not_null, max_size = 20)]
///     nickname: Option<String>,
/// }
/// ```
#[proc_macro_derive(Verify, attributes(verify))]
pub fn derive_verify(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_verify(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_verify(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    if let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("verify")) {
        return Err(syn::Error::new_spanned(
            attr,
            "#[verify(...)] is only supported on fields",
        ));
    }

    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Verify can only be derived for structs",
        ));
    };

    let members: Vec<(String, TokenStream2, &syn::Field)> = match &struct_data.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .filter_map(|field| {
                let ident = field.ident.as_ref()?;
                Some((ident.unraw().to_string(), ident.to_token_stream(), field))
            })
            .collect(),
        Fields::Unnamed(fields) => fields
            .unnamed
            .iter()
            .enumerate()
            .map(|(index, field)| (index.to_string(), Index::from(index).to_token_stream(), field))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let mut statics = Vec::new();
    let mut descriptors = Vec::new();
    let mut arms = Vec::new();

    for (position, (name, member, field)) in members.iter().enumerate() {
        let parsed = parse_field(&field.attrs)?;
        let shape = Shape::of(&field.ty);
        let category = parsed.category.unwrap_or_else(|| shape.category());
        check_compatible(field, category, &parsed.annotations)?;

        let annotations_ident = format_ident!("__FIELDCHECK_ANNOTATIONS_{}", position);
        let count = parsed.annotations.len();
        let annotations = parsed.annotations.iter().map(FieldAnnotation::tokens);
        statics.push(quote! {
            static #annotations_ident: [::fieldcheck::Annotation; #count] = [#(#annotations),*];
        });

        let category_tokens = category.tokens();
        let optional = shape.is_optional();
        descriptors.push(quote! {
            ::fieldcheck::FieldDescriptor {
                name: ::std::borrow::Cow::Borrowed(#name),
                category: #category_tokens,
                optional: #optional,
                annotations: ::std::borrow::Cow::Borrowed(&#annotations_ident),
            }
        });

        let read = shape.read(category, quote!((&self.#member)), 0);
        arms.push(quote! {
            #name => ::core::result::Result::Ok(#read),
        });
    }

    let ident = &input.ident;
    let subject_name = ident.to_string();
    let field_count = descriptors.len();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::fieldcheck::Inspect for #ident #ty_generics #where_clause {
            fn subject_name(&self) -> &str {
                #subject_name
            }

            fn fields(&self) -> &[::fieldcheck::FieldDescriptor] {
                #(#statics)*
                static __FIELDCHECK_FIELDS: [::fieldcheck::FieldDescriptor; #field_count] = [
                    #(#descriptors),*
                ];
                &__FIELDCHECK_FIELDS
            }

            fn read(
                &self,
                field: &::fieldcheck::FieldDescriptor,
            ) -> ::fieldcheck::Result<::fieldcheck::FieldValue<'_>> {
                match &*field.name {
                    #(#arms)*
                    other => ::core::result::Result::Err(
                        ::fieldcheck::VerifyError::no_such_field(#subject_name, other),
                    ),
                }
            }
        }
    })
}

/// Mirror of `fieldcheck::FieldCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Numeric,
    Boolean,
    Character,
    Text,
    Sequence,
    Other,
}

impl Category {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "numeric" => Category::Numeric,
            "boolean" => Category::Boolean,
            "character" => Category::Character,
            "text" => Category::Text,
            "sequence" => Category::Sequence,
            "other" => Category::Other,
            _ => return None,
        })
    }

    fn tokens(self) -> TokenStream2 {
        let variant = match self {
            Category::Numeric => quote!(Numeric),
            Category::Boolean => quote!(Boolean),
            Category::Character => quote!(Character),
            Category::Text => quote!(Text),
            Category::Sequence => quote!(Sequence),
            Category::Other => quote!(Other),
        };
        quote!(::fieldcheck::FieldCategory::#variant)
    }
}

/// Syntactic shape of a field type: the category of the innermost value and
/// the `Option`/reference wrappers around it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Value(Category),
    Optional(Box<Shape>),
    Reference(Box<Shape>),
}

const NUMERIC_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "f32", "f64",
];

const TEXT_TYPES: &[&str] = &["String", "str"];

const SEQUENCE_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "BinaryHeap",
    "HashSet",
    "BTreeSet",
    "HashMap",
    "BTreeMap",
];

/// Smart pointers that are sized through their target when it is `str` or a slice.
const POINTER_TYPES: &[&str] = &["Box", "Rc", "Arc", "Cow"];

impl Shape {
    fn of(ty: &Type) -> Self {
        match ty {
            Type::Group(group) => Shape::of(&group.elem),
            Type::Paren(paren) => Shape::of(&paren.elem),
            Type::Reference(reference) => Shape::Reference(Box::new(Shape::of(&reference.elem))),
            Type::Array(_) | Type::Slice(_) => Shape::Value(Category::Sequence),
            Type::Path(type_path) if type_path.qself.is_none() => {
                let Some(segment) = type_path.path.segments.last() else {
                    return Shape::Value(Category::Other);
                };
                let name = segment.ident.to_string();
                if name == "Option" {
                    return match first_type_argument(&segment.arguments) {
                        Some(inner) => Shape::Optional(Box::new(Shape::of(inner))),
                        None => Shape::Value(Category::Other),
                    };
                }
                Shape::Value(categorize(&name, &segment.arguments))
            }
            _ => Shape::Value(Category::Other),
        }
    }

    fn category(&self) -> Category {
        match self {
            Shape::Value(category) => *category,
            Shape::Optional(inner) | Shape::Reference(inner) => inner.category(),
        }
    }

    fn is_optional(&self) -> bool {
        match self {
            Shape::Value(_) => false,
            Shape::Optional(_) => true,
            Shape::Reference(inner) => inner.is_optional(),
        }
    }

    /// Expression producing a `FieldValue` from `expr`, a reference to a
    /// value of this shape.
    fn read(&self, category: Category, expr: TokenStream2, depth: usize) -> TokenStream2 {
        match self {
            Shape::Optional(inner) => {
                let binding = format_ident!("__fieldcheck_value_{}", depth);
                let read = inner.read(category, quote!(#binding), depth + 1);
                quote! {
                    match #expr {
                        ::core::option::Option::Some(#binding) => #read,
                        ::core::option::Option::None => ::fieldcheck::FieldValue::Null,
                    }
                }
            }
            Shape::Reference(inner) => inner.read(category, quote!((&**#expr)), depth),
            Shape::Value(_) => read_value(category, expr),
        }
    }
}

fn read_value(category: Category, expr: TokenStream2) -> TokenStream2 {
    match category {
        Category::Numeric => quote! {
            ::fieldcheck::FieldValue::Number(::fieldcheck::IntoNumber::into_number(#expr))
        },
        Category::Boolean => quote!(::fieldcheck::FieldValue::Bool(*#expr)),
        Category::Character => quote!(::fieldcheck::FieldValue::Char(*#expr)),
        Category::Text => quote! {
            ::fieldcheck::FieldValue::Text(::core::convert::AsRef::<str>::as_ref(#expr))
        },
        Category::Sequence => quote!(::fieldcheck::FieldValue::Sequence(#expr.len())),
        Category::Other => quote!(::fieldcheck::FieldValue::Other),
    }
}

fn categorize(name: &str, arguments: &PathArguments) -> Category {
    if NUMERIC_TYPES.contains(&name) {
        return Category::Numeric;
    }
    if TEXT_TYPES.contains(&name) {
        return Category::Text;
    }
    if SEQUENCE_TYPES.contains(&name) {
        return Category::Sequence;
    }
    match name {
        "bool" => Category::Boolean,
        "char" => Category::Character,
        _ if POINTER_TYPES.contains(&name) => match first_type_argument(arguments) {
            Some(Type::Path(inner)) if inner.path.is_ident("str") => Category::Text,
            Some(Type::Slice(_)) => Category::Sequence,
            _ => Category::Other,
        },
        _ => Category::Other,
    }
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// One annotation on a field, in declaration order.
#[derive(Debug, Clone, PartialEq)]
enum FieldAnnotation {
    Interval { min: f64, max: f64 },
    Max(f64),
    Min(f64),
    MaxSize(i64),
    MinSize(i64),
    NotNull,
    Other(String),
}

impl FieldAnnotation {
    fn keyword(&self) -> &'static str {
        match self {
            FieldAnnotation::Interval { .. } => "interval",
            FieldAnnotation::Max(_) => "max",
            FieldAnnotation::Min(_) => "min",
            FieldAnnotation::MaxSize(_) => "max_size",
            FieldAnnotation::MinSize(_) => "min_size",
            FieldAnnotation::NotNull => "not_null",
            FieldAnnotation::Other(_) => "",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldAnnotation::Interval { .. } | FieldAnnotation::Max(_) | FieldAnnotation::Min(_)
        )
    }

    fn tokens(&self) -> TokenStream2 {
        let constraint = match self {
            FieldAnnotation::Interval { min, max } => {
                let (min, max) = (float_tokens(*min), float_tokens(*max));
                quote!(Interval { min: #min, max: #max })
            }
            FieldAnnotation::Max(value) => {
                let value = float_tokens(*value);
                quote!(Max { value: #value })
            }
            FieldAnnotation::Min(value) => {
                let value = float_tokens(*value);
                quote!(Min { value: #value })
            }
            FieldAnnotation::MaxSize(value) => {
                let value = int_tokens(*value);
                quote!(MaxSize { value: #value })
            }
            FieldAnnotation::MinSize(value) => {
                let value = int_tokens(*value);
                quote!(MinSize { value: #value })
            }
            FieldAnnotation::NotNull => quote!(NotNull),
            FieldAnnotation::Other(name) => {
                return quote! {
                    ::fieldcheck::Annotation::Other(::std::borrow::Cow::Borrowed(#name))
                };
            }
        };
        quote!(::fieldcheck::Annotation::Constraint(::fieldcheck::Constraint::#constraint))
    }
}

fn float_tokens(value: f64) -> TokenStream2 {
    let literal = Literal::f64_unsuffixed(value.abs());
    if value.is_sign_negative() {
        quote!(-#literal)
    } else {
        quote!(#literal)
    }
}

fn int_tokens(value: i64) -> TokenStream2 {
    let literal = Literal::u64_unsuffixed(value.unsigned_abs());
    if value < 0 {
        quote!(-#literal)
    } else {
        quote!(#literal)
    }
}

#[derive(Debug, Default)]
struct ParsedField {
    annotations: Vec<FieldAnnotation>,
    category: Option<Category>,
}

fn parse_field(attrs: &[Attribute]) -> Result<ParsedField, syn::Error> {
    let mut parsed = ParsedField::default();
    for attr in attrs {
        if attr.path().is_ident("doc") {
            continue;
        }
        if !attr.path().is_ident("verify") {
            parsed.annotations.push(FieldAnnotation::Other(path_name(attr)));
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("category") {
                let value: syn::LitStr = meta.value()?.parse()?;
                let Some(category) = Category::from_name(&value.value()) else {
                    return Err(syn::Error::new_spanned(
                        value,
                        "unknown category, expected one of: numeric, boolean, character, text, sequence, other",
                    ));
                };
                if parsed.category.is_some() {
                    return Err(meta.error("duplicate verify(category = ...)"));
                }
                parsed.category = Some(category);
                return Ok(());
            }

            let annotation = parse_constraint(&meta)?;
            if parsed
                .annotations
                .iter()
                .any(|existing| existing.keyword() == annotation.keyword())
            {
                return Err(meta.error(format!(
                    "duplicate verify({}) on the same field",
                    annotation.keyword()
                )));
            }
            parsed.annotations.push(annotation);
            Ok(())
        })?;
    }
    Ok(parsed)
}

fn parse_constraint(meta: &ParseNestedMeta<'_>) -> Result<FieldAnnotation, syn::Error> {
    if meta.path.is_ident("not_null") {
        return Ok(FieldAnnotation::NotNull);
    }
    if meta.path.is_ident("max") {
        return Ok(FieldAnnotation::Max(parse_float(meta)?));
    }
    if meta.path.is_ident("min") {
        return Ok(FieldAnnotation::Min(parse_float(meta)?));
    }
    if meta.path.is_ident("max_size") {
        return Ok(FieldAnnotation::MaxSize(parse_int(meta)?));
    }
    if meta.path.is_ident("min_size") {
        return Ok(FieldAnnotation::MinSize(parse_int(meta)?));
    }
    if meta.path.is_ident("interval") {
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("min") {
                min = Some(parse_float(&nested)?);
                return Ok(());
            }
            if nested.path.is_ident("max") {
                max = Some(parse_float(&nested)?);
                return Ok(());
            }
            Err(nested.error("unsupported interval attribute, expected `min` or `max`"))
        })?;
        let Some(min) = min else {
            return Err(meta.error("interval requires min"));
        };
        let Some(max) = max else {
            return Err(meta.error("interval requires max"));
        };
        if min > max {
            return Err(meta.error("interval min must not exceed max"));
        }
        return Ok(FieldAnnotation::Interval { min, max });
    }
    Err(meta.error("unsupported verify attribute on field"))
}

/// `= 10`, `= 10.5`, `= -3`
fn parse_float(meta: &ParseNestedMeta<'_>) -> Result<f64, syn::Error> {
    let input = meta.value()?;
    let negative = input.parse::<Option<syn::Token![-]>>()?.is_some();
    let lit: Lit = input.parse()?;
    let value = match &lit {
        Lit::Int(int) => int.base10_parse::<f64>()?,
        Lit::Float(float) => float.base10_parse::<f64>()?,
        _ => return Err(syn::Error::new_spanned(lit, "expected a number")),
    };
    if !value.is_finite() {
        return Err(syn::Error::new_spanned(lit, "bound must be finite"));
    }
    Ok(if negative { -value } else { value })
}

/// `= 3`, `= -1`
fn parse_int(meta: &ParseNestedMeta<'_>) -> Result<i64, syn::Error> {
    let input = meta.value()?;
    let negative = input.parse::<Option<syn::Token![-]>>()?.is_some();
    let lit: syn::LitInt = input.parse()?;
    let magnitude = lit.base10_parse::<u64>()?;
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    value.ok_or_else(|| syn::Error::new_spanned(lit, "size bound out of range"))
}

fn check_compatible(
    field: &syn::Field,
    category: Category,
    annotations: &[FieldAnnotation],
) -> Result<(), syn::Error> {
    let non_numeric = matches!(
        category,
        Category::Boolean | Category::Character | Category::Text | Category::Sequence
    );
    match annotations.iter().find(|a| a.is_numeric()) {
        Some(annotation) if non_numeric => Err(syn::Error::new_spanned(
            &field.ty,
            format!(
                "verify({}) requires a numeric field",
                annotation.keyword()
            ),
        )),
        _ => Ok(()),
    }
}

fn path_name(attr: &Attribute) -> String {
    attr.path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}
