//! Recover entity fields from a generated model source file.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use strata_ir::{ANY_TYPE, Field, Storage, is_temporal};
use syn::{
    Attribute, Expr, ExprLit, Fields, GenericArgument, Item, Lit, LitStr, Meta, PathArguments,
    Type, Visibility, ext::IdentExt,
};
use thiserror::Error;

use crate::type_mapper::default_native_type;

/// Members provided by the generated base model.
const SYSTEM_FIELDS: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

#[derive(Debug, Error, Diagnostic)]
pub enum ReflectError {
    #[error("failed to read model '{path}'")]
    #[diagnostic(code(strata::reflect::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model '{path}'")]
    #[diagnostic(code(strata::reflect::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("struct '{name}' not found in '{path}'")]
    #[diagnostic(
        code(strata::reflect::missing),
        help("generate the model first, or pass --fields")
    )]
    MissingDeclaration { path: PathBuf, name: String },

    #[error("'{name}' in '{path}' is not a struct with named fields")]
    #[diagnostic(code(strata::reflect::not_a_struct))]
    NotAStruct { path: PathBuf, name: String },

    #[error("struct '{name}' in '{path}' has no reflectable fields")]
    #[diagnostic(
        code(strata::reflect::no_fields),
        help("only public, non-temporal fields other than id and timestamps are reflected")
    )]
    NoFields { path: PathBuf, name: String },
}

/// Reflect the fields of `type_name` from a model file.
pub fn reflect_model(path: &Path, type_name: &str) -> Result<Vec<Field>, ReflectError> {
    let source = std::fs::read_to_string(path).map_err(|source| ReflectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    reflect_source(&source, path, type_name)
}

/// Reflect the fields of `type_name` from Rust source text.
///
/// `path` is only used in error messages.
pub fn reflect_source(
    source: &str,
    path: &Path,
    type_name: &str,
) -> Result<Vec<Field>, ReflectError> {
    let file = syn::parse_file(source).map_err(|source| ReflectError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let item = find_item(&file.items, type_name).ok_or_else(|| {
        ReflectError::MissingDeclaration {
            path: path.to_path_buf(),
            name: type_name.to_string(),
        }
    })?;

    let named = match item {
        Item::Struct(item) => match &item.fields {
            Fields::Named(named) => named,
            _ => return Err(not_a_struct(path, type_name)),
        },
        _ => return Err(not_a_struct(path, type_name)),
    };

    let fields: Vec<Field> = named.named.iter().filter_map(reflect_field).collect();

    if fields.is_empty() {
        return Err(ReflectError::NoFields {
            path: path.to_path_buf(),
            name: type_name.to_string(),
        });
    }
    Ok(fields)
}

fn not_a_struct(path: &Path, name: &str) -> ReflectError {
    ReflectError::NotAStruct {
        path: path.to_path_buf(),
        name: name.to_string(),
    }
}

/// First item declaring `name`, searching inline modules too.
fn find_item<'a>(items: &'a [Item], name: &str) -> Option<&'a Item> {
    items.iter().find_map(|item| {
        let ident = match item {
            Item::Struct(s) => Some(&s.ident),
            Item::Enum(e) => Some(&e.ident),
            Item::Union(u) => Some(&u.ident),
            Item::Type(t) => Some(&t.ident),
            Item::Mod(m) => {
                return m
                    .content
                    .as_ref()
                    .and_then(|(_, items)| find_item(items, name));
            }
            _ => None,
        };
        ident.filter(|ident| *ident == name).map(|_| item)
    })
}

fn reflect_field(field: &syn::Field) -> Option<Field> {
    if !matches!(field.vis, Visibility::Public(_)) {
        return None;
    }
    let member = field.ident.as_ref()?.unraw().to_string();
    if SYSTEM_FIELDS.contains(&member.as_str()) {
        return None;
    }

    let ty = render_type(&field.ty);
    if is_temporal(&ty) {
        return None;
    }

    let mut reflected = Field::new(&member, ty);
    if let Some(rename) = serde_rename(&field.attrs) {
        reflected.serialized_name = rename;
    }

    let (storage, required) = match doc_storage(&field.attrs) {
        Some(storage) => {
            let required = Storage::parse(&storage).not_null;
            (storage, required)
        }
        None => (
            format!(
                "column:{};type:{}",
                reflected.serialized_name,
                default_native_type(&reflected.ty)
            ),
            false,
        ),
    };

    let comment = doc_comment(&field.attrs).unwrap_or_default();
    Some(reflected.storage(storage).required(required).comment(comment))
}

/// Render a type in the field type vocabulary.
fn render_type(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segments: Vec<String> = type_path
                .path
                .segments
                .iter()
                .map(|segment| {
                    let ident = segment.ident.to_string();
                    match &segment.arguments {
                        PathArguments::AngleBracketed(args) => {
                            let args: Vec<String> = args
                                .args
                                .iter()
                                .filter_map(|arg| match arg {
                                    GenericArgument::Type(ty) => Some(render_type(ty)),
                                    _ => None,
                                })
                                .collect();
                            if args.is_empty() {
                                ident
                            } else {
                                format!("{}<{}>", ident, args.join(", "))
                            }
                        }
                        _ => ident,
                    }
                })
                .collect();
            segments.join("::")
        }
        Type::Reference(reference) => owned(render_type(&reference.elem)),
        Type::Ptr(pointer) => owned(render_type(&pointer.elem)),
        Type::Slice(slice) => format!("Vec<{}>", render_type(&slice.elem)),
        Type::Array(array) => format!("Vec<{}>", render_type(&array.elem)),
        Type::Paren(paren) => render_type(&paren.elem),
        Type::Group(group) => render_type(&group.elem),
        _ => ANY_TYPE.to_string(),
    }
}

/// Owned form of a borrowed pointee (`str` -> `String`).
fn owned(pointee: String) -> String {
    match pointee.as_str() {
        "str" => "String".to_string(),
        _ => pointee,
    }
}

/// `#[serde(rename = "...")]`; other serde options are ignored.
fn serde_rename(attrs: &[Attribute]) -> Option<String> {
    let mut rename = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if meta.input.peek(syn::Token![=]) {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                } else {
                    meta.parse_nested_meta(|inner| {
                        let value: LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("serialize") {
                            rename = Some(value.value());
                        }
                        Ok(())
                    })?;
                }
            } else if meta.input.peek(syn::Token![=]) {
                let _: Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|inner| {
                    if inner.input.peek(syn::Token![=]) {
                        let _: Expr = inner.value()?.parse()?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        });
    }
    rename
}

/// Prefix of the doc line carrying a generated storage annotation.
const STORAGE_DOC: &str = "storage:";

/// Trimmed `///` lines of a member.
fn doc_lines(attrs: &[Attribute]) -> impl Iterator<Item = String> + '_ {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
}

/// Storage annotation from a `/// storage: ...` doc line.
fn doc_storage(attrs: &[Attribute]) -> Option<String> {
    doc_lines(attrs).find_map(|line| {
        line.strip_prefix(STORAGE_DOC)
            .map(|storage| storage.trim().to_string())
            .filter(|storage| !storage.is_empty())
    })
}

/// Doc comment lines joined with spaces, without the storage line.
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = doc_lines(attrs)
        .filter(|line| !line.is_empty() && !line.starts_with(STORAGE_DOC))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
