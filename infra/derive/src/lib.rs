#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the `cfgsync` workspace: the error-enum attribute used by every
//! crate and the runtime entry-point attribute used by the binary.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap a Tokio runtime for `async fn main`.
///
/// # Arguments
///
/// * `sequential` - A current-thread runtime; every future is polled on the calling thread.
/// * `default` - Same as `sequential`.
///
/// # Examples
///
/// ```rust,ignore
/// #[cfgsync_runtime::main(sequential)]
/// async fn main() -> anyhow::Result<()> {
/// # Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// A high-level attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field.
///   When several variants wrap the same source type only the first one receives the
///   conversion; the others have to be constructed explicitly.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` if an `Internal`
///   variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants with a source must also have a context field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[cfgsync_derive::cfgsync_error]
/// pub enum FileError {
///     #[error("Read failed{}: {source}", format_context(.context))]
///     Read { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Write failed{}: {source}", format_context(.context))]
///     Write { source: std::io::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &std::path::Path) -> Result<Vec<u8>, FileError> {
///     std::fs::read(path).context("Loading snapshot") // becomes FileError::Read
/// }
/// ```
#[proc_macro_attribute]
pub fn cfgsync_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
