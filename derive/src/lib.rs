//! Derive macros for `cyclesim`.
//!
//! - `#[derive(Synchronize)]` - visit every clocked leaf of a composite state
//!   shape in declaration order.
//! - `#[derive(ModuleState)]` - produce a module's commit step from its
//!   `#[input]`, `#[output]` and `#[private]` state groups.

use proc_macro::TokenStream;

mod module;
mod synchronize;

/// Derives `cyclesim::Synchronize` for a struct.
///
/// Every field is synchronized in declaration order. Plain-data fields that
/// hold no wires or registers are excluded with `#[sync(skip)]`.
///
/// ```text
/// #[derive(Default, Synchronize)]
/// struct Bank {
///     regs: [Register<32>; 4],
///     #[sync(skip)]
///     label: &'static str,
/// }
/// ```
#[proc_macro_derive(Synchronize, attributes(sync))]
pub fn synchronize(input: TokenStream) -> TokenStream {
    synchronize::synchronize(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derives `cyclesim::ModuleState` for a module struct.
///
/// The generated commit synchronizes every `#[input]` field, then every
/// `#[output]` field, then every `#[private]` field. Untagged fields are not
/// traversed.
///
/// ```text
/// #[derive(ModuleState)]
/// struct RegFile {
///     #[input]
///     input: RegFileInput,
///     #[output]
///     output: RegFileOutput,
///     #[private]
///     state: RegFilePrivate,
/// }
/// ```
#[proc_macro_derive(ModuleState, attributes(input, output, private))]
pub fn module_state(input: TokenStream) -> TokenStream {
    module::module_state(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
