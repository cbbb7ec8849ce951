//! Named compile-time predicates.
//!
//! `cfg` expressions tend to get repeated all over a crate, and every copy is
//! a chance for one predicate to drift from the others. [`define_alias!`]
//! binds a predicate to a single name once; the name is then usable as a
//! gating macro anywhere the defining crate is visible, and [`switch!`]
//! selects between several such names like a `cfg`-level `match`.
//!
//! An alias evaluates the predicate in the crate that *defines* it, not the
//! crate that uses it. Re-exporting an alias therefore lets downstream code
//! ask "was that crate built with this capability?" without knowing which
//! features or targets are behind it.
//!
//! # Examples
//!
//! Gate items through an alias:
//!
//! ```
//! mod cfg {
//!     grid_cfg::define_alias! {
//!         #[cfg(target_pointer_width = "64")] => wide,
//!     }
//! }
//!
//! cfg::wide! {
//!     fn only_on_wide_targets() {}
//! }
//! ```
//!
//! Select between aliases with [`switch!`]:
//!
//! ```
//! # mod cfg {
//! #     grid_cfg::define_alias! {
//! #         #[cfg(target_pointer_width = "64")] => wide,
//! #     }
//! # }
//! let bits = grid_cfg::switch! {
//!     cfg::wide => { 64 }
//!     _ => { 32 }
//! };
//! assert_eq!(bits, usize::BITS);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

/// Binds each `cfg` predicate to an alias macro.
///
/// For every `#[cfg(PRED)] => name,` entry this expands to a `pub use`
/// declaring the macro `name`. Invoking `name! { ... }` emits the wrapped
/// tokens when `PRED` held while the defining crate was compiled and
/// nothing otherwise. The alias also answers the `if`/`else` token protocol
/// used by [`switch!`].
///
/// ```
/// grid_cfg::define_alias! {
///     #[cfg(all())] => always,
///     #[cfg(any())] => never,
/// }
///
/// always! { const ANSWER: u32 = 42; }
/// never! { compile_error!("dropped without being expanded"); }
/// assert_eq!(ANSWER, 42);
/// ```
#[macro_export]
macro_rules! define_alias {
    () => {};
    (
        #[cfg($pred:meta)] => $alias:ident
        $(, $($rest:tt)*)?
    ) => {
        #[cfg($pred)]
        #[doc = concat!("Emits the wrapped tokens: `cfg(", stringify!($pred), ")` held for this build.")]
        pub use $crate::__emit as $alias;

        #[cfg(not($pred))]
        #[doc = concat!("Discards the wrapped tokens: `cfg(", stringify!($pred), ")` did not hold for this build.")]
        pub use $crate::__discard as $alias;

        $crate::define_alias! { $($($rest)*)? }
    };
}

/// Selects the first arm whose alias predicate held, or the `_` arm.
///
/// Arms are `path::to::alias => { tokens }`, tried in order; `_ => { ... }`
/// always matches. With no matching arm the expansion is empty, which is
/// only valid in item or statement position.
///
/// ```
/// grid_cfg::define_alias! {
///     #[cfg(any())] => never,
/// }
///
/// let picked = grid_cfg::switch! {
///     never => { "unreachable" }
///     _ => { "fallback" }
/// };
/// assert_eq!(picked, "fallback");
/// ```
#[macro_export]
macro_rules! switch {
    () => {};
    ( _ => { $($content:tt)* } $($rest:tt)* ) => {
        $($content)*
    };
    ( $($alias:ident)::+ => { $($content:tt)* } $($rest:tt)* ) => {
        $($alias)::+! {
            if { $($content)* }
            else { $crate::switch! { $($rest)* } }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ( if { $($yes:tt)* } else { $($no:tt)* } ) => { $($yes)* };
    ( $($tokens:tt)* ) => { $($tokens)* };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __discard {
    ( if { $($yes:tt)* } else { $($no:tt)* } ) => { $($no)* };
    ( $($tokens:tt)* ) => {};
}
