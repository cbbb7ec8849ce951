//! Pointers into device memory, checked at compile time.
//!
//! Code for accelerator targets deals with two memory spaces: the ordinary
//! host space, and the device space that only device-side code may reach
//! into. A raw pointer does not remember which space it belongs to, so
//! dereferencing a device address on the host compiles fine and faults at
//! run time. The types here keep that distinction in the type system:
//!
//! - [`DevicePtr<T, M>`](DevicePtr): a typed device address. Everything an
//!   address supports works on the host (copying, comparing, arithmetic,
//!   hashing, swapping, erasing), while dereference and indexing only exist
//!   in builds for the device context.
//! - [`OpaquePtr<M>`](OpaquePtr): the type-erased form. Address operations
//!   only, plus explicit recovery to a typed pointer.
//! - [`Mut`]/[`Const`]: type-level qualifiers standing in for `*mut` and
//!   `*const`, one-way convertible from read-write to read-only.
//! - [`PtrRange`]: the half-open range `[start, end)` driving iteration.
//! - [`get`]: the escape hatch handing the native pointer to transfer and
//!   launch APIs.
//!
//! # Example
//!
//! ```
//! use grid_ptr::{Const, DevicePtr, OpaquePtr, get};
//!
//! let mut block = [0f32; 256];
//! let base = DevicePtr::<f32>::from_raw(block.as_mut_ptr());
//!
//! // Address algebra works everywhere.
//! let mid = base + 128;
//! assert_eq!(mid - base, 128);
//! assert!(base < mid);
//!
//! // Widening to read-only is the one implicit-style conversion.
//! let frozen: DevicePtr<f32, Const> = base.into();
//! assert_eq!(frozen.addr(), base.addr());
//!
//! // Reinterpretation must round-trip through the erased form.
//! let erased: OpaquePtr = base.erase();
//! let bytes = erased.cast::<u8>();
//! assert_eq!(bytes.addr(), base.addr());
//!
//! // Native escape for transfer/launch interfaces.
//! assert_eq!(get(base), block.as_mut_ptr());
//! ```
//!
//! # The device context
//!
//! The access operations are compiled when `target_os = "cuda"` holds or
//! when the `device` cargo feature is on. The feature is meant for
//! host-side tests and for unified-memory setups where host addresses are
//! device-visible; real device builds need no feature. Access stays
//! `unsafe` either way: the gate rules out wrong-space calls, not dangling
//! or misaligned addresses.
//!
//! Downstream crates that compile for both contexts can branch on the same
//! predicate with [`grid_cfg::switch!`]:
//!
//! ```
//! grid_cfg::switch! {
//!     grid_ptr::cfg::device => {
//!         fn fill(p: grid_ptr::DevicePtr<u32>, len: usize) {
//!             for i in 0..len as isize {
//!                 // SAFETY: callers pass an allocation of at least `len`.
//!                 unsafe { *p.index_mut(i) = 0 };
//!             }
//!         }
//!     }
//!     _ => {
//!         fn fill(p: grid_ptr::DevicePtr<u32>, len: usize) {
//!             // Host side: hand the address to a memset transfer instead.
//!             let _ = (grid_ptr::get(p), len);
//!         }
//!     }
//! }
//!
//! fill(grid_ptr::DevicePtr::<u32>::null(), 0);
//! ```
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Compile-time predicates describing the execution context.
pub mod cfg {
    grid_cfg::define_alias! {
        #[cfg(any(target_os = "cuda", feature = "device"))] => device,
    }
}

// -----------------------------------------------------------------------------
// Test support

#[cfg(test)]
extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod access;
mod device_ptr;
mod interop;
mod mutability;
mod range;

// -----------------------------------------------------------------------------
// Top-level exports

pub use device_ptr::{DevicePtr, OpaquePtr};
pub use interop::{AsRawPtr, get};
pub use mutability::{Const, Mut, Mutability};
pub use range::PtrRange;
