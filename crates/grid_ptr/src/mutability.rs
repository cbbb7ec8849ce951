//! Type-level mutability qualifiers for device pointers.
//!
//! A [`DevicePtr<T, Mut>`](crate::DevicePtr) is the device analogue of
//! `*mut T`, a [`DevicePtr<T, Const>`](crate::DevicePtr) the analogue of
//! `*const T`. Keeping the qualifier in the type means it survives type
//! erasure: an [`OpaquePtr<Const>`](crate::OpaquePtr) can only ever be
//! recovered as a read-only pointer.

mod seal {
    pub trait Sealed {}
}

use seal::Sealed;

/// Type-level qualifier saying whether a pointer permits writes.
///
/// Implemented exactly by [`Mut`] and [`Const`]; the trait is sealed. Code
/// generic over pointers uses it to name the matching native pointer shape:
/// `M::Raw<T>` is `*mut T` or `*const T`.
pub trait Mutability: Sealed + Copy + 'static {
    /// Whether writes through the pointer are permitted.
    const MUTABLE: bool;

    /// The native raw pointer carrying this qualifier.
    type Raw<T>: Copy;

    #[doc(hidden)]
    fn raw<T>(ptr: *mut T) -> Self::Raw<T>;

    #[doc(hidden)]
    fn unraw<T>(raw: Self::Raw<T>) -> *mut T;
}

/// Qualifier of read-write pointers, the `*mut T` side.
#[derive(Clone, Copy, Debug)]
pub struct Mut;

/// Qualifier of read-only pointers, the `*const T` side.
#[derive(Clone, Copy, Debug)]
pub struct Const;

impl Sealed for Mut {}
impl Sealed for Const {}

impl Mutability for Mut {
    const MUTABLE: bool = true;

    type Raw<T> = *mut T;

    #[inline(always)]
    fn raw<T>(ptr: *mut T) -> *mut T {
        ptr
    }

    #[inline(always)]
    fn unraw<T>(raw: *mut T) -> *mut T {
        raw
    }
}

impl Mutability for Const {
    const MUTABLE: bool = false;

    type Raw<T> = *const T;

    #[inline(always)]
    fn raw<T>(ptr: *mut T) -> *const T {
        ptr
    }

    #[inline(always)]
    fn unraw<T>(raw: *const T) -> *mut T {
        raw.cast_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifier_flags() {
        assert_eq!(<Mut as Mutability>::MUTABLE, true);
        assert_eq!(<Const as Mutability>::MUTABLE, false);
    }

    #[test]
    fn raw_shapes_carry_the_qualifier() {
        let mut x = 3u8;
        let raw: <Mut as Mutability>::Raw<u8> = Mut::raw(&raw mut x);
        let frozen: <Const as Mutability>::Raw<u8> = Const::raw(&raw mut x);
        assert_eq!(raw.cast_const(), frozen);
    }
}
