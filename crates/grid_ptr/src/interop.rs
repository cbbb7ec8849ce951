//! The sanctioned escape hatch back to native pointers.

use core::fmt;
use core::hash::Hash;

use crate::mutability::Mutability;
use crate::{DevicePtr, OpaquePtr};

mod seal {
    use crate::mutability::Mutability;
    use crate::{DevicePtr, OpaquePtr};

    pub trait Sealed {}

    impl<T, M: Mutability> Sealed for DevicePtr<T, M> {}
    impl<M: Mutability> Sealed for OpaquePtr<M> {}
}

/// The contract shared by every device pointer: a copyable, totally
/// ordered, hashable address that can surrender its native representation.
///
/// Implemented exactly by [`DevicePtr`] and [`OpaquePtr`]; the trait is
/// sealed. It exists so code handing addresses to transfer or launch APIs
/// can stay generic over the pointer shape; see [`get`].
pub trait AsRawPtr: seal::Sealed + Copy + Eq + Ord + Hash + fmt::Debug + fmt::Pointer {
    /// The native pointer shape, `*mut` or `*const` according to the
    /// qualifier.
    type Raw: Copy;

    /// Returns the wrapped native pointer.
    fn as_raw(self) -> Self::Raw;
}

impl<T, M: Mutability> AsRawPtr for DevicePtr<T, M> {
    type Raw = M::Raw<T>;

    #[inline(always)]
    fn as_raw(self) -> M::Raw<T> {
        M::raw(self.0)
    }
}

impl<M: Mutability> AsRawPtr for OpaquePtr<M> {
    type Raw = M::Raw<u8>;

    #[inline(always)]
    fn as_raw(self) -> M::Raw<u8> {
        M::raw(self.0)
    }
}

/// Returns the native pointer wrapped by `ptr`.
///
/// This free function is the interop point for APIs that expect a raw
/// pointer, typically memory transfers and kernel argument lists. It works
/// for typed and erased pointers of either qualifier and returns the
/// matching `*mut`/`*const` shape.
///
/// # Examples
///
/// ```
/// use grid_ptr::{DevicePtr, get};
///
/// fn enqueue_upload(dst: *mut f32, len: usize) {
///     // hand off to the transfer engine
///     let _ = (dst, len);
/// }
///
/// let mut staging = [0f32; 64];
/// let dst = DevicePtr::<f32>::from_raw(staging.as_mut_ptr());
///
/// enqueue_upload(get(dst), staging.len());
/// assert_eq!(get(dst), staging.as_mut_ptr());
/// ```
#[inline(always)]
pub fn get<P: AsRawPtr>(ptr: P) -> P::Raw {
    ptr.as_raw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Const, Mut};

    #[test]
    fn escape_hatch_matches_as_ptr() {
        let mut x = 1u32;
        let raw = &raw mut x;

        let p = DevicePtr::<u32>::from_raw(raw);
        assert_eq!(get(p), raw);
        assert_eq!(get(p), p.as_ptr());

        let c = DevicePtr::<u32, Const>::from_raw(raw.cast_const());
        assert_eq!(get(c), raw.cast_const());

        let o: OpaquePtr<Mut> = p.erase();
        assert_eq!(get(o), raw.cast::<u8>());

        let oc: OpaquePtr<Const> = c.erase();
        assert_eq!(get(oc), raw.cast::<u8>().cast_const());
    }

    #[test]
    fn generic_callers_see_the_native_shape() {
        fn lowest<P: AsRawPtr>(a: P, b: P) -> P {
            if a < b { a } else { b }
        }

        let mut data = [0u32; 2];
        let base = DevicePtr::<u32>::from_raw(data.as_mut_ptr());
        assert_eq!(lowest(base + 1, base), base);
    }
}
