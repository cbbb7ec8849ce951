//! Typed and type-erased pointers into device memory.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;

use crate::mutability::{Const, Mut, Mutability};

// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_ptr {
    ($ptr:ident < $($param:ident $(: $bound:path)?),+ >) => {
        impl<$($param $(: $bound)?),+> Clone for $ptr<$($param),+> {
            #[inline(always)]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($param $(: $bound)?),+> Copy for $ptr<$($param),+> {}

        impl<$($param $(: $bound)?),+> PartialEq for $ptr<$($param),+> {
            #[inline(always)]
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl<$($param $(: $bound)?),+> Eq for $ptr<$($param),+> {}

        impl<$($param $(: $bound)?),+> PartialOrd for $ptr<$($param),+> {
            #[inline(always)]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }

            #[inline(always)]
            fn lt(&self, other: &Self) -> bool {
                self.0 < other.0
            }

            #[inline(always)]
            fn le(&self, other: &Self) -> bool {
                self.0 <= other.0
            }

            #[inline(always)]
            fn gt(&self, other: &Self) -> bool {
                self.0 > other.0
            }

            #[inline(always)]
            fn ge(&self, other: &Self) -> bool {
                self.0 >= other.0
            }
        }

        impl<$($param $(: $bound)?),+> Ord for $ptr<$($param),+> {
            #[inline(always)]
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl<$($param $(: $bound)?),+> Hash for $ptr<$($param),+> {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl<$($param $(: $bound)?),+> Default for $ptr<$($param),+> {
            /// The null pointer.
            #[inline]
            fn default() -> Self {
                Self::null()
            }
        }

        impl<$($param $(: $bound)?),+> fmt::Pointer for $ptr<$($param),+> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Pointer::fmt(&self.0, f)
            }
        }

        impl<$($param $(: $bound)?),+> fmt::Debug for $ptr<$($param),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($ptr), self.0)
            }
        }

        // SAFETY: Only an address value crosses threads. Every operation that
        // reaches the pointee is `unsafe` and compiled solely for the device
        // context, so the wrapper itself is no more than the number it holds.
        unsafe impl<$($param $(: $bound)?),+> Send for $ptr<$($param),+> {}

        // SAFETY: See the `Send` impl. `&Self` gives out copies of the
        // address at most.
        unsafe impl<$($param $(: $bound)?),+> Sync for $ptr<$($param),+> {}
    };
}

// -----------------------------------------------------------------------------
// DevicePtr

/// A typed pointer into device memory.
///
/// # Two memory spaces
///
/// The wrapped address lives in the device space, which host code cannot
/// safely reach through. On the host a `DevicePtr` is therefore a plain
/// value: it can be copied, compared, offset, hashed, erased and recovered,
/// but not dereferenced. The access operations (`as_ref`, `as_mut`,
/// `index`, `index_mut`) only exist in code compiled for the device
/// context, so using them from host code fails to compile.
///
/// # Qualifier
///
/// `M` carries the mutability of the pointee at the type level:
/// `DevicePtr<T, Mut>` corresponds to `*mut T`, `DevicePtr<T, Const>` to
/// `*const T`. A read-write pointer widens to the read-only form with
/// [`cast_const`](Self::cast_const) or `From`; the reverse direction does
/// not exist.
///
/// # No reinterpretation
///
/// There is deliberately no way to turn a `DevicePtr<T>` into a
/// `DevicePtr<U>` directly. Erase the type with [`erase`](Self::erase) and
/// recover it with [`OpaquePtr::cast`], so that every type pun is spelled
/// out at the call site.
///
/// # Examples
///
/// ```
/// use grid_ptr::DevicePtr;
///
/// let mut block = [0u32; 16];
/// let base = DevicePtr::<u32>::from_raw(block.as_mut_ptr());
/// let last = base + 15;
///
/// assert!(base < last);
/// assert_eq!(last - base, 15);
/// ```
#[repr(transparent)]
pub struct DevicePtr<T, M: Mutability = Mut>(pub(crate) *mut T, PhantomData<M>);

impl_ptr!(DevicePtr<T, M: Mutability>);

impl<T, M: Mutability> DevicePtr<T, M> {
    /// Creates the null device pointer.
    ///
    /// This is the only way to make a `DevicePtr` from nothing. There is no
    /// conversion from integer literals, so a null pointer is always spelled
    /// `null()` (or [`Default`]) rather than `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::DevicePtr;
    ///
    /// let p = DevicePtr::<f64>::null();
    /// assert!(p.is_null());
    /// assert_eq!(p.addr(), 0);
    /// ```
    #[inline(always)]
    pub const fn null() -> Self {
        Self(ptr::null_mut(), PhantomData)
    }

    /// Wraps a raw device pointer of exactly the matching shape.
    ///
    /// The accepted pointer type follows the qualifier: `*mut T` for
    /// `DevicePtr<T, Mut>`, `*const T` for `DevicePtr<T, Const>`. The
    /// address is taken as is; no check connects it to any allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::{Const, DevicePtr};
    ///
    /// let mut x = 1u32;
    /// let p = DevicePtr::<u32>::from_raw(&raw mut x);
    /// let c = DevicePtr::<u32, Const>::from_raw(&raw const x);
    ///
    /// assert_eq!(p.addr(), c.addr());
    /// ```
    #[inline(always)]
    pub fn from_raw(ptr: M::Raw<T>) -> Self {
        Self(M::unraw(ptr), PhantomData)
    }

    /// Returns the wrapped native pointer, `*mut T` or `*const T` according
    /// to the qualifier.
    ///
    /// The free function [`get`](crate::get) is the same escape hatch as a
    /// free name, mirroring how transfer and launch APIs are usually called.
    #[inline(always)]
    pub fn as_ptr(self) -> M::Raw<T> {
        M::raw(self.0)
    }

    /// Returns the address as an integer, null mapping to exactly `0`.
    ///
    /// Device addresses carry no host provenance, so the integer is the
    /// whole story.
    #[inline(always)]
    pub fn addr(self) -> usize {
        self.0.addr()
    }

    /// Whether this is the null pointer.
    ///
    /// Deliberately a named method rather than a boolean conversion, so a
    /// pointer can never slip into ordinary boolean logic unnoticed.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::DevicePtr;
    ///
    /// let mut x = 3i64;
    /// assert!(DevicePtr::<i64>::null().is_null());
    /// assert!(!DevicePtr::<i64>::from_raw(&raw mut x).is_null());
    /// ```
    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// Erases the element type, keeping address and qualifier.
    ///
    /// The erase direction is always available (also as `From`); coming
    /// back requires naming a concrete type in [`OpaquePtr::cast`].
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::{DevicePtr, OpaquePtr};
    ///
    /// let mut x = 5u16;
    /// let p = DevicePtr::<u16>::from_raw(&raw mut x);
    /// let erased: OpaquePtr = p.erase();
    ///
    /// assert_eq!(erased.addr(), p.addr());
    /// ```
    #[inline(always)]
    pub const fn erase(self) -> OpaquePtr<M> {
        OpaquePtr(self.0.cast(), PhantomData)
    }

    /// Exchanges the addresses of two pointers.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::DevicePtr;
    ///
    /// let mut data = [0u8; 2];
    /// let first = DevicePtr::<u8>::from_raw(&raw mut data[0]);
    /// let second = DevicePtr::<u8>::from_raw(&raw mut data[1]);
    ///
    /// let (mut a, mut b) = (first, second);
    /// a.swap(&mut b);
    /// assert_eq!(a, second);
    /// assert_eq!(b, first);
    /// ```
    #[inline]
    pub const fn swap(&mut self, other: &mut Self) {
        let tmp = *self;
        *self = *other;
        *other = tmp;
    }

    // Pointer arithmetic is scaled by the element size, which makes it
    // meaningless for zero-sized types. Reject those instantiations when
    // they are monomorphized rather than at run time.
    pub(crate) const fn assert_element_sized() {
        const {
            assert!(
                size_of::<T>() != 0,
                "device pointer arithmetic over a zero-sized element type"
            )
        }
    }

    #[inline(always)]
    const fn offset(self, count: isize) -> Self {
        Self::assert_element_sized();
        Self(self.0.wrapping_offset(count), PhantomData)
    }
}

impl<T> DevicePtr<T, Mut> {
    /// Widens this read-write pointer to the read-only form.
    ///
    /// Also available through `From`/`Into`. The opposite direction does
    /// not exist and must not be added; read-only is a promise made to the
    /// caller handing out the pointer.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::{Const, DevicePtr};
    ///
    /// let mut x = 2u32;
    /// let p = DevicePtr::<u32>::from_raw(&raw mut x);
    /// let c: DevicePtr<u32, Const> = p.cast_const();
    ///
    /// assert_eq!(c.addr(), p.addr());
    /// ```
    #[inline(always)]
    pub const fn cast_const(self) -> DevicePtr<T, Const> {
        DevicePtr(self.0, PhantomData)
    }
}

impl<T> From<DevicePtr<T, Mut>> for DevicePtr<T, Const> {
    /// Qualifier widening, the one implicit-style cross-type conversion.
    #[inline(always)]
    fn from(ptr: DevicePtr<T, Mut>) -> Self {
        ptr.cast_const()
    }
}

impl<T, M: Mutability> From<DevicePtr<T, M>> for OpaquePtr<M> {
    /// The erase direction of the erase/recover round trip.
    #[inline(always)]
    fn from(ptr: DevicePtr<T, M>) -> Self {
        ptr.erase()
    }
}

// -----------------------------------------------------------------------------
// Arithmetic

impl<T, M: Mutability> Add<isize> for DevicePtr<T, M> {
    type Output = Self;

    #[inline(always)]
    fn add(self, count: isize) -> Self {
        self.offset(count)
    }
}

impl<T, M: Mutability> Sub<isize> for DevicePtr<T, M> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, count: isize) -> Self {
        self.offset(count.wrapping_neg())
    }
}

impl<T, M: Mutability> AddAssign<isize> for DevicePtr<T, M> {
    #[inline(always)]
    fn add_assign(&mut self, count: isize) {
        *self = *self + count;
    }
}

impl<T, M: Mutability> SubAssign<isize> for DevicePtr<T, M> {
    #[inline(always)]
    fn sub_assign(&mut self, count: isize) {
        *self = *self - count;
    }
}

impl<T, M: Mutability> Sub for DevicePtr<T, M> {
    type Output = isize;

    /// Distance between two pointers in units of `size_of::<T>()`.
    ///
    /// Matches native pointer difference: `(x + n) - x == n`.
    #[inline]
    fn sub(self, rhs: Self) -> isize {
        Self::assert_element_sized();
        let bytes = self.0.addr().wrapping_sub(rhs.0.addr()) as isize;
        bytes / size_of::<T>() as isize
    }
}

// -----------------------------------------------------------------------------
// OpaquePtr

/// A device pointer whose element type has been erased.
///
/// Only address-level operations remain: comparison, hashing, swapping,
/// the integer and null views, and explicit recovery to a typed pointer
/// with [`cast`](Self::cast). There is no dereference and no indexing in
/// any context; an erased pointer knows nothing about its pointee.
///
/// The qualifier survives erasure: an `OpaquePtr<Const>` recovers only to
/// `DevicePtr<T, Const>`.
///
/// # Examples
///
/// ```
/// use grid_ptr::{DevicePtr, OpaquePtr};
///
/// let mut slots = [0u64; 8];
/// let typed = DevicePtr::<u64>::from_raw(slots.as_mut_ptr());
///
/// let erased: OpaquePtr = typed.into();
/// let recovered = erased.cast::<u64>();
/// assert_eq!(recovered, typed);
/// ```
#[repr(transparent)]
pub struct OpaquePtr<M: Mutability = Mut>(pub(crate) *mut u8, PhantomData<M>);

impl_ptr!(OpaquePtr<M: Mutability>);

impl<M: Mutability> OpaquePtr<M> {
    /// Creates the null erased pointer.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::{Mut, OpaquePtr};
    ///
    /// assert!(OpaquePtr::<Mut>::null().is_null());
    /// ```
    #[inline(always)]
    pub const fn null() -> Self {
        Self(ptr::null_mut(), PhantomData)
    }

    /// Wraps a raw byte pointer of exactly the matching shape, `*mut u8`
    /// for `OpaquePtr<Mut>` and `*const u8` for `OpaquePtr<Const>`.
    #[inline(always)]
    pub fn from_raw(ptr: M::Raw<u8>) -> Self {
        Self(M::unraw(ptr), PhantomData)
    }

    /// Returns the wrapped native pointer as a byte pointer.
    #[inline(always)]
    pub fn as_ptr(self) -> M::Raw<u8> {
        M::raw(self.0)
    }

    /// Returns the address as an integer, null mapping to exactly `0`.
    #[inline(always)]
    pub fn addr(self) -> usize {
        self.0.addr()
    }

    /// Whether this is the null pointer.
    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// Recovers a typed pointer at the same address.
    ///
    /// This is the only way back from the erased form, and the caller picks
    /// `T` explicitly. Nothing validates that the pointee actually is a
    /// `T`; the choice is the caller's to justify, exactly as with a raw
    /// pointer cast. The qualifier is preserved, never upgraded.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_ptr::{DevicePtr, OpaquePtr};
    ///
    /// let mut words = [7u32; 4];
    /// let p = DevicePtr::<u32>::from_raw(words.as_mut_ptr());
    ///
    /// // Reinterpretation is always a visible round trip.
    /// let bytes = p.erase().cast::<u8>();
    /// assert_eq!(bytes.addr(), p.addr());
    /// ```
    #[inline(always)]
    pub const fn cast<T>(self) -> DevicePtr<T, M> {
        DevicePtr(self.0.cast(), PhantomData)
    }

    /// Exchanges the addresses of two erased pointers.
    #[inline]
    pub const fn swap(&mut self, other: &mut Self) {
        let tmp = *self;
        *self = *other;
        *other = tmp;
    }
}

impl OpaquePtr<Mut> {
    /// Widens this read-write erased pointer to the read-only form.
    ///
    /// Also available through `From`/`Into`; the reverse does not exist.
    #[inline(always)]
    pub const fn cast_const(self) -> OpaquePtr<Const> {
        OpaquePtr(self.0, PhantomData)
    }
}

impl From<OpaquePtr<Mut>> for OpaquePtr<Const> {
    /// Qualifier widening for erased pointers.
    #[inline(always)]
    fn from(ptr: OpaquePtr<Mut>) -> Self {
        ptr.cast_const()
    }
}

// -----------------------------------------------------------------------------
// Rejected conversions

/// Read-only pointers never convert back to read-write.
///
/// ```compile_fail,E0277
/// use grid_ptr::{Const, DevicePtr, Mut};
///
/// let p = DevicePtr::<u32, Const>::null();
/// let _: DevicePtr<u32, Mut> = p.into();
/// ```
///
/// The same holds for the erased form:
///
/// ```compile_fail,E0277
/// use grid_ptr::{Const, Mut, OpaquePtr};
///
/// let p = OpaquePtr::<Const>::null();
/// let _: OpaquePtr<Mut> = p.into();
/// ```
#[cfg(doctest)]
mod qualifier_narrowing_is_rejected {}

/// Changing the element type without the erase round trip does not compile.
///
/// ```compile_fail,E0277
/// use grid_ptr::DevicePtr;
///
/// let p = DevicePtr::<u32>::null();
/// let _: DevicePtr<f32> = p.into();
/// ```
#[cfg(doctest)]
mod reinterpretation_requires_the_erased_form {}

/// Integers never become device pointers without a raw-pointer cast first.
///
/// ```compile_fail,E0308
/// use grid_ptr::DevicePtr;
///
/// let _ = DevicePtr::<u32>::from_raw(0x4000);
/// ```
#[cfg(doctest)]
mod integers_are_not_pointers {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn raw_round_trip() {
        let mut x = 41u32;
        let raw = &raw mut x;

        let p = DevicePtr::<u32>::from_raw(raw);
        assert_eq!(p.as_ptr(), raw);

        let c = DevicePtr::<u32, Const>::from_raw(raw.cast_const());
        assert_eq!(c.as_ptr(), raw.cast_const());
    }

    #[test]
    fn null_is_observable_and_default() {
        let null = DevicePtr::<u32>::null();
        assert!(null.is_null());
        assert_eq!(null.addr(), 0);
        assert_eq!(DevicePtr::<u32>::default(), null);

        let mut x = 0u32;
        assert!(!DevicePtr::<u32>::from_raw(&raw mut x).is_null());

        assert!(OpaquePtr::<Mut>::null().is_null());
        assert_eq!(OpaquePtr::<Const>::default().addr(), 0);
    }

    #[test]
    fn comparisons_follow_address_order() {
        let mut data = [0u32; 4];
        let base = DevicePtr::<u32>::from_raw(data.as_mut_ptr());
        let ptrs = [base, base + 1, base + 2, base + 3];

        for (i, &x) in ptrs.iter().enumerate() {
            for (j, &y) in ptrs.iter().enumerate() {
                let relations =
                    u8::from(x < y) + u8::from(x == y) + u8::from(x > y);
                assert_eq!(relations, 1);

                assert_eq!(x < y, i < j);
                assert_eq!(x <= y, i <= j);
                assert_eq!(x > y, i > j);
                assert_eq!(x >= y, i >= j);
                assert_eq!(x == y, i == j);
                assert_eq!(x.addr() < y.addr(), i < j);
            }
        }
    }

    #[test]
    fn arithmetic_matches_native_scaling() {
        let mut data = [0u64; 8];
        let base = DevicePtr::<u64>::from_raw(data.as_mut_ptr());

        let fourth = base + 4;
        assert_eq!(fourth.addr(), base.addr() + 4 * size_of::<u64>());
        assert_eq!(fourth - base, 4);
        assert_eq!(base - fourth, -4);
        assert_eq!(fourth - 4, base);

        let mut cursor = base;
        cursor += 1;
        cursor += 1;
        cursor -= 1;
        assert_eq!(cursor - base, 1);
        assert_eq!(cursor, base + 1);
    }

    #[test]
    fn widening_preserves_the_address() {
        let mut x = 9u32;
        let p = DevicePtr::<u32>::from_raw(&raw mut x);

        let c: DevicePtr<u32, Const> = p.cast_const();
        let via_from: DevicePtr<u32, Const> = p.into();

        assert_eq!(c.addr(), p.addr());
        assert_eq!(c, via_from);
    }

    #[test]
    fn erase_and_recover_round_trip() {
        let mut data = [3u32; 4];
        let p = DevicePtr::<u32>::from_raw(data.as_mut_ptr());

        let erased: OpaquePtr = p.into();
        assert_eq!(erased.addr(), p.addr());
        assert_eq!(erased.cast::<u32>(), p);

        // Recovery as a different type preserves the address verbatim.
        let bytes = erased.cast::<u8>();
        assert_eq!(bytes.addr(), p.addr());

        // The qualifier survives the round trip.
        let frozen = p.cast_const().erase();
        let back: DevicePtr<u32, Const> = frozen.cast();
        assert_eq!(back, p.cast_const());
    }

    #[test]
    fn swap_exchanges_addresses() {
        let mut data = [0u32; 2];
        let first = DevicePtr::<u32>::from_raw(data.as_mut_ptr());
        let second = first + 1;

        let (mut a, mut b) = (first, second);
        a.swap(&mut b);
        assert_eq!(a, second);
        assert_eq!(b, first);

        let (mut oa, mut ob) = (first.erase(), second.erase());
        oa.swap(&mut ob);
        assert_eq!(oa.addr(), second.addr());
        assert_eq!(ob.addr(), first.addr());
    }

    #[test]
    fn formatting_shows_the_address() {
        let mut x = 0u32;
        let raw = &raw mut x;
        let p = DevicePtr::<u32>::from_raw(raw);

        assert!(format!("{p:?}").starts_with("DevicePtr("));
        assert_eq!(format!("{p:p}"), format!("{raw:p}"));

        let o = p.erase();
        assert!(format!("{o:?}").starts_with("OpaquePtr("));
        assert_eq!(format!("{o:p}"), format!("{raw:p}"));
    }
}
