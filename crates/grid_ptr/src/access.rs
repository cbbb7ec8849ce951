//! Access to the pointee, compiled only for the device context.
//!
//! The operations below exist when `target_os = "cuda"` holds or the
//! `device` cargo feature is enabled. In every other build this module is
//! empty, so a call such as `ptr.as_ref()` simply fails to resolve and a
//! wrong-space access becomes a compile error instead of a fault on the
//! wrong processor.
//!
//! The gate removes the wrong-context hazard, nothing else. Every operation
//! here keeps the raw-pointer validity obligations and is therefore
//! `unsafe`.

crate::cfg::device! {
    use crate::DevicePtr;
    use crate::mutability::{Mut, Mutability};

    impl<T, M: Mutability> DevicePtr<T, M> {
        /// Dereferences the pointer.
        ///
        /// Member access has no separate operation; it goes through the
        /// returned reference.
        ///
        /// # Safety
        ///
        /// - The pointer must be
        ///   [convertible to a reference](https://doc.rust-lang.org/stable/core/ptr/index.html#pointer-to-reference-conversion)
        ///   in the device space.
        /// - The pointee must not be mutated while the returned reference
        ///   is alive.
        ///
        /// # Examples
        ///
        /// ```
        /// use grid_ptr::DevicePtr;
        ///
        /// let mut x = 88u32;
        /// let p = DevicePtr::<u32>::from_raw(&raw mut x);
        ///
        /// assert_eq!(unsafe { *p.as_ref() }, 88);
        /// ```
        #[inline(always)]
        pub const unsafe fn as_ref<'a>(self) -> &'a T {
            // SAFETY: The caller upholds the pointer-to-reference rules.
            unsafe { &*self.0 }
        }

        /// Dereferences the pointer `count` elements away.
        ///
        /// There is no bounds check of any kind.
        ///
        /// # Safety
        ///
        /// Same rules as [`as_ref`](Self::as_ref), applied to the offset
        /// address, which must stay inside the same allocation.
        ///
        /// # Examples
        ///
        /// ```
        /// use grid_ptr::DevicePtr;
        ///
        /// let mut data = [1u32, 2, 3];
        /// let p = DevicePtr::<u32>::from_raw(data.as_mut_ptr());
        ///
        /// assert_eq!(unsafe { *p.index(2) }, 3);
        /// ```
        #[inline(always)]
        pub const unsafe fn index<'a>(self, count: isize) -> &'a T {
            Self::assert_element_sized();
            // SAFETY: The caller keeps the offset in bounds and upholds the
            // pointer-to-reference rules.
            unsafe { &*self.0.offset(count) }
        }
    }

    impl<T> DevicePtr<T, Mut> {
        /// Dereferences the pointer mutably.
        ///
        /// Only read-write pointers have this operation; a
        /// `DevicePtr<T, Const>` offers [`as_ref`](Self::as_ref) alone.
        ///
        /// # Safety
        ///
        /// - The pointer must be
        ///   [convertible to a reference](https://doc.rust-lang.org/stable/core/ptr/index.html#pointer-to-reference-conversion)
        ///   in the device space.
        /// - No other access to the pointee may happen while the returned
        ///   reference is alive.
        ///
        /// # Examples
        ///
        /// ```
        /// use grid_ptr::DevicePtr;
        ///
        /// let mut x = 1u32;
        /// let p = DevicePtr::<u32>::from_raw(&raw mut x);
        ///
        /// unsafe { *p.as_mut() = 9 };
        /// assert_eq!(x, 9);
        /// ```
        #[inline(always)]
        pub const unsafe fn as_mut<'a>(self) -> &'a mut T {
            // SAFETY: The caller upholds the pointer-to-reference rules and
            // exclusivity.
            unsafe { &mut *self.0 }
        }

        /// Dereferences the pointer `count` elements away, mutably.
        ///
        /// There is no bounds check of any kind.
        ///
        /// # Safety
        ///
        /// Same rules as [`as_mut`](Self::as_mut), applied to the offset
        /// address, which must stay inside the same allocation.
        ///
        /// # Examples
        ///
        /// ```
        /// use grid_ptr::DevicePtr;
        ///
        /// let mut data = [0u32; 4];
        /// let p = DevicePtr::<u32>::from_raw(data.as_mut_ptr());
        ///
        /// unsafe { *p.index_mut(3) = 7 };
        /// assert_eq!(data[3], 7);
        /// ```
        #[inline(always)]
        pub const unsafe fn index_mut<'a>(self, count: isize) -> &'a mut T {
            Self::assert_element_sized();
            // SAFETY: The caller keeps the offset in bounds and upholds the
            // pointer-to-reference rules and exclusivity.
            unsafe { &mut *self.0.offset(count) }
        }
    }

    #[cfg(test)]
    mod tests {
        use crate::{Const, DevicePtr};

        #[test]
        fn deref_and_index_read() {
            let mut data = [10u32, 11, 12, 13];
            let p = DevicePtr::<u32>::from_raw(data.as_mut_ptr());

            unsafe {
                assert_eq!(*p.as_ref(), 10);
                assert_eq!(*p.index(0), 10);
                assert_eq!(*p.index(2), 12);
                assert_eq!(*(p + 3).as_ref(), 13);
            }
        }

        #[test]
        fn writes_go_through_read_write_pointers() {
            let mut data = [0u32; 3];
            let p = DevicePtr::<u32>::from_raw(data.as_mut_ptr());

            unsafe {
                *p.as_mut() = 5;
                *p.index_mut(2) = 7;
            }
            assert_eq!(data, [5, 0, 7]);
        }

        #[test]
        fn read_only_pointers_read() {
            let data = [3u32, 4];
            let p = DevicePtr::<u32, Const>::from_raw(data.as_ptr());

            unsafe {
                assert_eq!(*p.as_ref(), 3);
                assert_eq!(*p.index(1), 4);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Rejected accesses

/// Host code cannot reach through a device pointer.
///
/// ```compile_fail,E0599
/// use grid_ptr::DevicePtr;
///
/// let p = DevicePtr::<u32>::null();
/// let _ = unsafe { p.as_ref() };
/// ```
///
/// Indexing is gated the same way:
///
/// ```compile_fail,E0599
/// use grid_ptr::DevicePtr;
///
/// let p = DevicePtr::<u32>::null();
/// let _ = unsafe { p.index(0) };
/// ```
#[cfg(all(doctest, not(any(target_os = "cuda", feature = "device"))))]
mod host_code_cannot_reach_the_pointee {}

/// Read-only pointers reject every mutable access, even on the device.
///
/// ```compile_fail,E0599
/// use grid_ptr::{Const, DevicePtr};
///
/// let p = DevicePtr::<u32, Const>::null();
/// let _ = unsafe { p.as_mut() };
/// ```
#[cfg(all(doctest, any(target_os = "cuda", feature = "device")))]
mod read_only_pointers_reject_writes {}
