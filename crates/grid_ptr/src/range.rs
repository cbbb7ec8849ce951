//! Half-open ranges of device pointers.

use core::fmt;
use core::iter::FusedIterator;

use crate::DevicePtr;
use crate::mutability::{Mut, Mutability};

/// The half-open range `[start, end)` of device addresses, stepping one
/// element at a time.
///
/// This is what makes a [`DevicePtr`] usable as the cursor of
/// range-processing code: the range yields every pointer from `start` up to
/// but excluding `end`, knows its exact length, and walks from either end.
/// Iteration stays entirely in address space; the pointees are never
/// touched.
///
/// An `end` not past `start` gives an empty range.
///
/// # Examples
///
/// ```
/// use grid_ptr::{DevicePtr, PtrRange};
///
/// let mut block = [0u32; 5];
/// let base = DevicePtr::<u32>::from_raw(block.as_mut_ptr());
///
/// let range = PtrRange::new(base, base + 5);
/// assert_eq!(range.len(), 5);
///
/// for (i, p) in range.enumerate() {
///     assert_eq!(p - base, i as isize);
/// }
/// ```
pub struct PtrRange<T, M: Mutability = Mut> {
    start: DevicePtr<T, M>,
    end: DevicePtr<T, M>,
}

impl<T, M: Mutability> PtrRange<T, M> {
    /// Creates the range `[start, end)`.
    #[inline(always)]
    pub const fn new(start: DevicePtr<T, M>, end: DevicePtr<T, M>) -> Self {
        Self { start, end }
    }

    /// The lower bound, the first pointer yielded if the range is not empty.
    #[inline(always)]
    pub const fn start(&self) -> DevicePtr<T, M> {
        self.start
    }

    /// The upper bound, never yielded.
    #[inline(always)]
    pub const fn end(&self) -> DevicePtr<T, M> {
        self.end
    }

    /// Number of elements the range still covers.
    #[inline]
    pub fn len(&self) -> usize {
        let diff = self.end - self.start;
        if diff < 0 { 0 } else { diff as usize }
    }

    /// Whether the range covers no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl<T, M: Mutability> Clone for PtrRange<T, M> {
    #[inline]
    fn clone(&self) -> Self {
        Self { start: self.start, end: self.end }
    }
}

impl<T, M: Mutability> fmt::Debug for PtrRange<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PtrRange({:p}..{:p})", self.start, self.end)
    }
}

impl<T, M: Mutability> Iterator for PtrRange<T, M> {
    type Item = DevicePtr<T, M>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let p = self.start;
            self.start += 1;
            Some(p)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T, M: Mutability> DoubleEndedIterator for PtrRange<T, M> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            Some(self.end)
        } else {
            None
        }
    }
}

impl<T, M: Mutability> ExactSizeIterator for PtrRange<T, M> {}

impl<T, M: Mutability> FusedIterator for PtrRange<T, M> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn yields_every_address_in_order() {
        let mut data = [0u16; 6];
        let base = DevicePtr::<u16>::from_raw(data.as_mut_ptr());

        let collected: Vec<_> = PtrRange::new(base, base + 6).collect();
        assert_eq!(collected.len(), 6);
        for (i, p) in collected.iter().enumerate() {
            assert_eq!(*p, base + i as isize);
        }
    }

    #[test]
    fn walks_backwards_from_the_end() {
        let mut data = [0u16; 3];
        let base = DevicePtr::<u16>::from_raw(data.as_mut_ptr());

        let mut range = PtrRange::new(base, base + 3);
        assert_eq!(range.next_back(), Some(base + 2));
        assert_eq!(range.next(), Some(base));
        assert_eq!(range.next_back(), Some(base + 1));
        assert_eq!(range.next_back(), None);
        assert_eq!(range.next(), None);
    }

    #[test]
    fn length_tracks_consumption() {
        let mut data = [0u64; 4];
        let base = DevicePtr::<u64>::from_raw(data.as_mut_ptr());

        let mut range = PtrRange::new(base, base + 4);
        assert_eq!(range.len(), 4);
        assert_eq!(range.size_hint(), (4, Some(4)));

        range.next();
        range.next_back();
        assert_eq!(range.len(), 2);
        assert!(!range.is_empty());
    }

    #[test]
    fn empty_and_inverted_ranges_yield_nothing() {
        let mut data = [0u32; 2];
        let base = DevicePtr::<u32>::from_raw(data.as_mut_ptr());

        let mut empty = PtrRange::new(base, base);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.next(), None);

        let mut inverted = PtrRange::new(base + 2, base);
        assert_eq!(inverted.len(), 0);
        assert_eq!(inverted.next(), None);
        assert_eq!(inverted.next_back(), None);
    }

    #[test]
    fn stays_exhausted_after_the_last_element() {
        let mut data = [0u32; 1];
        let base = DevicePtr::<u32>::from_raw(data.as_mut_ptr());

        let mut range = PtrRange::new(base, base + 1);
        assert_eq!(range.next(), Some(base));
        assert_eq!(range.next(), None);
        assert_eq!(range.next(), None);
    }
}
