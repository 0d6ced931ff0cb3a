//! Atomic version of `Option<&'a T>`, the borrowed sibling of an atomic `Option<Box<T>>`.

use core::{
    marker::PhantomData,
    ptr,
    sync::atomic::{AtomicPtr, Ordering},
};

/// An atomic `Option<&'a T>`.
///
/// Loading and storing is a single pointer-sized atomic access,
/// so a reader never observes a partially written reference.
pub struct AtomicOptionRef<'a, T> {
    inner: AtomicPtr<T>,
    // `&'a T` makes the cell `Send + Sync` only if `T: Sync`.
    marker: PhantomData<&'a T>,
}

impl<'a, T> AtomicOptionRef<'a, T> {
    /// The `None` value, usable as array initializer.
    pub const NONE: Self = Self::none();

    /// Create a new `AtomicOptionRef` with the `None` value, useful for static variables.
    pub const fn none() -> Self {
        Self {
            inner: AtomicPtr::new(ptr::null_mut()),
            marker: PhantomData,
        }
    }

    /// Create a new `AtomicOptionRef` with a given value.
    pub fn new(option: Option<&'a T>) -> Self {
        Self {
            inner: AtomicPtr::new(into_ptr(option)),
            marker: PhantomData,
        }
    }

    /// Load the current value.
    pub fn load(&self, ordering: Ordering) -> Option<&'a T> {
        let ptr = self.inner.load(ordering);
        // The pointer is either null or was created from a `&'a T` in `new` or `store`.
        unsafe { ptr.as_ref() }
    }

    /// Store a new value.
    pub fn store(&self, new: Option<&'a T>, ordering: Ordering) {
        self.inner.store(into_ptr(new), ordering);
    }

    /// Get whether the current value is `None`.
    pub fn is_none(&self, ordering: Ordering) -> bool {
        self.inner.load(ordering).is_null()
    }

    /// Get whether the current value refers to the very same object as `other`.
    pub fn holds(&self, other: &T, ordering: Ordering) -> bool {
        ptr::eq(self.inner.load(ordering), other)
    }
}

impl<T> Default for AtomicOptionRef<'_, T> {
    fn default() -> Self {
        Self::none()
    }
}

fn into_ptr<T>(option: Option<&T>) -> *mut T {
    option.map_or(ptr::null_mut(), |r| r as *const T as *mut T)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn none_and_some() {
        let value = 5u32;
        let cell = AtomicOptionRef::none();
        assert!(cell.is_none(Ordering::Acquire));
        assert_eq!(None, cell.load(Ordering::Acquire));

        cell.store(Some(&value), Ordering::Release);
        assert!(!cell.is_none(Ordering::Acquire));
        assert_eq!(Some(&5), cell.load(Ordering::Acquire));

        cell.store(None, Ordering::Release);
        assert!(cell.is_none(Ordering::Acquire));
    }

    #[test]
    fn holds_compares_identity_not_value() {
        let a = 7u32;
        let b = 7u32;
        let cell = AtomicOptionRef::new(Some(&a));

        assert!(cell.holds(&a, Ordering::Acquire));
        assert!(!cell.holds(&b, Ordering::Acquire));
    }
}
