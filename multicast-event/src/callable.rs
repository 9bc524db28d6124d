//! Type-erased callable entries
//!
//! Every registration is stored as a [`CallableEntry`]. Plain callables are kept
//! as bare function pointers. Bound methods pair a weak reference to the target
//! object with a method pointer and are boxed behind [`BoundTarget`] so that
//! targets of different concrete types can share one list.
//!
//! Identity is checked through [`EntryKey`]: the enum discriminant first, then
//! the concrete target type, then the addresses. Keys of different variants
//! never match, even when their addresses happen to coincide.

use crate::signature::Arguments;
use crate::types::EntryKind;
use std::any::TypeId;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Identity of a bound method registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoundIdentity {
    /// Concrete type of the target object
    pub target_type: TypeId,
    /// Address of the target's `RefCell`
    pub object: usize,
    /// Address of the method
    pub method: usize,
}

impl BoundIdentity {
    /// Build the identity of `method` bound to `object`
    pub fn of<A, T>(object: &Rc<RefCell<T>>, method: A::Method<T>) -> Self
    where
        A: Arguments,
        T: 'static,
    {
        Self {
            target_type: TypeId::of::<T>(),
            object: Rc::as_ptr(object) as *const () as usize,
            method: A::method_addr::<T>(method),
        }
    }
}

/// Transient comparison key built by detach/contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKey {
    Plain(usize),
    Bound(BoundIdentity),
}

/// Object-safe view of a bound method entry
pub(crate) trait BoundTarget<A: Arguments> {
    /// Invoke the method on the target. Returns `false` if the target is gone.
    fn invoke(&self, args: A::Args<'_>) -> bool;

    /// Identity used for detach comparisons
    fn identity(&self) -> BoundIdentity;

    /// True once the target object has been dropped
    fn is_expired(&self) -> bool;
}

/// A method of `T` bound to one (weakly held) instance
pub(crate) struct BoundMethod<T: 'static, A: Arguments> {
    object: Weak<RefCell<T>>,
    method: A::Method<T>,
    identity: BoundIdentity,
}

impl<T: 'static, A: Arguments> BoundMethod<T, A> {
    pub fn new(object: &Rc<RefCell<T>>, method: A::Method<T>) -> Self {
        Self {
            object: Rc::downgrade(object),
            method,
            identity: BoundIdentity::of::<A, T>(object, method),
        }
    }
}

impl<T: 'static, A: Arguments> BoundTarget<A> for BoundMethod<T, A> {
    fn invoke(&self, args: A::Args<'_>) -> bool {
        match self.object.upgrade() {
            Some(target) => {
                // A target that is already borrowed (re-entrant dispatch) panics here
                let mut target = target.borrow_mut();
                A::call_method::<T>(self.method, &mut *target, args);
                true
            }
            None => false,
        }
    }

    fn identity(&self) -> BoundIdentity {
        self.identity
    }

    fn is_expired(&self) -> bool {
        self.object.strong_count() == 0
    }
}

/// One registered callable
pub(crate) enum CallableEntry<A: Arguments> {
    /// Bare function pointer
    Plain(A::Plain),
    /// Object/method pair
    Bound(Box<dyn BoundTarget<A>>),
}

impl<A: Arguments> CallableEntry<A> {
    pub fn plain(f: A::Plain) -> Self {
        CallableEntry::Plain(f)
    }

    pub fn bound<T: 'static>(object: &Rc<RefCell<T>>, method: A::Method<T>) -> Self {
        CallableEntry::Bound(Box::new(BoundMethod::<T, A>::new(object, method)))
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            CallableEntry::Plain(_) => EntryKind::Plain,
            CallableEntry::Bound(_) => EntryKind::BoundMethod,
        }
    }

    #[cfg(test)]
    pub fn key(&self) -> EntryKey {
        match self {
            CallableEntry::Plain(f) => EntryKey::Plain(A::plain_addr(*f)),
            CallableEntry::Bound(b) => EntryKey::Bound(b.identity()),
        }
    }

    /// Same registration as `key`?
    pub fn matches(&self, key: &EntryKey) -> bool {
        match (self, key) {
            (CallableEntry::Plain(f), EntryKey::Plain(addr)) => A::plain_addr(*f) == *addr,
            (CallableEntry::Bound(b), EntryKey::Bound(identity)) => b.identity() == *identity,
            _ => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        match self {
            CallableEntry::Plain(_) => false,
            CallableEntry::Bound(b) => b.is_expired(),
        }
    }

    /// Run the callable. Returns `false` if a bound target was already dropped.
    pub fn invoke(&self, args: A::Args<'_>) -> bool {
        match self {
            CallableEntry::Plain(f) => {
                A::call_plain(*f, args);
                true
            }
            CallableEntry::Bound(b) => b.invoke(args),
        }
    }
}
