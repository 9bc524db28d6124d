//! Main dispatcher API
//!
//! [`Dispatcher`] owns an ordered list of callables that share one argument
//! signature and calls all of them, in attachment order, on [`Dispatcher::invoke`].

use crate::callable::{BoundIdentity, CallableEntry, EntryKey};
use crate::config::DispatcherConfig;
use crate::signature::Arguments;
use crate::types::{DispatcherStats, EntryKind, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An ordered multicast callback container
///
/// `A` is the tuple of argument kinds (see [`signature`](crate::signature)),
/// e.g. `Dispatcher<(i32,)>` holds `fn(i32)` callables and methods of the form
/// `fn(&mut T, i32)`, and `Dispatcher<(ByRef<str>, ByMut<u32>)>` holds
/// `fn(&str, &mut u32)`.
///
/// Two kinds of callables can be attached:
///
/// - **Plain**: free functions, associated functions and capture-less closures,
///   stored as bare function pointers and identified by address.
/// - **Bound methods**: a method paired with an `Rc<RefCell<T>>` target. Only a
///   weak reference is kept, so the dispatcher never keeps a target alive.
///   Entries whose target has been dropped are skipped on invoke; detach them
///   before dropping the target, or call [`prune_expired`](Self::prune_expired).
///
/// Attaching never deduplicates, and detaching something that is not attached
/// is a silent no-op. All mutators return `&mut Self` for chaining:
///
/// ```
/// use multicast_event::Dispatcher;
///
/// fn a(_: i32) {}
/// fn b(_: i32) {}
///
/// let mut event = Dispatcher::<(i32,)>::new();
/// event.attach(a).attach(b).detach(a);
/// assert_eq!(event.len(), 1);
/// assert!(event.contains(b));
/// ```
pub struct Dispatcher<A: Arguments> {
    /// Registered callables in attachment order
    entries: Vec<CallableEntry<A>>,
    config: DispatcherConfig,
}

impl<A: Arguments> Dispatcher<A> {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create an empty dispatcher with the given configuration
    ///
    /// Aborts if `initial_capacity` cannot be allocated; use
    /// [`try_with_config`](Self::try_with_config) when the value is untrusted.
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            entries: Vec::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// Like [`with_config`](Self::with_config), but reports an unsatisfiable
    /// `initial_capacity` instead of aborting
    pub fn try_with_config(config: DispatcherConfig) -> Result<Self> {
        let mut entries = Vec::new();
        entries.try_reserve(config.initial_capacity)?;
        Ok(Self { entries, config })
    }

    /// Append a plain callable
    ///
    /// # Example
    /// ```
    /// use multicast_event::Dispatcher;
    ///
    /// fn print_num(n: i32) {
    ///     println!("{}", n);
    /// }
    ///
    /// let mut event = Dispatcher::<(i32,)>::new();
    /// event.attach(print_num).attach(|n: i32| println!("twice: {}", n * 2));
    /// event.invoke((123,));
    /// ```
    pub fn attach(&mut self, callable: A::Plain) -> &mut Self {
        self.push(CallableEntry::plain(callable))
    }

    /// Append a method bound to `object`
    ///
    /// Only a weak reference to `object` is stored.
    ///
    /// # Example
    /// ```
    /// use multicast_event::Dispatcher;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// struct Enemy {
    ///     health: i32,
    /// }
    ///
    /// impl Enemy {
    ///     fn take_damage(&mut self, amount: i32) {
    ///         self.health -= amount;
    ///     }
    /// }
    ///
    /// let enemy = Rc::new(RefCell::new(Enemy { health: 100 }));
    /// let mut on_explosion = Dispatcher::<(i32,)>::new();
    /// on_explosion.attach_method(&enemy, Enemy::take_damage);
    /// on_explosion.invoke((30,));
    /// assert_eq!(enemy.borrow().health, 70);
    /// ```
    pub fn attach_method<T: 'static>(
        &mut self,
        object: &Rc<RefCell<T>>,
        method: A::Method<T>,
    ) -> &mut Self {
        self.push(CallableEntry::bound(object, method))
    }

    /// Like [`attach`](Self::attach), but reports allocation failure instead of aborting
    pub fn try_attach(&mut self, callable: A::Plain) -> Result<&mut Self> {
        self.entries.try_reserve(1)?;
        Ok(self.push(CallableEntry::plain(callable)))
    }

    /// Like [`attach_method`](Self::attach_method), but reports allocation failure instead of aborting
    pub fn try_attach_method<T: 'static>(
        &mut self,
        object: &Rc<RefCell<T>>,
        method: A::Method<T>,
    ) -> Result<&mut Self> {
        self.entries.try_reserve(1)?;
        Ok(self.push(CallableEntry::bound(object, method)))
    }

    /// Remove the first registration of `callable`, if any
    pub fn detach(&mut self, callable: A::Plain) -> &mut Self {
        self.detach_first(EntryKey::Plain(A::plain_addr(callable)))
    }

    /// Remove the first registration of `method` bound to `object`, if any
    pub fn detach_method<T: 'static>(
        &mut self,
        object: &Rc<RefCell<T>>,
        method: A::Method<T>,
    ) -> &mut Self {
        self.detach_first(EntryKey::Bound(BoundIdentity::of::<A, T>(object, method)))
    }

    /// Remove every registration of `callable`
    pub fn detach_all(&mut self, callable: A::Plain) -> &mut Self {
        self.detach_matching(EntryKey::Plain(A::plain_addr(callable)))
    }

    /// Remove every registration of `method` bound to `object`
    pub fn detach_all_method<T: 'static>(
        &mut self,
        object: &Rc<RefCell<T>>,
        method: A::Method<T>,
    ) -> &mut Self {
        self.detach_matching(EntryKey::Bound(BoundIdentity::of::<A, T>(object, method)))
    }

    /// Remove every entry without invoking any of them
    pub fn clear(&mut self) -> &mut Self {
        log::debug!(
            "[{}] clearing {} entries",
            self.config.display_label(),
            self.entries.len()
        );
        self.entries.clear();
        self
    }

    /// Drop bound entries whose target no longer exists
    ///
    /// Returns the number of entries removed.
    pub fn prune_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.is_expired());
        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!(
                "[{}] pruned {} expired entries",
                self.config.display_label(),
                removed
            );
        }
        removed
    }

    /// Call every entry in attachment order
    ///
    /// Arguments are handed to every entry in the same form: by-value
    /// arguments are cloned per entry, `&T` is copied and `&mut T` is
    /// reborrowed, so each entry sees what the previous one left behind. A
    /// panic inside a callable unwinds out of this call and the remaining
    /// entries are not run. Bound entries whose target was dropped are skipped.
    ///
    /// A bound target must not be borrowed while the dispatcher runs: the
    /// `RefCell` borrow inside invoke would panic.
    pub fn invoke(&self, mut args: A::Args<'_>) {
        log::trace!(
            "[{}] invoking {} entries",
            self.config.display_label(),
            self.entries.len()
        );

        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.invoke(A::reborrow(&mut args)) {
                log::trace!(
                    "[{}] skipped expired entry at index {}",
                    self.config.display_label(),
                    index
                );
            }
        }
    }

    /// Is `callable` registered at least once?
    pub fn contains(&self, callable: A::Plain) -> bool {
        let key = EntryKey::Plain(A::plain_addr(callable));
        self.entries.iter().any(|entry| entry.matches(&key))
    }

    /// Is `method` bound to `object` registered at least once?
    pub fn contains_method<T: 'static>(&self, object: &Rc<RefCell<T>>, method: A::Method<T>) -> bool {
        let key = EntryKey::Bound(BoundIdentity::of::<A, T>(object, method));
        self.entries.iter().any(|entry| entry.matches(&key))
    }

    /// Number of registered entries (expired ones included)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kinds of the registered entries, in attachment order
    pub fn kinds(&self) -> impl Iterator<Item = EntryKind> + '_ {
        self.entries.iter().map(CallableEntry::kind)
    }

    /// Count entries by kind
    pub fn stats(&self) -> DispatcherStats {
        let mut stats = DispatcherStats {
            num_entries: self.entries.len(),
            ..DispatcherStats::default()
        };

        for entry in &self.entries {
            match entry.kind() {
                EntryKind::Plain => stats.num_plain += 1,
                EntryKind::BoundMethod => stats.num_bound += 1,
            }
            if entry.is_expired() {
                stats.num_expired += 1;
            }
        }

        stats
    }

    /// The label from the configuration, if one was set
    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    /// The configuration this dispatcher was built with
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    fn push(&mut self, entry: CallableEntry<A>) -> &mut Self {
        log::trace!(
            "[{}] attached {} entry at index {}",
            self.config.display_label(),
            entry.kind(),
            self.entries.len()
        );
        self.entries.push(entry);
        self
    }

    fn detach_first(&mut self, key: EntryKey) -> &mut Self {
        match self.entries.iter().position(|entry| entry.matches(&key)) {
            Some(index) => {
                self.entries.remove(index);
            }
            None => {
                log::debug!(
                    "[{}] detach found no matching entry",
                    self.config.display_label()
                );
            }
        }
        self
    }

    fn detach_matching(&mut self, key: EntryKey) -> &mut Self {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.matches(&key));
        if self.entries.len() == before {
            log::debug!(
                "[{}] detach_all found no matching entry",
                self.config.display_label()
            );
        }
        self
    }
}

impl<A: Arguments> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Arguments> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("label", &self.config.label)
            .field("entries", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}
