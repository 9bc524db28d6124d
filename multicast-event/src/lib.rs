//! Multicast Event Library
//!
//! An ordered, type-erased multicast callback container. A [`Dispatcher`] holds
//! any number of callables sharing one argument signature and calls all of them,
//! in the order they were attached, when invoked.
//!
//! # Architecture
//!
//! This library is intentionally small:
//! - Plain callables (functions, capture-less closures) are stored as `fn` pointers
//! - Bound methods pair a weakly held `Rc<RefCell<T>>` with a `fn(&mut T, ..)`
//! - Arguments are passed by value, as `&T` ([`ByRef`]) or as `&mut T` ([`ByMut`])
//! - Detach identifies a registration by address, never by value
//!
//! The library does NOT:
//! - Accept closures that capture state
//! - Collect return values from callables
//! - Synchronize access across threads (the type is `!Send`)
//! - Persist registrations
//!
//! # Example Usage
//!
//! ```
//! use multicast_event::Dispatcher;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! struct Enemy {
//!     health: i32,
//! }
//!
//! impl Enemy {
//!     fn take_damage(&mut self, amount: i32) {
//!         self.health -= amount;
//!     }
//! }
//!
//! fn announce(amount: i32) {
//!     println!("Explosion dealt {} damage", amount);
//! }
//!
//! let goblin = Rc::new(RefCell::new(Enemy { health: 100 }));
//! let orc = Rc::new(RefCell::new(Enemy { health: 250 }));
//!
//! let mut on_explosion = Dispatcher::<(i32,)>::new();
//! on_explosion
//!     .attach(announce)
//!     .attach_method(&goblin, Enemy::take_damage)
//!     .attach_method(&orc, Enemy::take_damage);
//!
//! on_explosion.invoke((40,));
//! assert_eq!(goblin.borrow().health, 60);
//! assert_eq!(orc.borrow().health, 210);
//!
//! // Detach before the target goes away
//! on_explosion.detach_method(&goblin, Enemy::take_damage);
//! drop(goblin);
//!
//! on_explosion.invoke((40,));
//! assert_eq!(orc.borrow().health, 170);
//! ```

// Public modules
pub mod config;
pub mod dispatcher;
pub mod signature;
pub mod types;

// Re-export main types for convenience
pub use config::DispatcherConfig;
pub use dispatcher::Dispatcher;
pub use signature::{Arguments, ByMut, ByRef, Param};
pub use types::{DispatchError, DispatcherStats, EntryKind, Result};

// Internal modules (not exposed in public API)
mod callable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
