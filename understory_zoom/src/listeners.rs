// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification.
//!
//! A [`ListenerSet`] is an ordered list of callbacks identified by
//! [`ListenerId`]. Sets are shared handles: clones refer to the same list, so
//! a callback can capture a clone and add or remove listeners while it is
//! being dispatched. Dispatch iterates over a snapshot taken when it starts;
//! changes made during dispatch apply from the next dispatch on.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::engine::ZoomEngine;

/// Handle returned when registering a listener, used to remove it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback<A> = Rc<dyn Fn(&A)>;

struct Entries<A: ?Sized> {
    next_id: u64,
    callbacks: Vec<(ListenerId, Callback<A>)>,
}

/// An ordered, shared set of callbacks receiving `&A`.
pub struct ListenerSet<A: ?Sized> {
    entries: Rc<RefCell<Entries<A>>>,
}

impl<A: ?Sized> ListenerSet<A> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Entries {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Registers `callback` after all existing listeners.
    pub fn add(&self, callback: impl Fn(&A) + 'static) -> ListenerId {
        let mut entries = self.entries.borrow_mut();
        let id = ListenerId(entries.next_id);
        entries.next_id += 1;
        entries.callbacks.push((id, Rc::new(callback)));
        id
    }

    /// Removes a listener. Returns `false` if `id` is not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.callbacks.len();
        entries.callbacks.retain(|(entry, _)| *entry != id);
        entries.callbacks.len() != before
    }

    /// Returns `true` if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries
            .borrow()
            .callbacks
            .iter()
            .any(|(entry, _)| *entry == id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().callbacks.len()
    }

    /// Returns `true` if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all listeners.
    pub fn clear(&self) {
        self.entries.borrow_mut().callbacks.clear();
    }

    /// Calls every listener registered when dispatch starts, in registration order.
    pub fn dispatch(&self, arg: &A) {
        let snapshot: Vec<Callback<A>> = self
            .entries
            .borrow()
            .callbacks
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(arg);
        }
    }
}

impl<A: ?Sized> Clone for ListenerSet<A> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<A: ?Sized> Default for ListenerSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for ListenerSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// The listener sets of a [`ZoomEngine`].
///
/// Obtained from [`ZoomEngine::listeners`]; clones share the engine's sets.
#[derive(Clone, Default, Debug)]
pub struct Listeners {
    matrix_change: ListenerSet<ZoomEngine>,
    container_size_change: ListenerSet<ZoomEngine>,
    content_size_change: ListenerSet<ZoomEngine>,
}

impl Listeners {
    /// Notified whenever the transform, a derived rect or an animation flag changes.
    #[must_use]
    pub fn matrix_change(&self) -> &ListenerSet<ZoomEngine> {
        &self.matrix_change
    }

    /// Notified after the container size changed and the engine was reset.
    #[must_use]
    pub fn container_size_change(&self) -> &ListenerSet<ZoomEngine> {
        &self.container_size_change
    }

    /// Notified after the content size changed and the engine was reset.
    #[must_use]
    pub fn content_size_change(&self) -> &ListenerSet<ZoomEngine> {
        &self.content_size_change
    }
}
