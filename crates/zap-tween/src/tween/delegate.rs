// tween/delegate.rs
//
// Listener sets for tween lifecycle events. Every event has two independent
// paths: an ordered multicast list and a single replaceable slot. Both fire,
// multicast first.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::api::types::ContactEvent;

/// A boxed event listener.
pub type Listener<P> = Box<dyn FnMut(&P)>;

/// Multicast list plus single slot for one event.
pub struct Delegate<P> {
    listeners: Vec<Listener<P>>,
    single: Option<Listener<P>>,
}

impl<P> Default for Delegate<P> {
    fn default() -> Self {
        Self { listeners: Vec::new(), single: None }
    }
}

impl<P> Delegate<P> {
    /// Append a multicast listener.
    pub fn add(&mut self, listener: impl FnMut(&P) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Bind the single slot, replacing any previous binding.
    pub fn bind(&mut self, listener: impl FnMut(&P) + 'static) {
        self.single = Some(Box::new(listener));
    }

    pub fn unbind(&mut self) {
        self.single = None;
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
        self.single = None;
    }

    /// Whether anything would run on broadcast.
    pub fn is_bound(&self) -> bool {
        !self.listeners.is_empty() || self.single.is_some()
    }

    /// Number of multicast listeners (the single slot is not counted).
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run every multicast listener in order, then the single slot if bound.
    pub fn broadcast(&mut self, payload: &P) {
        for listener in self.listeners.iter_mut() {
            listener(payload);
        }
        if let Some(single) = self.single.as_mut() {
            single(payload);
        }
    }
}

impl<P> fmt::Debug for Delegate<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("listeners", &self.listeners.len())
            .field("single", &self.single.is_some())
            .finish()
    }
}

/// All event hooks of one tween. `V` is the tween's value type.
pub struct TweenDelegates<V> {
    /// After the start values are captured. Payload: the start value.
    pub on_start: Delegate<V>,
    /// After each sample is applied. Payload: the sampled value.
    pub on_update: Delegate<V>,
    /// When a cycle ends and another begins. Payload: the value the cycle ended on.
    pub on_loop: Delegate<V>,
    /// When the last cycle ends. Payload: the end value.
    pub on_end: Delegate<V>,
    /// Once, on teardown. Payload: the last value.
    pub on_deleted: Delegate<V>,
    pub on_hit: Delegate<ContactEvent>,
    pub on_overlap: Delegate<ContactEvent>,
}

impl<V> Default for TweenDelegates<V> {
    fn default() -> Self {
        Self {
            on_start: Delegate::default(),
            on_update: Delegate::default(),
            on_loop: Delegate::default(),
            on_end: Delegate::default(),
            on_deleted: Delegate::default(),
            on_hit: Delegate::default(),
            on_overlap: Delegate::default(),
        }
    }
}

impl<V> TweenDelegates<V> {
    pub fn clear(&mut self) {
        self.on_start.clear();
        self.on_update.clear();
        self.on_loop.clear();
        self.on_end.clear();
        self.on_deleted.clear();
        self.on_hit.clear();
        self.on_overlap.clear();
    }
}

impl<V> fmt::Debug for TweenDelegates<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenDelegates")
            .field("on_start", &self.on_start)
            .field("on_update", &self.on_update)
            .field("on_loop", &self.on_loop)
            .field("on_end", &self.on_end)
            .field("on_deleted", &self.on_deleted)
            .field("on_hit", &self.on_hit)
            .field("on_overlap", &self.on_overlap)
            .finish()
    }
}

/// Deletion request a listener can hold on to.
///
/// Listeners cannot borrow the tween that is calling them; they flip this
/// flag instead and the tween tears itself down once the dispatch returns.
#[derive(Debug, Clone, Default)]
pub struct DeleteHandle(Rc<Cell<bool>>);

impl DeleteHandle {
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}
