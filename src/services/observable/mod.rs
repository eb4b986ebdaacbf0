//! Replay-latest observable values.
//!
//! An [`Observable`] holds a current value and a registry of subscribers.
//! Subscribing delivers the current value immediately, then every later
//! publication in the order it was made. Publications made from inside a
//! subscriber callback are queued and delivered once the current round has
//! finished, so nesting never reorders what subscribers see.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`); callbacks run
//! synchronously on the caller's thread.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

struct Slot<T> {
    id: u64,
    /// Version current at subscribe time; earlier publications are not delivered
    since: u64,
    active: Cell<bool>,
    callback: RefCell<Box<dyn FnMut(&T)>>,
}

struct Inner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    next_id: Cell<u64>,
    slots: RefCell<Vec<Rc<Slot<T>>>>,
    pending: RefCell<VecDeque<(u64, T)>>,
    dispatching: Cell<bool>,
}

impl<T> Inner<T> {
    fn remove(&self, id: u64) {
        let removed = {
            let mut slots = self.slots.borrow_mut();
            slots
                .iter()
                .position(|slot| slot.id == id)
                .map(|pos| slots.remove(pos))
        };
        // Dropped outside the borrow; the callback may own other subscriptions
        if let Some(slot) = removed {
            slot.active.set(false);
        }
    }
}

/// A shared value whose changes can be observed.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                version: Cell::new(0),
                next_id: Cell::new(0),
                slots: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Latest published value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    /// Register `callback`, invoking it right away with the current value.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let slot = Rc::new(Slot {
            id,
            since: self.inner.version.get(),
            active: Cell::new(true),
            callback: RefCell::new(Box::new(callback)),
        });
        self.inner.slots.borrow_mut().push(Rc::clone(&slot));

        // The replay counts as a dispatch round; publications it makes are queued
        let outermost = !self.inner.dispatching.replace(true);
        let current = self.get();
        (slot.callback.borrow_mut())(&current);
        if outermost {
            self.drain();
        }

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove(id);
            }
        })
    }

    /// Store `value` and notify every subscriber, even if it equals the old value.
    pub fn publish(&self, value: T) {
        let version = self.inner.version.get() + 1;
        self.inner.version.set(version);
        *self.inner.value.borrow_mut() = value.clone();
        self.inner.pending.borrow_mut().push_back((version, value));

        if self.inner.dispatching.replace(true) {
            return;
        }
        self.drain();
    }

    /// Deliver queued publications in order. Caller must have set `dispatching`.
    fn drain(&self) {
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some((version, value)) = next else {
                break;
            };

            let slots: Vec<Rc<Slot<T>>> = self
                .inner
                .slots
                .borrow()
                .iter()
                .filter(|slot| slot.since < version)
                .cloned()
                .collect();

            for slot in slots {
                // May have been unsubscribed by an earlier callback this round
                if slot.active.get() {
                    (slot.callback.borrow_mut())(&value);
                }
            }
        }
        self.inner.dispatching.set(false);
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Publish `value` only if it differs from the current one.
    /// Returns true when a publication happened.
    pub fn set(&self, value: T) -> bool {
        if *self.inner.value.borrow() == value {
            return false;
        }
        self.publish(value);
        true
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.slots.borrow().len())
            .finish()
    }
}

/// Handle to a live subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop receiving values
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the callback registered for as long as the observable lives
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn test_subscribe_replays_current_value() {
        let observable = Observable::new(3);
        observable.publish(5);

        let (seen, callback) = recorder::<i32>();
        let _sub = observable.subscribe(callback);

        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn test_publications_delivered_in_order() {
        let observable = Observable::new("a".to_string());
        let (seen, callback) = recorder::<String>();
        let _sub = observable.subscribe(callback);

        observable.publish("b".to_string());
        observable.publish("c".to_string());

        assert_eq!(*seen.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_publish_delivers_equal_values() {
        let observable = Observable::new(1);
        let (seen, callback) = recorder::<i32>();
        let _sub = observable.subscribe(callback);

        observable.publish(1);

        assert_eq!(*seen.borrow(), vec![1, 1]);
    }

    #[test]
    fn test_set_skips_equal_values() {
        let observable = Observable::new(false);
        let (seen, callback) = recorder::<bool>();
        let _sub = observable.subscribe(callback);

        assert!(!observable.set(false));
        assert!(observable.set(true));
        assert!(!observable.set(true));

        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let observable = Observable::new(0);
        let (seen, callback) = recorder::<i32>();
        let sub = observable.subscribe(callback);
        assert_eq!(observable.subscriber_count(), 1);

        drop(sub);
        observable.publish(1);

        assert_eq!(observable.subscriber_count(), 0);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let observable = Observable::new(0);
        let (seen, callback) = recorder::<i32>();
        let sub = observable.subscribe(callback);

        sub.unsubscribe();
        observable.publish(1);

        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_detached_subscription_keeps_listening() {
        let observable = Observable::new(0);
        let (seen, callback) = recorder::<i32>();
        observable.subscribe(callback).detach();

        observable.publish(1);

        assert_eq!(observable.subscriber_count(), 1);
        assert_eq!(*seen.borrow(), vec![0, 1]);
    }

    #[test]
    fn test_nested_publish_is_queued_in_order() {
        let observable = Observable::new(0);

        // First subscriber bumps 1 -> 2 when it sees 1
        let echo = observable.clone();
        let _bump = observable.subscribe(move |value: &i32| {
            if *value == 1 {
                echo.publish(2);
            }
        });

        let (seen, callback) = recorder::<i32>();
        let _sub = observable.subscribe(callback);

        observable.publish(1);

        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert_eq!(observable.get(), 2);
    }

    #[test]
    fn test_publish_from_replay_callback_is_queued() {
        let observable = Observable::new(0);
        let (other_seen, other_callback) = recorder::<i32>();
        let _other = observable.subscribe(other_callback);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handle = observable.clone();
        let _sub = observable.subscribe(move |value: &i32| {
            sink.borrow_mut().push(*value);
            if *value == 0 {
                handle.publish(1);
            }
        });

        assert_eq!(*seen.borrow(), vec![0, 1]);
        assert_eq!(*other_seen.borrow(), vec![0, 1]);
        assert_eq!(observable.get(), 1);

        // Dispatch state is released once the replay round drains
        observable.publish(2);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_subscriber_added_during_dispatch_sees_latest_once() {
        let observable = Observable::new(0);
        let (late_seen, late_callback) = recorder::<i32>();
        let late_callback = Rc::new(RefCell::new(Some(late_callback)));
        let late_sub: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let handle = observable.clone();
        let slot = Rc::clone(&late_sub);
        let _adder = observable.subscribe(move |value: &i32| {
            if *value == 1 {
                handle.publish(2);
                if let Some(callback) = late_callback.borrow_mut().take() {
                    *slot.borrow_mut() = Some(handle.subscribe(callback));
                }
            }
        });

        observable.publish(1);

        // Replay delivered 2; the queued publication of 2 predates the subscription
        assert_eq!(*late_seen.borrow(), vec![2]);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_stops_delivery() {
        let observable = Observable::new(0);
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let target = Rc::clone(&victim);
        let _killer = observable.subscribe(move |value: &i32| {
            if *value == 1 {
                target.borrow_mut().take();
            }
        });

        let (seen, callback) = recorder::<i32>();
        *victim.borrow_mut() = Some(observable.subscribe(callback));

        observable.publish(1);

        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_subscription_outliving_observable_is_harmless() {
        let observable = Observable::new(0);
        let sub = observable.subscribe(|_| {});
        drop(observable);
        drop(sub);
    }
}
