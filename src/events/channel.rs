use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use log::trace;

pub type Callback<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

type Listeners<T> = Rc<RefCell<BTreeMap<SubscriptionId, Callback<T>>>>;

/// Sending half of a [`Channel`].
pub struct EventEmitter<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Receiving half of a [`Channel`].
pub struct EventObserver<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Handle returned by [`EventObserver::subscribe`]; dropping it keeps the
/// subscription alive, call [`Unsubscriber::unsubscribe`] to detach.
pub struct Unsubscriber<T: std::fmt::Debug> {
    channel: Channel<T>,
    id: SubscriptionId,
}

impl<T: std::fmt::Debug> Unsubscriber<T> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn unsubscribe(self) -> bool {
        self.channel.unsubscribe(self.id)
    }
}

/// Single-threaded broadcast channel. Listeners run in subscription order.
pub struct Channel<T: std::fmt::Debug> {
    listeners: Listeners<T>,
    next_id: Rc<Cell<SubscriptionId>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<T: std::fmt::Debug> Channel<T> {
    pub fn new() -> (EventEmitter<T>, EventObserver<T>) {
        let channel = Channel {
            listeners: Rc::new(RefCell::new(BTreeMap::new())),
            next_id: Rc::new(Cell::new(0)),
        };
        (
            EventEmitter {
                channel: channel.clone(),
            },
            EventObserver { channel },
        )
    }

    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    fn emit(&self, data: &T) {
        // snapshot so listeners may subscribe or unsubscribe while handling
        let listeners: Vec<Callback<T>> = self.listeners.borrow().values().cloned().collect();
        trace!(target: "events", "Emitting event to {} listeners: {:?}", listeners.len(), data);
        for listener in listeners {
            listener(data);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: std::fmt::Debug> EventEmitter<T> {
    pub fn emit(&self, data: &T) {
        self.channel.emit(data);
    }

    pub fn emit_owned(&self, data: T) {
        self.channel.emit(&data);
    }

    pub fn has_listeners(&self) -> bool {
        self.channel.listener_count() > 0
    }
}

impl<T: std::fmt::Debug> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = self.channel.subscribe(callback);
        Unsubscriber {
            channel: self.channel.clone(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Ping {
        Word(String),
        Stop,
    }

    #[test]
    fn test_listeners_receive_in_subscription_order() {
        let (emitter, observer) = Channel::<Ping>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        observer.subscribe(move |p: &Ping| first.borrow_mut().push(format!("a:{:?}", p)));
        let second = seen.clone();
        observer.subscribe(move |p: &Ping| second.borrow_mut().push(format!("b:{:?}", p)));

        emitter.emit(&Ping::Stop);
        assert_eq!(*seen.borrow(), vec!["a:Stop", "b:Stop"]);
    }

    #[test]
    fn test_unsubscriber_detaches_listener() {
        let (emitter, observer) = Channel::<Ping>::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let handle = observer.subscribe(move |_| count_clone.set(count_clone.get() + 1));
        emitter.emit_owned(Ping::Word("litwo".to_string()));
        assert!(handle.unsubscribe());
        emitter.emit_owned(Ping::Word("ojczyzno".to_string()));

        assert_eq!(count.get(), 1);
        assert!(!emitter.has_listeners());
    }

    #[test]
    fn test_listener_may_subscribe_while_handling() {
        let (emitter, observer) = Channel::<Ping>::new();
        let late_calls = Rc::new(Cell::new(0));

        let observer_clone = observer.clone();
        let late_calls_clone = late_calls.clone();
        observer.subscribe(move |p: &Ping| {
            if *p == Ping::Stop {
                let counter = late_calls_clone.clone();
                observer_clone.subscribe(move |_| counter.set(counter.get() + 1));
            }
        });

        emitter.emit(&Ping::Stop);
        assert_eq!(late_calls.get(), 0);
        emitter.emit(&Ping::Word("moja".to_string()));
        assert_eq!(late_calls.get(), 1);
    }
}
