use std::cell::RefCell;
use std::rc::Rc;

use super::{EventObserver, Unsubscriber};

/// Implemented by consumers that react to a stream of events, e.g. the
/// results recorder listening to a game session.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}

/// Routes every event on `observer` to `handler`.
pub fn subscribe_handler<T, H>(observer: &EventObserver<T>, handler: Rc<RefCell<H>>) -> Unsubscriber<T>
where
    T: std::fmt::Debug + 'static,
    H: EventHandler<T> + 'static,
{
    observer.subscribe(move |event| handler.borrow_mut().handle_event(event))
}
