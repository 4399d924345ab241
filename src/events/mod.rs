mod channel;
mod event_handler;

pub use channel::{Channel, EventEmitter, EventObserver, Unsubscriber};
pub use event_handler::{subscribe_handler, EventHandler};
