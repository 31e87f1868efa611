//! Single-consumer event queues.
//!
//! Every producer (hotkey hook, mouse hook, display-change notification) holds
//! a [`Sender`]; exactly one thread owns the [`Receiver`] and handles events
//! one at a time, so an action always runs to completion before the next
//! event is looked at.

use tokio::sync::mpsc::error::{SendError, TryRecvError};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::Span;

pub mod dispatcher;
pub mod window_cycler;

pub struct Sender<Event>(UnboundedSender<(Span, Event)>);

pub struct Receiver<Event>(UnboundedReceiver<(Span, Event)>);

pub fn channel<Event>() -> (Sender<Event>, Receiver<Event>) {
    let (tx, rx) = unbounded_channel();
    (Sender(tx), Receiver(rx))
}

impl<Event> Sender<Event> {
    pub fn send(&self, event: Event) {
        // A send error only means the consumer already shut down.
        _ = self.try_send(event)
    }

    pub fn try_send(&self, event: Event) -> Result<(), SendError<(Span, Event)>> {
        self.0.send((Span::current(), event))
    }
}

impl<Event> Clone for Sender<Event> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Event> Receiver<Event> {
    /// Blocks the current thread until an event arrives. Returns `None` once
    /// every sender is gone. Must not be called from inside an async runtime.
    pub fn recv_blocking(&mut self) -> Option<(Span, Event)> { self.0.blocking_recv() }

    /// Returns the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<(Span, Event)> {
        match self.0.try_recv() {
            Ok(item) => Some(item),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
