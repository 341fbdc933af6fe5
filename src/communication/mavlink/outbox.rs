//! Outbound message queue
//!
//! Fixed-capacity FIFO between the message builders and the transport
//! layer. Producers never block; when the transport falls behind, the
//! newest message is dropped with a warning.

use heapless::Deque;
use mavlink::common::MavMessage;

/// Queue capacity in messages
pub const OUTBOX_CAPACITY: usize = 16;

/// Bounded outbound queue
#[derive(Default)]
pub struct Outbox {
    queue: Deque<MavMessage, OUTBOX_CAPACITY>,
}

impl Outbox {
    pub fn new() -> Self {
        Self { queue: Deque::new() }
    }

    /// Enqueue a message; drops it when the queue is full.
    pub fn push(&mut self, msg: MavMessage) {
        if self.queue.push_back(msg).is_err() {
            crate::log_warn!("outbox full, dropping outbound message");
        }
    }

    /// Take the oldest queued message.
    pub fn pop(&mut self) -> Option<MavMessage> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
