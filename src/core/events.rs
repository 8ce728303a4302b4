//! Broadcast event bus for mutations and notices
//!
//! Handlers publish an [`EntityEvent`] after each successful mutation and a
//! [`Notice`] for every user-facing message. Any number of subscribers (a
//! UI, a log tailer, tests) receive them through `tokio::sync::broadcast`.
//! The most recent envelopes are also kept in an [`ActivityLog`] for the
//! activity feed.
//!
//! ```text
//! REST handler ──┐
//!                ├──▶ EventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! Page controller┘   (as a Notifier)
//! ```

use crate::core::notify::{Notice, Notifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

/// Events related to record mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EntityEvent {
    Created {
        entity_type: String,
        entity_id: u64,
        data: serde_json::Value,
    },
    Updated {
        entity_type: String,
        entity_id: u64,
        data: serde_json::Value,
    },
    Deleted {
        entity_type: String,
        entity_id: u64,
    },
}

/// Top-level event carried by the bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeskEvent {
    Entity(EntityEvent),
    Notice(Notice),
}

impl DeskEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            DeskEvent::Entity(_) => "entity",
            DeskEvent::Notice(_) => "notice",
        }
    }

    /// Get the entity type this event relates to
    pub fn entity_type(&self) -> Option<&str> {
        match self {
            DeskEvent::Entity(
                EntityEvent::Created { entity_type, .. }
                | EntityEvent::Updated { entity_type, .. }
                | EntityEvent::Deleted { entity_type, .. },
            ) => Some(entity_type),
            DeskEvent::Notice(_) => None,
        }
    }

    /// Get the record id this event relates to
    pub fn entity_id(&self) -> Option<u64> {
        match self {
            DeskEvent::Entity(
                EntityEvent::Created { entity_id, .. }
                | EntityEvent::Updated { entity_id, .. }
                | EntityEvent::Deleted { entity_id, .. },
            ) => Some(*entity_id),
            DeskEvent::Notice(_) => None,
        }
    }

    /// Get the action name (created, updated, deleted, notice)
    pub fn action(&self) -> &str {
        match self {
            DeskEvent::Entity(EntityEvent::Created { .. }) => "created",
            DeskEvent::Entity(EntityEvent::Updated { .. }) => "updated",
            DeskEvent::Entity(EntityEvent::Deleted { .. }) => "deleted",
            DeskEvent::Notice(_) => "notice",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Position of the event on its bus, starting at 1
    pub sequence: u64,
    /// When the event was published
    pub timestamp: DateTime<Utc>,
    pub event: DeskEvent,
}

/// Broadcast-based event bus
///
/// Cheap to clone; clones share the channel and the sequence counter.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
    sequence: Arc<AtomicU64>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Slow receivers lose the oldest events once `capacity` are buffered.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will see the event
    /// (0 when nobody listens).
    pub fn publish(&self, event: DeskEvent) -> usize {
        let envelope = EventEnvelope {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            timestamp: Utc::now(),
            event,
        };
        self.forward(envelope)
    }

    /// Send an envelope stamped elsewhere (an [`ActivityLog`]) as is
    pub fn forward(&self, envelope: EventEnvelope) -> usize {
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Notifier for EventBus {
    fn notify(&self, notice: Notice) {
        self.publish(DeskEvent::Notice(notice));
    }
}

/// Bounded history of recent events, oldest dropped first
///
/// Cheap to clone; clones share the history and the sequence counter.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<EventEnvelope>>>,
    sequence: Arc<AtomicU64>,
    capacity: usize,
}

impl ActivityLog {
    /// Keep at most `capacity` events (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            sequence: Arc::new(AtomicU64::new(0)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stamp `event` with the next sequence number and keep it
    pub fn record(&self, event: DeskEvent) -> EventEnvelope {
        let envelope = EventEnvelope {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            timestamp: Utc::now(),
            event,
        };

        // The history is append-only, so a poisoned lock still holds a usable queue
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(envelope.clone());

        envelope
    }

    /// Up to `limit` events, newest first
    pub fn recent(&self, limit: usize) -> Vec<EventEnvelope> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(100)
    }
}
