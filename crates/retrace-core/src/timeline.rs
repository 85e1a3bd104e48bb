//! Session history timeline with cursor navigation
//!
//! The timeline provides:
//! - Snapshot recording tagged with human-readable action labels
//! - Linear undo/redo and multi-step jumps with ordered effect replay
//! - Fork-on-write truncation when recording from a rewound position
//! - Bounded retention with oldest-first eviction
//! - One synchronous status broadcast per mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use retrace_core::Timeline;
//!
//! let mut timeline = Timeline::new();
//! timeline.init(&deck);
//!
//! // Record edits as they happen
//! timeline.push("Add Lightning Bolt", &deck_after_add);
//! timeline.push("Remove Island", &deck_after_remove);
//!
//! // Navigate
//! let previous = timeline.undo();
//! let restored = timeline.redo();
//! let baseline = timeline.jump_to(0);
//!
//! // Display
//! for entry in timeline.history() {
//!     println!("{} at {}", entry.label, entry.recorded_at);
//! }
//! ```

use crate::codec::{SerdeCodec, SnapshotCodec};
use crate::config::TimelineConfig;
use crate::effect::ReversibleEffect;
use crate::error::CallbackError;
use crate::notify::{NotificationHub, SubscriberId};
use crate::replay::{ReplayDirection, ReplayPlan};
use crate::status::{LogEntry, TimelineStatus};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// One recorded point in history
struct TimelineEntry<S> {
    /// Human-readable description of the action that produced this entry
    label: String,
    /// Creation time, non-decreasing along the sequence
    recorded_at: DateTime<Utc>,
    /// Detached copy of the state at this point
    snapshot: S,
    /// Optional side effect replayed when navigation crosses this entry
    effect: Option<ReversibleEffect>,
}

/// The timeline service: ordered entries, a cursor, and a subscriber hub
///
/// One instance tracks one session's history. The entry at index 0 is the
/// baseline recorded by [`init`]; the cursor marks the active entry and
/// every mutating operation ends with exactly one status broadcast.
///
/// All state crossing the boundary is detached through the configured
/// [`SnapshotCodec`]: input states are copied on the way in, snapshots are
/// copied on the way out. Callers never hold live references into the
/// store.
///
/// [`init`]: Timeline::init
pub struct Timeline<S: 'static> {
    /// Recorded entries, insertion order = chronological order
    entries: Vec<TimelineEntry<S>>,
    /// Index of the active entry; None until `init` runs
    cursor: Option<usize>,
    /// Retention and labeling settings
    config: TimelineConfig,
    /// How snapshots are detached
    codec: Box<dyn SnapshotCodec<S>>,
    /// Status subscribers
    hub: NotificationHub<S>,
    /// Timestamp of the most recently recorded entry
    last_recorded_at: Option<DateTime<Utc>>,
}

impl<S> Timeline<S>
where
    S: Serialize + DeserializeOwned + Clone + 'static,
{
    /// Create a timeline with the default configuration and codec
    pub fn new() -> Self {
        Self::with_codec_and_config(SerdeCodec, TimelineConfig::default())
    }

    /// Create a timeline with a custom configuration and the default codec
    pub fn with_config(config: TimelineConfig) -> Self {
        Self::with_codec_and_config(SerdeCodec, config)
    }
}

impl<S: 'static> Timeline<S> {
    /// Create a timeline with a custom snapshot codec
    ///
    /// Use this when the state type has no serde support, or when a plain
    /// `Clone` is already a safe detached copy.
    pub fn with_codec<C>(codec: C) -> Self
    where
        C: SnapshotCodec<S> + 'static,
    {
        Self::with_codec_and_config(codec, TimelineConfig::default())
    }

    /// Create a timeline with a custom codec and configuration
    pub fn with_codec_and_config<C>(codec: C, config: TimelineConfig) -> Self
    where
        C: SnapshotCodec<S> + 'static,
    {
        Self {
            entries: Vec::new(),
            cursor: None,
            config,
            codec: Box::new(codec),
            hub: NotificationHub::new(),
            last_recorded_at: None,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Reset the timeline to a single baseline entry and broadcast
    ///
    /// Safe to call repeatedly; each call wipes prior history. The baseline
    /// entry carries the configured label and no effect.
    pub fn init(&mut self, state: &S) {
        self.reset(state);
        self.broadcast();
    }

    /// Reset the timeline without broadcasting
    ///
    /// Used when seeding from a consumer that is about to subscribe and
    /// does not want to observe its own initial state.
    pub fn init_silent(&mut self, state: &S) {
        self.reset(state);
    }

    fn reset(&mut self, state: &S) {
        let recorded_at = self.next_timestamp();
        let snapshot = self.codec.clone_state(state);
        self.entries.clear();
        self.entries.push(TimelineEntry {
            label: self.config.baseline_label.clone(),
            recorded_at,
            snapshot,
            effect: None,
        });
        self.cursor = Some(0);
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Record a new entry at the cursor
    ///
    /// If the cursor is mid-timeline after prior undos, every entry after
    /// it is discarded first: a new action taken from a rewound point
    /// erases the previously redoable future. The new entry becomes the
    /// active one and one status broadcast fires.
    ///
    /// Calling this before [`init`] is ignored with a warning.
    ///
    /// [`init`]: Timeline::init
    pub fn push(&mut self, label: impl Into<String>, state: &S) {
        self.push_entry(label.into(), state, None);
    }

    /// Record a new entry with a reversible side effect attached
    ///
    /// The effect is not run by the push itself; its callbacks fire only
    /// when navigation later crosses this entry.
    pub fn push_with_effect(
        &mut self,
        label: impl Into<String>,
        state: &S,
        effect: ReversibleEffect,
    ) {
        self.push_entry(label.into(), state, Some(effect));
    }

    fn push_entry(&mut self, label: String, state: &S, effect: Option<ReversibleEffect>) {
        let cursor = match self.cursor {
            Some(cursor) => cursor,
            None => {
                log::warn!("push {:?} ignored: timeline has not been initialized", label);
                return;
            }
        };

        // Fork-on-write
        if cursor + 1 < self.entries.len() {
            self.entries.truncate(cursor + 1);
        }

        let recorded_at = self.next_timestamp();
        let snapshot = self.codec.clone_state(state);
        self.entries.push(TimelineEntry {
            label,
            recorded_at,
            snapshot,
            effect,
        });
        self.cursor = Some(self.entries.len() - 1);
        self.enforce_capacity();
        self.broadcast();
    }

    fn enforce_capacity(&mut self) {
        if self.config.capacity > 0 && self.entries.len() > self.config.capacity {
            let excess = self.entries.len() - self.config.capacity;
            self.entries.drain(0..excess);
            // The cursor keeps pointing at the same logical entry
            if let Some(cursor) = self.cursor.as_mut() {
                *cursor = cursor.saturating_sub(excess);
            }
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Step backward one entry
    ///
    /// Runs the backward callback of the entry being left, moves the
    /// cursor, broadcasts, and returns a detached copy of the newly active
    /// state. Returns `None` without any state change when [`can_undo`] is
    /// false.
    ///
    /// [`can_undo`]: Timeline::can_undo
    pub fn undo(&mut self) -> Option<S> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor?;
        self.jump_to(cursor - 1)
    }

    /// Step forward one entry
    ///
    /// Runs the forward callback of the entry becoming active, moves the
    /// cursor, broadcasts, and returns a detached copy of the newly active
    /// state. Returns `None` without any state change when [`can_redo`] is
    /// false.
    ///
    /// [`can_redo`]: Timeline::can_redo
    pub fn redo(&mut self) -> Option<S> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor?;
        self.jump_to(cursor + 1)
    }

    /// Move the cursor directly to `target`, replaying effects in order
    ///
    /// Moving backward runs backward callbacks from the current entry down
    /// to just above the target, newest first; moving forward runs forward
    /// callbacks from just above the current entry up to the target. A
    /// failing callback is logged and the remaining steps still run; the
    /// cursor lands on `target` regardless and exactly one broadcast fires
    /// at the end.
    ///
    /// An out-of-range target is a no-op returning `None`, with no state
    /// change and no broadcast. Jumping to the current cursor is in range:
    /// it replays nothing but still broadcasts and returns the active
    /// state.
    pub fn jump_to(&mut self, target: usize) -> Option<S> {
        let cursor = self.cursor?;
        if target >= self.entries.len() {
            return None;
        }

        let plan = ReplayPlan::between(cursor, target);
        log::debug!(
            "jump from {} to {} replaying {} step(s)",
            cursor,
            target,
            plan.len()
        );
        plan.run(|index, direction| {
            let entry = &mut self.entries[index];
            match entry.effect.as_mut() {
                Some(effect) => match direction {
                    ReplayDirection::Backward => effect.run_backward(),
                    ReplayDirection::Forward => effect.run_forward(),
                },
                None => Ok(()),
            }
        });

        self.cursor = Some(target);
        self.broadcast();
        Some(self.codec.clone_state(&self.entries[target].snapshot))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check if a step backward is possible
    pub fn can_undo(&self) -> bool {
        self.cursor.map_or(false, |cursor| cursor > 0)
    }

    /// Check if a step forward is possible
    pub fn can_redo(&self) -> bool {
        self.cursor
            .map_or(false, |cursor| cursor + 1 < self.entries.len())
    }

    /// All entries in reverse-chronological order, as detached copies
    pub fn history(&self) -> Vec<LogEntry<S>> {
        self.entries
            .iter()
            .rev()
            .map(|entry| LogEntry {
                label: entry.label.clone(),
                recorded_at: entry.recorded_at,
                snapshot: self.codec.clone_state(&entry.snapshot),
            })
            .collect()
    }

    /// The full status payload, as broadcast to subscribers
    ///
    /// Returns `None` until [`init`] has run.
    ///
    /// [`init`]: Timeline::init
    pub fn status(&self) -> Option<TimelineStatus<S>> {
        let cursor = self.cursor?;
        Some(TimelineStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            history: self.history(),
            cursor,
            active_state: self.codec.clone_state(&self.entries[cursor].snapshot),
        })
    }

    /// Detached copy of the active entry's state
    pub fn active_state(&self) -> Option<S> {
        let cursor = self.cursor?;
        Some(self.codec.clone_state(&self.entries[cursor].snapshot))
    }

    /// Label of the active entry
    pub fn active_label(&self) -> Option<&str> {
        let cursor = self.cursor?;
        self.entries.get(cursor).map(|entry| entry.label.as_str())
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the active entry, `None` before initialization
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Check if [`init`] has run
    ///
    /// [`init`]: Timeline::init
    pub fn is_initialized(&self) -> bool {
        self.cursor.is_some()
    }

    /// The timeline's configuration
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Configured retention bound (0 = unlimited)
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Get statistics about the timeline
    pub fn stats(&self) -> TimelineStats {
        TimelineStats {
            total_entries: self.entries.len(),
            cursor: self.cursor,
            capacity: self.config.capacity,
            subscriber_count: self.hub.len(),
            oldest_recorded_at: self.entries.first().map(|entry| entry.recorded_at),
            newest_recorded_at: self.entries.last().map(|entry| entry.recorded_at),
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a status subscriber
    ///
    /// The callback runs synchronously after every mutation, in
    /// registration order relative to other subscribers. It must not call
    /// back into this timeline.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&TimelineStatus<S>) -> Result<(), CallbackError> + 'static,
    {
        self.hub.subscribe(callback)
    }

    /// Remove a subscriber; returns true if it was registered
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.hub.unsubscribe(id)
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.hub.len()
    }

    fn broadcast(&mut self) {
        if self.hub.is_empty() {
            return;
        }
        if let Some(status) = self.status() {
            self.hub.broadcast(&status);
        }
    }

    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamped = match self.last_recorded_at {
            // Display timestamps must never run backwards, even if the
            // system clock does
            Some(previous) if now < previous => previous,
            _ => now,
        };
        self.last_recorded_at = Some(stamped);
        stamped
    }
}

impl<S> Default for Timeline<S>
where
    S: Serialize + DeserializeOwned + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> std::fmt::Debug for Timeline<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("entries", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("capacity", &self.config.capacity)
            .field("subscribers", &self.hub.len())
            .finish()
    }
}

/// Statistics about a timeline
#[derive(Debug, Clone)]
pub struct TimelineStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Index of the active entry, `None` before initialization
    pub cursor: Option<usize>,
    /// Configured retention bound (0 = unlimited)
    pub capacity: usize,
    /// Number of registered subscribers
    pub subscriber_count: usize,
    /// Timestamp of the oldest retained entry
    pub oldest_recorded_at: Option<DateTime<Utc>>,
    /// Timestamp of the newest entry
    pub newest_recorded_at: Option<DateTime<Utc>>,
}
