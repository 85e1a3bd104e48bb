//! Host-side controller wiring a timeline to an application surface
//!
//! A [`TimelineBinding`] connects one surface (a window, a panel, an
//! editor view) to a shared [`Timeline`]:
//!
//! - records surface edits into the timeline
//! - applies timeline navigation back to the surface through a callback
//! - suppresses the echo broadcast of the surface's own recordings
//! - translates keyboard shortcuts into undo and redo
//!
//! Several bindings may share one timeline. The first to mount seeds the
//! baseline; later mounts adopt the active state instead, so every surface
//! shows the same history.
//!
//! # Example
//!
//! ```rust,ignore
//! use retrace_binding::{shared, KeyCombo, Modifiers, TimelineBinding};
//! use retrace_core::Timeline;
//!
//! let timeline = shared(Timeline::new());
//! let binding = TimelineBinding::mount(timeline, &deck, move |state| {
//!     view.render(state);
//! });
//!
//! binding.record_action("Add Lightning Bolt", &deck_after_add);
//! binding.handle_key(KeyCombo::new('z', Modifiers::CTRL)); // undo
//! ```

use crate::shortcuts::{KeyCombo, ShortcutAction, ShortcutMap};
use retrace_core::{LogEntry, ReversibleEffect, SubscriberId, Timeline, TimelineStatus};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A timeline shared between bindings on the same thread
pub type SharedTimeline<S> = Rc<RefCell<Timeline<S>>>;

/// Wrap a timeline for sharing between bindings
pub fn shared<S: 'static>(timeline: Timeline<S>) -> SharedTimeline<S> {
    Rc::new(RefCell::new(timeline))
}

/// State shared between a binding and its subscriber closure
struct BindingShared<S> {
    /// State most recently recorded through this binding; its broadcast
    /// echo is suppressed exactly once so the surface does not re-apply
    /// an edit it just made
    last_recorded: RefCell<Option<S>>,
    /// Set while a navigation call is running
    navigating: Cell<bool>,
}

/// Connects one application surface to a shared timeline
///
/// Dropping the binding unsubscribes its callback from the timeline.
pub struct TimelineBinding<S: 'static> {
    timeline: SharedTimeline<S>,
    shared: Rc<BindingShared<S>>,
    subscriber: SubscriberId,
    shortcuts: ShortcutMap,
}

impl<S> TimelineBinding<S>
where
    S: Clone + PartialEq + 'static,
{
    /// Attach a surface to a timeline
    ///
    /// If the timeline has no history yet, `initial` becomes its baseline
    /// and `apply` is not called. If another binding already seeded it,
    /// `initial` is ignored and `apply` immediately receives the active
    /// state so the surface catches up.
    ///
    /// `apply` then runs after every timeline mutation except this
    /// binding's own recordings. It must not call back into the timeline;
    /// navigation attempted from inside it is ignored with a warning.
    pub fn mount<F>(timeline: SharedTimeline<S>, initial: &S, mut apply: F) -> Self
    where
        F: FnMut(&S) + 'static,
    {
        let shared = Rc::new(BindingShared {
            last_recorded: RefCell::new(None),
            navigating: Cell::new(false),
        });

        // First mount seeds the baseline; later mounts adopt the active
        // state. The timeline borrow must end before apply runs.
        let adopted = {
            let mut inner = timeline.borrow_mut();
            if inner.is_initialized() {
                inner.active_state()
            } else {
                inner.init_silent(initial);
                None
            }
        };
        if let Some(state) = adopted.as_ref() {
            apply(state);
        }

        let subscriber = {
            let shared = Rc::clone(&shared);
            timeline
                .borrow_mut()
                .subscribe(move |status: &TimelineStatus<S>| {
                    let mut last_recorded = shared.last_recorded.borrow_mut();
                    if last_recorded.as_ref() == Some(&status.active_state) {
                        *last_recorded = None;
                        return Ok(());
                    }
                    drop(last_recorded);
                    apply(&status.active_state);
                    Ok(())
                })
        };

        Self {
            timeline,
            shared,
            subscriber,
            shortcuts: ShortcutMap::default(),
        }
    }

    /// Replace the shortcut table
    pub fn with_shortcuts(mut self, shortcuts: ShortcutMap) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Record an edit made on this surface
    ///
    /// Other bindings on the same timeline see the resulting broadcast;
    /// this binding's own `apply` callback does not.
    pub fn record_action(&self, label: impl Into<String>, state: &S) {
        self.record(label.into(), state, None);
    }

    /// Record an edit with a reversible side effect attached
    pub fn record_action_with_effect(
        &self,
        label: impl Into<String>,
        state: &S,
        effect: ReversibleEffect,
    ) {
        self.record(label.into(), state, Some(effect));
    }

    fn record(&self, label: String, state: &S, effect: Option<ReversibleEffect>) {
        if self.shared.navigating.get() {
            log::warn!("record {:?} ignored: navigation is in progress", label);
            return;
        }
        *self.shared.last_recorded.borrow_mut() = Some(state.clone());
        let mut timeline = self.timeline.borrow_mut();
        match effect {
            Some(effect) => timeline.push_with_effect(label, state, effect),
            None => timeline.push(label, state),
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Step backward, returning the state the timeline moved to
    pub fn undo(&self) -> Option<S> {
        self.navigate(|timeline| timeline.undo())
    }

    /// Step forward, returning the state the timeline moved to
    pub fn redo(&self) -> Option<S> {
        self.navigate(|timeline| timeline.redo())
    }

    /// Jump to an arbitrary entry, returning the state it holds
    pub fn jump_to(&self, target: usize) -> Option<S> {
        self.navigate(|timeline| timeline.jump_to(target))
    }

    fn navigate<F>(&self, op: F) -> Option<S>
    where
        F: FnOnce(&mut Timeline<S>) -> Option<S>,
    {
        // The guard must be checked before borrowing: re-entrant calls
        // arrive from inside apply, while the timeline is still borrowed
        if self.shared.navigating.get() {
            log::warn!("navigation ignored: another navigation is in progress");
            return None;
        }
        self.shared.navigating.set(true);
        let result = op(&mut self.timeline.borrow_mut());
        self.shared.navigating.set(false);
        result
    }

    /// Handle a key press, returning true if it triggered navigation
    ///
    /// A combo bound to an action that is currently impossible (undo at
    /// the oldest entry, redo at the newest) is reported as unhandled so
    /// the host can pass the key on.
    pub fn handle_key(&self, combo: KeyCombo) -> bool {
        match self.shortcuts.resolve(combo) {
            Some(ShortcutAction::Undo) if self.can_undo() => {
                self.undo();
                true
            }
            Some(ShortcutAction::Redo) if self.can_redo() => {
                self.redo();
                true
            }
            _ => false,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check if a step backward is possible
    pub fn can_undo(&self) -> bool {
        self.timeline.borrow().can_undo()
    }

    /// Check if a step forward is possible
    pub fn can_redo(&self) -> bool {
        self.timeline.borrow().can_redo()
    }

    /// The timeline's full status payload
    pub fn status(&self) -> Option<TimelineStatus<S>> {
        self.timeline.borrow().status()
    }

    /// All recorded entries, most recent first
    pub fn history(&self) -> Vec<LogEntry<S>> {
        self.timeline.borrow().history()
    }

    /// The underlying shared timeline
    pub fn timeline(&self) -> &SharedTimeline<S> {
        &self.timeline
    }

    /// The active shortcut table
    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }
}

impl<S: 'static> Drop for TimelineBinding<S> {
    fn drop(&mut self) {
        match self.timeline.try_borrow_mut() {
            Ok(mut timeline) => {
                timeline.unsubscribe(self.subscriber);
            }
            Err(_) => {
                log::warn!(
                    "binding dropped while its timeline was borrowed; subscriber {:?} leaks",
                    self.subscriber
                );
            }
        }
    }
}

impl<S: 'static> std::fmt::Debug for TimelineBinding<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineBinding")
            .field("subscriber", &self.subscriber)
            .field("shortcuts", &self.shortcuts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::Modifiers;
    use retrace_core::CloneCodec;

    #[derive(Debug, Clone, PartialEq)]
    struct DeckState {
        cards: Vec<String>,
    }

    fn deck(cards: &[&str]) -> DeckState {
        DeckState {
            cards: cards.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn shared_timeline() -> SharedTimeline<DeckState> {
        shared(Timeline::with_codec(CloneCodec))
    }

    fn recording_apply(
        log: &Rc<RefCell<Vec<DeckState>>>,
    ) -> impl FnMut(&DeckState) + 'static {
        let log = Rc::clone(log);
        move |state: &DeckState| log.borrow_mut().push(state.clone())
    }

    #[test]
    fn test_first_mount_seeds_baseline() {
        let timeline = shared_timeline();
        let applied = Rc::new(RefCell::new(Vec::new()));

        let _binding =
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&["Forest"]), recording_apply(&applied));

        let inner = timeline.borrow();
        assert!(inner.is_initialized());
        assert_eq!(inner.len(), 1);
        assert_eq!(inner.active_state(), Some(deck(&["Forest"])));
        // Seeding is silent; the surface already shows this state
        assert!(applied.borrow().is_empty());
    }

    #[test]
    fn test_late_mount_adopts_active_state() {
        let timeline = shared_timeline();
        {
            let mut inner = timeline.borrow_mut();
            inner.init(&deck(&[]));
            inner.push("Add Forest", &deck(&["Forest"]));
        }

        let applied = Rc::new(RefCell::new(Vec::new()));
        let _binding =
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&["stale"]), recording_apply(&applied));

        // The stale initial is discarded in favor of the shared history
        assert_eq!(*applied.borrow(), vec![deck(&["Forest"])]);
        assert_eq!(timeline.borrow().len(), 2);
    }

    #[test]
    fn test_record_suppresses_own_echo() {
        let timeline = shared_timeline();
        let applied = Rc::new(RefCell::new(Vec::new()));
        let binding =
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), recording_apply(&applied));

        binding.record_action("Add Forest", &deck(&["Forest"]));

        assert!(applied.borrow().is_empty());
        assert_eq!(timeline.borrow().len(), 2);
        assert_eq!(timeline.borrow().active_state(), Some(deck(&["Forest"])));
    }

    #[test]
    fn test_suppression_fires_only_once() {
        let timeline = shared_timeline();
        let applied = Rc::new(RefCell::new(Vec::new()));
        let binding =
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), recording_apply(&applied));

        binding.record_action("Add Forest", &deck(&["Forest"]));
        assert!(applied.borrow().is_empty());

        // Navigating back to the recorded state must not be suppressed,
        // even though it matches what was recorded earlier
        binding.undo();
        binding.redo();

        assert_eq!(*applied.borrow(), vec![deck(&[]), deck(&["Forest"])]);
    }

    #[test]
    fn test_navigation_applies_state() {
        let timeline = shared_timeline();
        let applied = Rc::new(RefCell::new(Vec::new()));
        let binding =
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), recording_apply(&applied));

        binding.record_action("Add Forest", &deck(&["Forest"]));
        binding.record_action("Add Island", &deck(&["Forest", "Island"]));

        let undone = binding.undo();
        assert_eq!(undone, Some(deck(&["Forest"])));
        assert_eq!(*applied.borrow(), vec![deck(&["Forest"])]);

        let jumped = binding.jump_to(0);
        assert_eq!(jumped, Some(deck(&[])));
        assert_eq!(*applied.borrow(), vec![deck(&["Forest"]), deck(&[])]);
    }

    #[test]
    fn test_two_surfaces_stay_in_sync() {
        let timeline = shared_timeline();
        let applied_a = Rc::new(RefCell::new(Vec::new()));
        let applied_b = Rc::new(RefCell::new(Vec::new()));

        let binding_a =
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), recording_apply(&applied_a));
        let binding_b =
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), recording_apply(&applied_b));

        // An edit on surface A reaches B but does not echo back to A
        binding_a.record_action("Add Forest", &deck(&["Forest"]));
        assert!(applied_a.borrow().is_empty());
        assert_eq!(*applied_b.borrow(), vec![deck(&["Forest"])]);

        // Navigation on B reaches both surfaces
        binding_b.undo();
        assert_eq!(*applied_a.borrow(), vec![deck(&[])]);
        assert_eq!(*applied_b.borrow(), vec![deck(&["Forest"]), deck(&[])]);
    }

    #[test]
    fn test_reentrant_navigation_is_ignored() {
        let timeline = shared_timeline();
        let slot: Rc<RefCell<Option<Rc<TimelineBinding<DeckState>>>>> =
            Rc::new(RefCell::new(None));
        let inner_results = Rc::new(RefCell::new(Vec::new()));

        let binding = {
            let slot = Rc::clone(&slot);
            let inner_results = Rc::clone(&inner_results);
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), move |_state| {
                if let Some(binding) = slot.borrow().as_ref() {
                    inner_results.borrow_mut().push(binding.undo());
                }
            })
        };
        let binding = Rc::new(binding);
        *slot.borrow_mut() = Some(Rc::clone(&binding));

        binding.record_action("Add Forest", &deck(&["Forest"]));

        let outer = binding.undo();
        assert_eq!(outer, Some(deck(&[])));
        assert_eq!(timeline.borrow().cursor(), Some(0));
        // The re-entrant attempt from inside apply was rejected
        assert_eq!(*inner_results.borrow(), vec![None]);

        *slot.borrow_mut() = None;
    }

    #[test]
    fn test_record_during_navigation_is_ignored() {
        let timeline = shared_timeline();
        let slot: Rc<RefCell<Option<Rc<TimelineBinding<DeckState>>>>> =
            Rc::new(RefCell::new(None));

        let binding = {
            let slot = Rc::clone(&slot);
            TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), move |_state| {
                if let Some(binding) = slot.borrow().as_ref() {
                    binding.record_action("sneaky", &deck(&["sneaky"]));
                }
            })
        };
        let binding = Rc::new(binding);
        *slot.borrow_mut() = Some(Rc::clone(&binding));

        binding.record_action("Add Forest", &deck(&["Forest"]));
        binding.undo();

        // The timeline still holds only the baseline and one edit
        assert_eq!(timeline.borrow().len(), 2);
        assert_eq!(timeline.borrow().cursor(), Some(0));

        *slot.borrow_mut() = None;
    }

    #[test]
    fn test_handle_key_runs_bound_action() {
        let timeline = shared_timeline();
        let binding = TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), |_| {});
        binding.record_action("Add Forest", &deck(&["Forest"]));

        assert!(binding.handle_key(KeyCombo::new('z', Modifiers::CTRL)));
        assert_eq!(timeline.borrow().cursor(), Some(0));

        assert!(binding.handle_key(KeyCombo::new('y', Modifiers::CTRL)));
        assert_eq!(timeline.borrow().cursor(), Some(1));
    }

    #[test]
    fn test_handle_key_reports_unavailable_action_as_unhandled() {
        let timeline = shared_timeline();
        let binding = TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), |_| {});

        // Nothing to undo at the baseline, nothing to redo at the newest
        assert!(!binding.handle_key(KeyCombo::new('z', Modifiers::CTRL)));
        assert!(!binding.handle_key(KeyCombo::new('y', Modifiers::CTRL)));
        // Unbound combo
        assert!(!binding.handle_key(KeyCombo::new('q', Modifiers::ALT)));
    }

    #[test]
    fn test_with_shortcuts_replaces_table() {
        let timeline = shared_timeline();
        let binding = TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), |_| {})
            .with_shortcuts(ShortcutMap::empty());
        binding.record_action("Add Forest", &deck(&["Forest"]));

        assert!(binding.can_undo());
        assert!(!binding.handle_key(KeyCombo::new('z', Modifiers::CTRL)));
        assert_eq!(timeline.borrow().cursor(), Some(1));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let timeline = shared_timeline();
        let binding = TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), |_| {});

        assert_eq!(timeline.borrow().subscriber_count(), 1);
        drop(binding);
        assert_eq!(timeline.borrow().subscriber_count(), 0);
    }

    #[test]
    fn test_guards_reflect_timeline_position() {
        let timeline = shared_timeline();
        let binding = TimelineBinding::mount(Rc::clone(&timeline), &deck(&[]), |_| {});

        assert!(!binding.can_undo());
        assert!(!binding.can_redo());

        binding.record_action("Add Forest", &deck(&["Forest"]));
        assert!(binding.can_undo());
        assert!(!binding.can_redo());
        assert_eq!(binding.history().len(), 2);
        assert_eq!(binding.status().map(|s| s.cursor), Some(1));

        binding.undo();
        assert!(!binding.can_undo());
        assert!(binding.can_redo());
    }
}
