//! Surface bindings for retrace timelines
//!
//! This crate connects application surfaces to a shared
//! [`Timeline`](retrace_core::Timeline):
//!
//! - [`TimelineBinding`]: records edits, applies navigation back to the
//!   surface, and suppresses the echo of the surface's own recordings
//! - [`ShortcutMap`]: keyboard shortcut table resolving key combos to
//!   undo/redo, preloaded with the common conventions
//! - [`shared`]: wraps a timeline for use by several bindings on the
//!   same thread
//!
//! # Example
//!
//! ```rust,ignore
//! use retrace_binding::{shared, TimelineBinding};
//! use retrace_core::Timeline;
//!
//! let timeline = shared(Timeline::new());
//!
//! let deck_view = TimelineBinding::mount(Rc::clone(&timeline), &deck, {
//!     move |state| deck_panel.render(state)
//! });
//! let list_view = TimelineBinding::mount(Rc::clone(&timeline), &deck, {
//!     move |state| list_panel.render(state)
//! });
//!
//! // An edit on one surface reaches the other through the broadcast
//! deck_view.record_action("Add Lightning Bolt", &updated_deck);
//! ```

mod binding;
mod shortcuts;

pub use binding::{shared, SharedTimeline, TimelineBinding};
pub use shortcuts::{
    default_shortcuts, KeyCombo, Modifiers, Shortcut, ShortcutAction, ShortcutMap,
};
