//! Core timeline engine for retrace
//!
//! This crate tracks the history of a session as an ordered sequence of
//! state snapshots and provides undo/redo navigation over it:
//!
//! - [`Timeline`]: ordered snapshots with cursor navigation, fork-on-write
//!   recording, and bounded retention
//! - [`ReversibleEffect`]: paired callbacks replayed when navigation
//!   crosses the entry that carries them
//! - [`SnapshotCodec`]: pluggable strategy for detaching snapshots from
//!   caller-owned state
//! - [`NotificationHub`]: synchronous status broadcast to subscribers
//! - [`LogExporter`]: history export in RON, JSON, CSV, and text formats
//!
//! # Example
//!
//! ```
//! use retrace_core::Timeline;
//!
//! let mut timeline = Timeline::new();
//! timeline.init(&vec!["Forest".to_string()]);
//! timeline.push(
//!     "Add Mountain",
//!     &vec!["Forest".to_string(), "Mountain".to_string()],
//! );
//!
//! assert!(timeline.can_undo());
//! let previous = timeline.undo();
//! assert_eq!(previous, Some(vec!["Forest".to_string()]));
//! ```
//!
//! # Features
//!
//! - `serde_json`: enables JSON export in [`LogExporter`]

mod codec;
mod config;
mod effect;
mod error;
mod export;
mod notify;
mod replay;
mod status;
mod timeline;

pub use codec::{CloneCodec, SerdeCodec, SnapshotCodec};
pub use config::TimelineConfig;
pub use effect::{EffectFn, ReversibleEffect};
pub use error::{CallbackError, Error, Result};
pub use export::{ExportFormat, LogExporter};
pub use notify::{NotificationHub, SubscriberFn, SubscriberId};
pub use replay::{ReplayDirection, ReplayPlan};
pub use status::{LogEntry, TimelineStatus};
pub use timeline::{Timeline, TimelineStats};
