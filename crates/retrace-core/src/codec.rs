//! Snapshot codecs for detaching state copies
//!
//! Every entry the timeline records owns a snapshot that must stay frozen
//! while the live state keeps changing. A [`SnapshotCodec`] decides how that
//! detached copy is produced:
//! - [`SerdeCodec`] round-trips the state through a binary encoding, which
//!   breaks any shared handles the state may contain
//! - [`CloneCodec`] uses plain `Clone`, for states that are already plain
//!   data or persistent structures
//!
//! # Example
//!
//! ```
//! use retrace_core::{CloneCodec, SerdeCodec, SnapshotCodec};
//!
//! let state = vec![1u32, 2, 3];
//! let detached = SerdeCodec.clone_state(&state);
//! assert_eq!(detached, state);
//!
//! let cheap = CloneCodec.clone_state(&state);
//! assert_eq!(cheap, state);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for producing a detached copy of a state value.
///
/// Implementations decide the copy strategy. The contract is that the
/// returned value shares no mutable handles with the input; the timeline
/// relies on that to keep recorded snapshots frozen.
pub trait SnapshotCodec<S> {
    /// Produce a detached copy of `state`.
    ///
    /// This must not fail. Implementations that can fail internally are
    /// expected to degrade to a best-effort copy and log what happened.
    fn clone_state(&self, state: &S) -> S;
}

/// Codec that detaches snapshots by a serialize/deserialize round trip.
///
/// A plain `Clone` of a state containing shared interior-mutable handles
/// produces an aliasing copy that would let later edits rewrite recorded
/// history. The round trip materializes a structurally independent value.
///
/// When either leg of the round trip fails, the failure is logged at warn
/// level and the codec falls back to `Clone`. The fallback keeps recording
/// alive at the cost of the detachment guarantee for that one snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeCodec;

impl<S> SnapshotCodec<S> for SerdeCodec
where
    S: Serialize + DeserializeOwned + Clone,
{
    fn clone_state(&self, state: &S) -> S {
        match bincode::serialize(state) {
            Ok(bytes) => match bincode::deserialize(&bytes) {
                Ok(copy) => copy,
                Err(e) => {
                    log::warn!("snapshot decode failed, falling back to Clone: {}", e);
                    state.clone()
                }
            },
            Err(e) => {
                log::warn!("snapshot encode failed, falling back to Clone: {}", e);
                state.clone()
            }
        }
    }
}

/// Codec that detaches snapshots with plain `Clone`.
///
/// Suitable when the state is plain data, or persistent/immutable so that
/// clones cannot alias mutable internals.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneCodec;

impl<S: Clone> SnapshotCodec<S> for CloneCodec {
    fn clone_state(&self, state: &S) -> S {
        state.clone()
    }
}
