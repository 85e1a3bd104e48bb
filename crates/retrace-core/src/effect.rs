//! Reversible side effects attached to timeline entries
//!
//! Some recorded actions have consequences outside the tracked state, such
//! as persisting a change or syncing a remote service. A [`ReversibleEffect`]
//! pairs the closure that applies such a consequence with the closure that
//! reverts it, so navigation can replay both directions in order.

use crate::error::CallbackError;

/// A side-effect callback run during navigation
pub type EffectFn = Box<dyn FnMut() -> Result<(), CallbackError>>;

/// A pair of callbacks describing how to apply and revert a side effect
///
/// The forward callback runs when navigation moves onto the entry (redo
/// direction); the backward callback runs when navigation moves off it
/// (undo direction). Both are invoked by the timeline, never by consumers
/// directly.
///
/// # Example
///
/// ```
/// use retrace_core::ReversibleEffect;
///
/// let mut effect = ReversibleEffect::new(
///     || {
///         println!("saving");
///         Ok(())
///     },
///     || {
///         println!("reverting save");
///         Ok(())
///     },
/// );
/// assert!(effect.run_forward().is_ok());
/// assert!(effect.run_backward().is_ok());
/// ```
pub struct ReversibleEffect {
    forward: EffectFn,
    backward: EffectFn,
}

impl ReversibleEffect {
    /// Create an effect from a forward and a backward callback
    pub fn new<F, B>(forward: F, backward: B) -> Self
    where
        F: FnMut() -> Result<(), CallbackError> + 'static,
        B: FnMut() -> Result<(), CallbackError> + 'static,
    {
        Self {
            forward: Box::new(forward),
            backward: Box::new(backward),
        }
    }

    /// Create an effect from already-boxed callbacks
    pub fn from_boxed(forward: EffectFn, backward: EffectFn) -> Self {
        Self { forward, backward }
    }

    /// Run the forward (apply) callback
    pub fn run_forward(&mut self) -> Result<(), CallbackError> {
        (self.forward)()
    }

    /// Run the backward (revert) callback
    pub fn run_backward(&mut self) -> Result<(), CallbackError> {
        (self.backward)()
    }
}

impl std::fmt::Debug for ReversibleEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReversibleEffect").finish()
    }
}
