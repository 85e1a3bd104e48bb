//! Step sequencing for multi-step navigation
//!
//! A jump across *k* entries must run exactly *k* callbacks, strictly
//! sequentially, in the direction-appropriate order:
//! - moving backward visits `from, from-1, ..., to+1` and runs each
//!   entry's backward callback (the most recently current entry first)
//! - moving forward visits `from+1, from+2, ..., to` and runs each
//!   entry's forward callback
//!
//! The plan is a pure sequencing artifact: it computes the visit order and
//! drives a caller-supplied executor, and the caller moves its cursor only
//! after the whole sequence has been attempted. A failing step is logged
//! and does not abort the remaining steps.

use crate::error::CallbackError;

/// Direction of a replay sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDirection {
    /// Moving toward older entries; backward callbacks run
    Backward,
    /// Moving toward newer entries; forward callbacks run
    Forward,
}

/// The exact visit order for one navigation
///
/// # Example
///
/// ```
/// use retrace_core::{ReplayDirection, ReplayPlan};
///
/// let plan = ReplayPlan::between(3, 0);
/// assert_eq!(plan.direction(), ReplayDirection::Backward);
/// assert_eq!(plan.indices(), &[3, 2, 1]);
///
/// let plan = ReplayPlan::between(0, 2);
/// assert_eq!(plan.direction(), ReplayDirection::Forward);
/// assert_eq!(plan.indices(), &[1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayPlan {
    /// Direction every step of this plan runs in
    direction: ReplayDirection,
    /// Entry indices in visit order
    indices: Vec<usize>,
}

impl ReplayPlan {
    /// Compute the plan for moving the cursor from `from` to `to`
    ///
    /// When `from == to` the plan is empty (its direction is `Forward` by
    /// convention and never consulted).
    pub fn between(from: usize, to: usize) -> Self {
        use std::cmp::Ordering;

        match to.cmp(&from) {
            Ordering::Less => Self {
                direction: ReplayDirection::Backward,
                indices: ((to + 1)..=from).rev().collect(),
            },
            Ordering::Greater => Self {
                direction: ReplayDirection::Forward,
                indices: ((from + 1)..=to).collect(),
            },
            Ordering::Equal => Self {
                direction: ReplayDirection::Forward,
                indices: Vec::new(),
            },
        }
    }

    /// Direction of this plan
    pub fn direction(&self) -> ReplayDirection {
        self.direction
    }

    /// Entry indices in visit order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the plan has no steps
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Execute the plan with the given step executor
    ///
    /// Steps run strictly sequentially in plan order, one executor call per
    /// index, never overlapping. A step that fails is logged at warn level
    /// and the remaining steps still run. Returns the number of failed
    /// steps.
    pub fn run<F>(&self, mut step: F) -> usize
    where
        F: FnMut(usize, ReplayDirection) -> Result<(), CallbackError>,
    {
        let mut failures = 0;
        for &index in &self.indices {
            if let Err(e) = step(index, self.direction) {
                log::warn!("replay callback at entry {} failed, continuing: {}", index, e);
                failures += 1;
            }
        }
        failures
    }
}
