//! Scroll-triggered entrance animations
//!
//! Fragments are registered as pending when rendered. When a visibility
//! report shows a pending fragment at or above the threshold, it receives
//! [`Animation::FADE_IN_UP`] and leaves the registry, so it never replays.

use std::collections::HashSet;
use tracing::debug;

use crate::page::{Animation, FragmentId, Page};

/// Share of a fragment's area that must be visible
pub const REVEAL_THRESHOLD: f32 = 0.12;

/// Visibility of one fragment in the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub target: FragmentId,
    /// Visible fraction of the fragment, 0.0..=1.0
    pub ratio: f32,
}

/// Registry of fragments still waiting for their entrance animation
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    threshold: f32,
    pending: HashSet<FragmentId>,
}

impl Default for RevealAnimator {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD)
    }
}

impl RevealAnimator {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            pending: HashSet::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn observe(&mut self, id: FragmentId) {
        self.pending.insert(id);
    }

    pub fn is_observed(&self, id: FragmentId) -> bool {
        self.pending.contains(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Forget fragments that are no longer on the page
    pub fn prune(&mut self, page: &Page) {
        self.pending.retain(|id| page.contains_fragment(*id));
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn is_intersecting(&self, ratio: f32) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Apply the entrance animation to every pending fragment reported
    /// visible, and stop observing it. Returns the fragments animated.
    pub fn report(&mut self, entries: &[Intersection], page: &mut Page) -> Vec<FragmentId> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !self.is_intersecting(entry.ratio) || !self.pending.remove(&entry.target) {
                continue;
            }
            if let Some(fragment) = page.fragment_mut(entry.target) {
                fragment.animation = Some(Animation::FADE_IN_UP);
                revealed.push(entry.target);
            }
        }
        if !revealed.is_empty() {
            debug!("Revealed {} fragment(s)", revealed.len());
        }
        revealed
    }
}
