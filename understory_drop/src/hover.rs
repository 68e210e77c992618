// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-candidate tracking with a single visual marker.
//!
//! ## Usage
//!
//! 1) Run a hit test for the settled pointer position.
//! 2) Call [`HoverTracker::set_candidate`] with the result to move the marker.
//! 3) Call [`HoverTracker::clear`] when the gesture ends.
//!
//! Both calls return the `Leave(..)` / `Enter(..)` transitions they applied, old element first.
//!
//! ## Invariant
//!
//! At most one element carries the marker at any time, and it is always the current candidate.
//! The tracker is the only writer of the marker: the old candidate is unmarked before the new
//! one is marked, so no element keeps the marker after it stops being the candidate.

use alloc::vec::Vec;

use crate::types::{Border, StyleProperty, Styles};

/// A candidate transition.
///
/// Returned by [`HoverTracker::set_candidate`] and [`HoverTracker::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<E> {
    /// The element became the candidate and was marked.
    Enter(E),
    /// The element stopped being the candidate and was unmarked.
    Leave(E),
}

/// Owns the current drop candidate and its marker.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverTracker<E> {
    current: Option<E>,
    marker: Border,
}

impl<E: Copy + Eq> HoverTracker<E> {
    /// Create a tracker with no candidate that marks with `marker`.
    pub fn new(marker: Border) -> Self {
        Self {
            current: None,
            marker,
        }
    }

    /// The current candidate, if any.
    pub fn current(&self) -> Option<E> {
        self.current
    }

    /// Make `element` the candidate.
    ///
    /// No-op when `element` already is the candidate.
    pub fn set_candidate<S>(&mut self, host: &mut S, element: E) -> Vec<HoverEvent<E>>
    where
        S: Styles<Element = E> + ?Sized,
    {
        if self.current == Some(element) {
            return Vec::new();
        }
        let mut out = self.clear(host);
        host.set_style(&element, StyleProperty::Border(Some(self.marker)));
        self.current = Some(element);
        out.push(HoverEvent::Enter(element));
        out
    }

    /// Unmark and forget the candidate, if any.
    pub fn clear<S>(&mut self, host: &mut S) -> Vec<HoverEvent<E>>
    where
        S: Styles<Element = E> + ?Sized,
    {
        let mut out = Vec::new();
        if let Some(old) = self.current.take() {
            host.set_style(&old, StyleProperty::Border(None));
            out.push(HoverEvent::Leave(old));
        }
        out
    }
}
