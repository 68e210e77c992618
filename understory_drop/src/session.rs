// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag gesture state machine.
//!
//! ## States
//!
//! A [`DragSession`] is either [`DragState::Idle`] or [`DragState::Dragging`].
//! Every gesture ends in `Idle`, and the same session serves any number of gestures on its subject.
//!
//! ## Press (`Idle` → `Dragging`)
//!
//! 1) The grab offset (pointer minus the subject's document position) is captured once.
//! 2) The subject is taken out of flow, appended to the body, raised, and faded.
//! 3) The subject is placed so its top-left sits at the pointer minus the grab offset.
//!
//! ## Move
//!
//! Repositioning is synchronous on every sample. Hit testing is debounced: each move cancels
//! the pending timer and schedules a new one, so at most one timer is pending and only the most
//! recent settled position is ever tested. When the timer fires, a positive hit becomes the
//! candidate. A miss follows [`MissPolicy`].
//!
//! ## Release (`Dragging` → `Idle`)
//!
//! 1) The pending timer is cancelled before anything else, so a late hit test cannot touch a
//!    finished gesture.
//! 2) Drag styles are reset: opaque, relative, no offset, no stacking override.
//! 3) With a candidate, the subject is appended to it and a [`DropNotification`] is published.
//! 4) The candidate is cleared whether or not a drop happened.
//!
//! [`DragSession::cancel`] runs the same teardown without step 3.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Vec2};

use crate::config::{DragConfig, MissPolicy};
use crate::geometry::document_position;
use crate::hit::find_drop_target;
use crate::hover::{HoverEvent, HoverTracker};
use crate::notify::{DropBus, DropNotification};
use crate::selector::selector_for;
use crate::types::{Host, PointerEvent, Position, Scheduler, StyleProperty, TimerId};

/// Coarse state of a [`DragSession`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress.
    Idle,
    /// Between press and release.
    Dragging,
}

/// Per-gesture data, created on press and dropped on release.
#[derive(Clone, Debug)]
struct Gesture {
    /// Pointer minus subject top-left at grab time, document space. Fixed for the gesture.
    offset: Vec2,
    /// Viewport position of the latest move, tested when the debounce timer fires.
    last_client: Point,
    pending: Option<TimerId>,
}

/// Drives press, move, and release for a single subject.
#[derive(Clone, Debug)]
pub struct DragSession<E> {
    subject: E,
    config: DragConfig,
    gesture: Option<Gesture>,
    hover: HoverTracker<E>,
}

impl<E: Copy + Eq + Debug + 'static> DragSession<E> {
    /// Create an idle session for `subject`.
    pub fn new(subject: E, config: DragConfig) -> Self {
        Self {
            subject,
            hover: HoverTracker::new(config.hover_marker),
            config,
            gesture: None,
        }
    }

    /// The dragged element.
    pub fn subject(&self) -> E {
        self.subject
    }

    /// Session parameters.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        if self.gesture.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    /// Returns true between press and release.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Current drop candidate.
    pub fn candidate(&self) -> Option<E> {
        self.hover.current()
    }

    /// Grab offset of the gesture in progress.
    pub fn grab_offset(&self) -> Option<Vec2> {
        self.gesture.as_ref().map(|g| g.offset)
    }

    /// Debounce timer awaiting expiry, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.gesture.as_ref().and_then(|g| g.pending)
    }

    /// Start a gesture. Returns false if one is already in progress.
    pub fn press<H>(&mut self, host: &mut H, event: &PointerEvent) -> bool
    where
        H: Host<Element = E> + ?Sized,
    {
        if self.gesture.is_some() {
            return false;
        }
        let offset = event.page - document_position(host, &self.subject);

        let subject = self.subject;
        host.set_style(&subject, StyleProperty::Position(Position::Absolute));
        let body = host.body();
        host.append_child(&body, &subject);
        host.set_style(&subject, StyleProperty::Offset(Some(event.page - offset)));
        host.set_style(&subject, StyleProperty::ZIndex(Some(self.config.drag_z_index)));
        host.set_style(&subject, StyleProperty::Opacity(self.config.drag_opacity));

        #[cfg(feature = "tracing")]
        tracing::debug!(subject = ?subject, offset = ?offset, "drag started");

        self.gesture = Some(Gesture {
            offset,
            last_client: event.client,
            pending: None,
        });
        true
    }

    /// Follow the pointer and reschedule the hit test. Returns false when idle.
    pub fn pointer_move<H, S>(&mut self, host: &mut H, timers: &mut S, event: &PointerEvent) -> bool
    where
        H: Host<Element = E> + ?Sized,
        S: Scheduler + ?Sized,
    {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        host.set_style(
            &self.subject,
            StyleProperty::Offset(Some(event.page - gesture.offset)),
        );
        if let Some(stale) = gesture.pending.take() {
            timers.cancel(stale);
        }
        gesture.pending = Some(timers.schedule(self.config.debounce));
        gesture.last_client = event.client;
        true
    }

    /// Run the debounced hit test if `timer` is the one currently pending.
    ///
    /// Returns the candidate transitions it applied; empty for stale timers, idle sessions,
    /// repeated hits on the current candidate, and misses under [`MissPolicy::KeepLast`].
    pub fn timer_fired<H>(&mut self, host: &mut H, timer: TimerId) -> Vec<HoverEvent<E>>
    where
        H: Host<Element = E> + ?Sized,
    {
        let Some(gesture) = self.gesture.as_mut() else {
            return Vec::new();
        };
        if gesture.pending != Some(timer) {
            #[cfg(feature = "tracing")]
            tracing::trace!(timer = ?timer, "ignoring superseded hit test");
            return Vec::new();
        }
        gesture.pending = None;
        let client = gesture.last_client;

        let transitions = match find_drop_target(host, client, &self.subject) {
            Some(target) => self.hover.set_candidate(host, target),
            None => match self.config.miss_policy {
                MissPolicy::KeepLast => Vec::new(),
                MissPolicy::ClearOnMiss => self.hover.clear(host),
            },
        };
        #[cfg(feature = "tracing")]
        if !transitions.is_empty() {
            tracing::debug!(candidate = ?self.hover.current(), "drop candidate changed");
        }
        transitions
    }

    /// End the gesture and commit the drop onto the current candidate, if any.
    ///
    /// Returns the published notification, or `None` when idle or when nothing was dropped.
    pub fn release<H, S>(
        &mut self,
        host: &mut H,
        timers: &mut S,
        bus: &DropBus<E>,
    ) -> Option<DropNotification<E>>
    where
        H: Host<Element = E> + ?Sized,
        S: Scheduler + ?Sized,
    {
        if !self.end_gesture(host, timers) {
            return None;
        }
        let notification = self.commit(host, bus);
        let _ = self.hover.clear(host);
        notification
    }

    /// End the gesture without dropping. Returns false when idle.
    pub fn cancel<H, S>(&mut self, host: &mut H, timers: &mut S) -> bool
    where
        H: Host<Element = E> + ?Sized,
        S: Scheduler + ?Sized,
    {
        if !self.end_gesture(host, timers) {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(subject = ?self.subject, "drag cancelled");
        let _ = self.hover.clear(host);
        true
    }

    fn end_gesture<H, S>(&mut self, host: &mut H, timers: &mut S) -> bool
    where
        H: Host<Element = E> + ?Sized,
        S: Scheduler + ?Sized,
    {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        if let Some(pending) = gesture.pending {
            timers.cancel(pending);
        }
        let subject = self.subject;
        host.set_style(&subject, StyleProperty::Opacity(1.0));
        host.set_style(&subject, StyleProperty::Position(Position::Relative));
        host.set_style(&subject, StyleProperty::Offset(None));
        host.set_style(&subject, StyleProperty::ZIndex(None));
        true
    }

    fn commit<H>(&mut self, host: &mut H, bus: &DropBus<E>) -> Option<DropNotification<E>>
    where
        H: Host<Element = E> + ?Sized,
    {
        let Some(target) = self.hover.current() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(subject = ?self.subject, "released without a drop target");
            return None;
        };
        if !host.is_alive(&target) {
            return None;
        }
        let target_selector = selector_for(host, &target);
        #[cfg(feature = "tracing")]
        tracing::info!(
            event = crate::config::DROPPED_EVENT,
            "move {} to {}",
            selector_for(host, &self.subject),
            target_selector
        );
        if !host.append_child(&target, &self.subject) {
            #[cfg(feature = "tracing")]
            tracing::warn!(target = ?target, "host refused to reparent the subject");
            return None;
        }
        let notification = DropNotification {
            subject: self.subject,
            target,
            target_selector,
        };
        bus.publish(&notification);
        Some(notification)
    }
}
