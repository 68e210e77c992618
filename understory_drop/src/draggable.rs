// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Making an element draggable.
//!
//! ## Usage
//!
//! 1) Call [`attach`] with the host and the element to make draggable.
//! 2) Route the host's pointer input to [`Draggable::pointer_down`], [`Draggable::pointer_move`],
//!    and [`Draggable::pointer_up`], and timer expiry to [`Draggable::timer_fired`].
//! 3) Observe committed drops with [`Draggable::subscribe_on_dropped`].
//! 4) Call [`Draggable::detach_listening`] to stop accepting new gestures.
//!
//! Press and release are only honored when their target is the subject or inside it. Moves are
//! forwarded unconditionally, since the pointer routinely leaves the subject mid-gesture.
//!
//! Several draggables may share one [`DropBus`] through [`attach_with_bus`], so a drop container
//! can listen once for every subject dropped onto it.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::DragConfig;
use crate::error::DragError;
use crate::hover::HoverEvent;
use crate::notify::{DropBus, DropNotification, SubscriptionId};
use crate::session::{DragSession, DragState};
use crate::types::{Host, PointerEvent, Scheduler, TimerId};

/// Make `subject` draggable with a private notification bus.
///
/// Fails with [`DragError::MissingSubject`] when `subject` is `None` and with
/// [`DragError::StaleSubject`] when it no longer refers to a live element. Nothing is written
/// to the host on failure.
pub fn attach<H>(
    host: &mut H,
    subject: Option<H::Element>,
    config: DragConfig,
) -> Result<Draggable<H::Element>, DragError>
where
    H: Host + ?Sized,
{
    attach_with_bus(host, subject, config, Rc::new(DropBus::new()))
}

/// Make `subject` draggable, publishing drops on `bus`.
pub fn attach_with_bus<H>(
    host: &mut H,
    subject: Option<H::Element>,
    config: DragConfig,
    bus: Rc<DropBus<H::Element>>,
) -> Result<Draggable<H::Element>, DragError>
where
    H: Host + ?Sized,
{
    let subject = subject.ok_or(DragError::MissingSubject)?;
    if !host.is_alive(&subject) {
        return Err(DragError::StaleSubject);
    }
    host.set_native_drag(&subject, false);

    #[cfg(feature = "tracing")]
    tracing::debug!(subject = ?subject, "draggable attached");

    Ok(Draggable {
        session: DragSession::new(subject, config),
        listening: true,
        bus,
    })
}

/// A draggable element: its session, its listening flag, and the bus its drops go to.
#[derive(Debug)]
pub struct Draggable<E> {
    session: DragSession<E>,
    listening: bool,
    bus: Rc<DropBus<E>>,
}

impl<E: Copy + Eq + Debug + 'static> Draggable<E> {
    /// The dragged element.
    pub fn subject(&self) -> E {
        self.session.subject()
    }

    /// The underlying state machine.
    pub fn session(&self) -> &DragSession<E> {
        &self.session
    }

    /// Current gesture state.
    pub fn state(&self) -> DragState {
        self.session.state()
    }

    /// Returns true between an accepted press and the following release.
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// Current drop candidate.
    pub fn candidate(&self) -> Option<E> {
        self.session.candidate()
    }

    /// Returns false once [`detach_listening`](Self::detach_listening) has been called.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// The bus drops are published on.
    pub fn bus(&self) -> &Rc<DropBus<E>> {
        &self.bus
    }

    /// Stop accepting new presses. Idempotent.
    ///
    /// A gesture already in progress runs to completion. Native drag stays suppressed.
    pub fn detach_listening(&mut self) {
        #[cfg(feature = "tracing")]
        if self.listening {
            tracing::debug!(subject = ?self.session.subject(), "draggable detached");
        }
        self.listening = false;
    }

    /// Register `callback` for drops involving the subject.
    ///
    /// It runs when this subject is dropped, and when another subject sharing the bus is dropped
    /// onto this one.
    pub fn subscribe_on_dropped(
        &self,
        callback: impl FnMut(&DropNotification<E>) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(self.session.subject(), callback)
    }

    /// Handle a press on `target`. Returns true if a gesture started.
    pub fn pointer_down<H>(&mut self, host: &mut H, target: &E, event: &PointerEvent) -> bool
    where
        H: Host<Element = E> + ?Sized,
    {
        if !self.listening || !host.contains(&self.session.subject(), target) {
            return false;
        }
        self.session.press(host, event)
    }

    /// Handle pointer motion. Returns true if the subject followed it.
    pub fn pointer_move<H, S>(&mut self, host: &mut H, timers: &mut S, event: &PointerEvent) -> bool
    where
        H: Host<Element = E> + ?Sized,
        S: Scheduler + ?Sized,
    {
        self.session.pointer_move(host, timers, event)
    }

    /// Handle a release on `target`, committing the drop if there is a candidate.
    ///
    /// Returns the published notification, if any.
    pub fn pointer_up<H, S>(
        &mut self,
        host: &mut H,
        timers: &mut S,
        target: &E,
    ) -> Option<DropNotification<E>>
    where
        H: Host<Element = E> + ?Sized,
        S: Scheduler + ?Sized,
    {
        if !host.contains(&self.session.subject(), target) {
            return None;
        }
        self.session.release(host, timers, &self.bus)
    }

    /// Abort the gesture in progress without dropping. Returns false when idle.
    pub fn pointer_cancel<H, S>(&mut self, host: &mut H, timers: &mut S) -> bool
    where
        H: Host<Element = E> + ?Sized,
        S: Scheduler + ?Sized,
    {
        self.session.cancel(host, timers)
    }

    /// Forward a timer expiry. Ids this draggable did not schedule are ignored.
    pub fn timer_fired<H>(&mut self, host: &mut H, timer: TimerId) -> Vec<HoverEvent<E>>
    where
        H: Host<Element = E> + ?Sized,
    {
        self.session.timer_fired(host, timer)
    }
}
