// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned when attaching a subject.

/// Configuration errors raised by [`attach`](crate::draggable::attach).
///
/// These are reported before any listener or style is touched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// No subject was supplied.
    #[error("subject is not defined")]
    MissingSubject,
    /// The subject handle no longer refers to a live element.
    #[error("subject is not a live element")]
    StaleSubject,
}
