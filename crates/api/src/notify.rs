// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The notification port for exam schedule lifecycle events.
//!
//! Notifications are fire-and-forget: a failing sink never fails the
//! operation that triggered it. `dispatch` swallows sink errors and
//! logs them.

use tracing::{info, warn};

use slate_domain::ExamSlot;

/// Error raised by a notification sink.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying delivery channel rejected the notice.
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// The lifecycle event a notice describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An exam schedule was created.
    ExamCreated,
    /// An exam schedule was changed.
    ExamUpdated,
    /// An exam schedule was cancelled and removed.
    ExamCancelled,
}

impl NoticeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExamCreated => "exam_created",
            Self::ExamUpdated => "exam_updated",
            Self::ExamCancelled => "exam_cancelled",
        }
    }
}

/// A notification about an exam schedule lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The event kind.
    pub kind: NoticeKind,
    /// The exam slot the event concerns, as of the event.
    pub exam: ExamSlot,
    /// A human-readable message for the recipient.
    pub message: String,
}

/// A delivery channel for notices.
///
/// Implementations deliver to whatever medium they represent; the
/// services never depend on a concrete one.
pub trait NotificationSink {
    /// Delivers one notice.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; the caller logs and
    /// continues.
    fn deliver(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// A sink that writes notices to the log.
///
/// This is the default (and only bundled) implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn deliver(&self, notice: &Notice) -> Result<(), NotifyError> {
        info!(
            kind = notice.kind.as_str(),
            class = %notice.exam.class,
            section = %notice.exam.section,
            subject = %notice.exam.subject,
            exam_date = %notice.exam.exam_date,
            "{}",
            notice.message
        );
        Ok(())
    }
}

/// Dispatches a notice, logging (never propagating) delivery failures.
pub fn dispatch(sink: &dyn NotificationSink, notice: &Notice) {
    if let Err(e) = sink.deliver(notice) {
        warn!(
            kind = notice.kind.as_str(),
            "Failed to deliver notification: {e}"
        );
    }
}
