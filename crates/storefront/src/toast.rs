//! Transient notifications.
//!
//! There is one toast region per page. Showing a message replaces whatever
//! is displayed and restarts the dismissal countdown; messages never queue.

use std::time::Duration;

use crate::page::Element;
use crate::timer::{TimerId, TimerQueue};

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
}

impl ToastKind {
    /// Modifier class, if any.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Success => Some("success"),
        }
    }
}

/// Toast state: the pending dismissal, if one is scheduled.
#[derive(Debug, Default)]
pub struct Toast {
    pending: Option<TimerId>,
}

impl Toast {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Display `message` and schedule `on_dismiss` after `duration`,
    /// superseding any earlier dismissal.
    pub fn show<T>(
        &mut self,
        region: &mut Element,
        timers: &mut TimerQueue<T>,
        message: &str,
        kind: ToastKind,
        duration: Duration,
        on_dismiss: T,
    ) {
        region.set_text(message);
        region.set_class_name("toast show");
        if let Some(class) = kind.class() {
            region.add_class(class);
        }

        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        self.pending = Some(timers.schedule(duration, on_dismiss));
    }

    /// Hide the region. Called when the dismissal fires.
    pub fn dismiss(&mut self, region: &mut Element) {
        self.pending = None;
        region.set_class_name("toast");
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_show_then_dismiss() {
        let mut region = Element::with_classes("toast");
        let mut timers = TimerQueue::new();
        let mut toast = Toast::new();

        toast.show(&mut region, &mut timers, "Saved", ToastKind::Success, MS * 2500, ());
        assert_eq!(region.text(), "Saved");
        assert!(region.has_class("show"));
        assert!(region.has_class("success"));

        assert!(timers.advance(MS * 2499).is_empty());
        assert_eq!(timers.advance(MS).len(), 1);
        toast.dismiss(&mut region);
        assert_eq!(region.class_name(), "toast");
        assert!(!toast.is_pending());
    }

    #[test]
    fn test_new_message_supersedes_pending_dismissal() {
        let mut region = Element::with_classes("toast");
        let mut timers = TimerQueue::new();
        let mut toast = Toast::new();

        toast.show(&mut region, &mut timers, "First", ToastKind::Success, MS * 2500, 1);
        timers.advance(MS * 2000);
        toast.show(&mut region, &mut timers, "Second", ToastKind::Info, MS * 2500, 2);

        assert_eq!(timers.len(), 1);
        assert!(!region.has_class("success"));
        assert!(timers.advance(MS * 2000).is_empty());
        assert_eq!(timers.advance(MS * 500), vec![2]);
        assert_eq!(region.text(), "Second");
    }
}
