use std::time::{Duration, Instant};

pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_millis(800);

/// Drops a selection repeated within a short window, as produced by a
/// mouseup and a selectionchange firing for the same drag.
#[derive(Debug)]
pub struct SelectionGuard {
    window: Duration,
    last: Option<(String, Instant)>,
}

impl Default for SelectionGuard {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_WINDOW)
    }
}

impl SelectionGuard {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn signature(text: &str, context: &str) -> String {
        format!("{text}__{context}")
    }

    /// Whether a selection should be processed; admitted ones become the
    /// new reference
    pub fn admit(&mut self, signature: &str, now: Instant) -> bool {
        if let Some((previous, at)) = &self.last {
            if previous == signature && now.saturating_duration_since(*at) < self.window {
                return false;
            }
        }
        self.last = Some((signature.to_string(), now));
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_inside_window_are_dropped() {
        let mut guard = SelectionGuard::default();
        let t0 = Instant::now();
        let sig = SelectionGuard::signature("気に なる", "ctx");

        assert!(guard.admit(&sig, t0));
        assert!(!guard.admit(&sig, t0 + Duration::from_millis(300)));
        assert!(guard.admit(&sig, t0 + Duration::from_millis(900)));
    }

    #[test]
    fn different_selection_is_admitted() {
        let mut guard = SelectionGuard::default();
        let t0 = Instant::now();
        assert!(guard.admit("a__", t0));
        assert!(guard.admit("b__", t0));
        assert!(guard.admit("a__", t0));
        guard.reset();
        assert!(guard.admit("a__", t0));
    }
}
