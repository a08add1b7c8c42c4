//! Selection and scroll state of the rendered lists.

use std::time::Duration;

/// A scrolled window over a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    offset: usize,
    per_view: usize,
}

impl ListWindow {
    pub const fn new(per_view: usize) -> Self {
        Self {
            offset: 0,
            per_view,
        }
    }

    /// Index of the first visible row.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Move the window by `delta` rows over a list of `len` rows.
    ///
    /// Only lists that fill the view scroll, and the window never leaves the
    /// list. Returns whether the offset changed.
    pub fn scroll(&mut self, delta: i32, len: usize) -> bool {
        if len < self.per_view || delta == 0 {
            return false;
        }
        let step = delta.unsigned_abs() as usize;
        let target = if delta < 0 {
            match self.offset.checked_sub(step) {
                Some(target) => target,
                None => return false,
            }
        } else {
            self.offset + step
        };
        if target + self.per_view > len {
            return false;
        }
        self.offset = target;
        true
    }

    /// Pull the window back in after the list shrank.
    pub const fn clamp(&mut self, len: usize) {
        let max = len.saturating_sub(self.per_view);
        if self.offset > max {
            self.offset = max;
        }
    }

    pub const fn reset(&mut self) {
        self.offset = 0;
    }
}

/// What a click on a result row means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// The row is now focused.
    Focused,
    /// Second click on the focused row within the double-click window.
    Activate,
    /// Second click came too late; the window restarted.
    Refocused,
}

/// Focused result row and its double-click timer.
#[derive(Debug, Clone, Copy)]
pub struct ResultFocus {
    index: Option<usize>,
    timer: Duration,
    delay: Duration,
}

impl ResultFocus {
    pub const fn new(delay: Duration) -> Self {
        Self {
            index: None,
            timer: Duration::ZERO,
            delay,
        }
    }

    pub const fn focused(&self) -> Option<usize> {
        self.index
    }

    /// Advance the double-click timer.
    pub fn tick(&mut self, dt: Duration) {
        if self.index.is_some() && self.timer < self.delay {
            self.timer = self.timer.saturating_add(dt);
        }
    }

    /// Handle a click on row `index`.
    pub fn click(&mut self, index: usize) -> ClickAction {
        if self.index != Some(index) {
            self.index = Some(index);
            self.timer = Duration::ZERO;
            return ClickAction::Focused;
        }
        if self.timer >= self.delay {
            self.timer = Duration::ZERO;
            ClickAction::Refocused
        } else {
            ClickAction::Activate
        }
    }

    /// Focus `index` without arming the double-click window.
    pub const fn focus_expired(&mut self, index: usize) {
        self.index = Some(index);
        self.timer = self.delay;
    }

    pub const fn clear(&mut self) {
        self.index = None;
        self.timer = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_bounds() {
        let mut window = ListWindow::new(3);

        assert!(!window.scroll(-1, 10));
        assert!(window.scroll(1, 10));
        assert_eq!(window.offset(), 1);

        for _ in 0..10 {
            window.scroll(1, 10);
        }
        assert_eq!(window.offset(), 7);
        assert!(!window.scroll(1, 10));
    }

    #[test]
    fn test_short_list_does_not_scroll() {
        let mut window = ListWindow::new(8);
        assert!(!window.scroll(1, 5));
        assert_eq!(window.offset(), 0);

        // Exactly full: nothing to scroll to.
        assert!(!window.scroll(1, 8));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut window = ListWindow::new(3);
        window.scroll(1, 6);
        window.scroll(1, 6);
        window.scroll(1, 6);
        assert_eq!(window.offset(), 3);

        window.clamp(4);
        assert_eq!(window.offset(), 1);
        window.clamp(2);
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_double_click_within_window() {
        let mut focus = ResultFocus::new(Duration::from_millis(250));

        assert_eq!(focus.click(2), ClickAction::Focused);
        focus.tick(Duration::from_millis(100));
        assert_eq!(focus.click(2), ClickAction::Activate);
    }

    #[test]
    fn test_slow_second_click_restarts_window() {
        let mut focus = ResultFocus::new(Duration::from_millis(250));

        focus.click(0);
        focus.tick(Duration::from_millis(300));
        assert_eq!(focus.click(0), ClickAction::Refocused);
        focus.tick(Duration::from_millis(50));
        assert_eq!(focus.click(0), ClickAction::Activate);
    }

    #[test]
    fn test_clicking_other_row_moves_focus() {
        let mut focus = ResultFocus::new(Duration::from_millis(250));

        focus.click(0);
        assert_eq!(focus.click(1), ClickAction::Focused);
        assert_eq!(focus.focused(), Some(1));
    }

    #[test]
    fn test_expired_focus_needs_two_more_clicks() {
        let mut focus = ResultFocus::new(Duration::from_millis(250));

        focus.focus_expired(4);
        assert_eq!(focus.click(4), ClickAction::Refocused);
        assert_eq!(focus.click(4), ClickAction::Activate);

        focus.clear();
        assert_eq!(focus.focused(), None);
    }
}
