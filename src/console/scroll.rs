//! Following new output.
//!
//! A new-output signal queues a scroll request that is applied on the next
//! render pass, once the row for the record exists. Only the latest request
//! survives until then.

use super::selection::Selector;
use crate::model::OutputRecord;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollFollower {
    last_scrolled: Option<Uuid>,
    pending: Option<Uuid>,
}

impl ScrollFollower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_scrolled(&self) -> Option<Uuid> {
        self.last_scrolled
    }

    pub fn pending(&self) -> Option<Uuid> {
        self.pending
    }

    /// React to a new-output signal. Returns whether a scroll was requested.
    ///
    /// With a record, output of a task other than the selected one is ignored.
    /// Without one, the last scrolled-to record is requested again.
    pub fn on_new_output(&mut self, record: Option<&OutputRecord>, selector: Selector) -> bool {
        match record {
            Some(record) => {
                if let Selector::SingleTask(task_id) = selector {
                    if task_id != record.task_id {
                        return false;
                    }
                }
                self.pending = Some(record.id);
                self.last_scrolled = Some(record.id);
                true
            }
            None => match self.last_scrolled {
                Some(id) => {
                    self.pending = Some(id);
                    true
                }
                None => false,
            },
        }
    }

    /// Take the queued request, if any.
    pub fn take_pending(&mut self) -> Option<Uuid> {
        self.pending.take()
    }

    /// Forget everything, e.g. after the visible output was cleared.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_scrolled = None;
    }
}

/// Scroll position of the output list.
///
/// The offset is the index of the first item shown. Items can span several
/// terminal rows, so paging and jumping to the end take the row height of
/// every item in the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
}

impl Viewport {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Rows available to the list.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Put item `index` at the top of the viewport.
    pub fn anchor_top(&mut self, index: usize) {
        self.offset = index;
    }

    pub fn scroll_up(&mut self, items: usize) {
        self.offset = self.offset.saturating_sub(items);
    }

    pub fn scroll_down(&mut self, items: usize, len: usize) {
        self.offset = (self.offset + items).min(len.saturating_sub(1));
    }

    /// Move back by one screen of rows, at least one item.
    pub fn page_up(&mut self, heights: &[usize]) {
        let start = self.offset.min(heights.len());
        let mut first = start;
        let mut used = 0;
        while first > 0 && used + heights[first - 1] <= self.height {
            used += heights[first - 1];
            first -= 1;
        }
        self.offset = if first == start {
            start.saturating_sub(1)
        } else {
            first
        };
    }

    /// Move to the first item not fully shown, at least one item further.
    pub fn page_down(&mut self, heights: &[usize]) {
        let mut next = self.offset;
        let mut used = 0;
        while next < heights.len() && used + heights[next] <= self.height {
            used += heights[next];
            next += 1;
        }
        self.offset = next
            .max(self.offset + 1)
            .min(heights.len().saturating_sub(1));
    }

    pub fn home(&mut self) {
        self.offset = 0;
    }

    /// Show as many trailing items as fit. The last item is always shown.
    pub fn end(&mut self, heights: &[usize]) {
        let Some(last) = heights.len().checked_sub(1) else {
            self.offset = 0;
            return;
        };
        let mut first = last;
        let mut used = heights[last];
        while first > 0 && used + heights[first - 1] <= self.height {
            used += heights[first - 1];
            first -= 1;
        }
        self.offset = first;
    }

    /// Keep the offset on an existing item after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.offset = self.offset.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(task_id: Uuid) -> OutputRecord {
        OutputRecord::new(Uuid::new_v4(), task_id, "line")
    }

    #[test]
    fn test_new_output_in_all_tasks_is_followed() {
        let mut follower = ScrollFollower::new();
        let r = record(Uuid::new_v4());

        assert!(follower.on_new_output(Some(&r), Selector::AllTasks));
        assert_eq!(follower.pending(), Some(r.id));
        assert_eq!(follower.last_scrolled(), Some(r.id));
    }

    #[test]
    fn test_output_of_other_task_is_suppressed() {
        let (t1, t2) = (Uuid::new_v4(), Uuid::new_v4());
        let mut follower = ScrollFollower::new();
        let r = record(t2);

        assert!(!follower.on_new_output(Some(&r), Selector::SingleTask(t1)));
        assert_eq!(follower.pending(), None);
        assert_eq!(follower.last_scrolled(), None);
    }

    #[test]
    fn test_output_of_selected_task_is_followed() {
        let t1 = Uuid::new_v4();
        let mut follower = ScrollFollower::new();
        let r = record(t1);

        assert!(follower.on_new_output(Some(&r), Selector::SingleTask(t1)));
        assert_eq!(follower.take_pending(), Some(r.id));
        assert_eq!(follower.take_pending(), None);
    }

    #[test]
    fn test_ping_without_record_rescrolls_to_last() {
        let mut follower = ScrollFollower::new();
        assert!(!follower.on_new_output(None, Selector::AllTasks));

        let r = record(Uuid::new_v4());
        follower.on_new_output(Some(&r), Selector::AllTasks);
        follower.take_pending();

        assert!(follower.on_new_output(None, Selector::AllTasks));
        assert_eq!(follower.pending(), Some(r.id));
    }

    #[test]
    fn test_last_request_wins() {
        let mut follower = ScrollFollower::new();
        let (a, b) = (record(Uuid::new_v4()), record(Uuid::new_v4()));
        follower.on_new_output(Some(&a), Selector::AllTasks);
        follower.on_new_output(Some(&b), Selector::AllTasks);

        assert_eq!(follower.take_pending(), Some(b.id));
    }

    #[test]
    fn test_reset_forgets_last_record() {
        let mut follower = ScrollFollower::new();
        let r = record(Uuid::new_v4());
        follower.on_new_output(Some(&r), Selector::AllTasks);
        follower.reset();

        assert!(!follower.on_new_output(None, Selector::AllTasks));
    }

    #[test]
    fn test_viewport_navigation() {
        let heights = vec![1; 25];
        let mut viewport = Viewport::default();
        viewport.set_height(10);

        viewport.scroll_down(3, 25);
        assert_eq!(viewport.offset(), 3);
        viewport.page_down(&heights);
        assert_eq!(viewport.offset(), 13);
        viewport.page_down(&heights);
        assert_eq!(viewport.offset(), 23);
        viewport.scroll_down(5, 25);
        assert_eq!(viewport.offset(), 24);
        viewport.end(&heights);
        assert_eq!(viewport.offset(), 15);
        viewport.page_up(&heights);
        assert_eq!(viewport.offset(), 5);
        viewport.scroll_up(10);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_viewport_pages_by_rows_for_multiline_items() {
        // Ten items of two rows each in a four-row viewport
        let heights = vec![2; 10];
        let mut viewport = Viewport::default();
        viewport.set_height(4);

        viewport.end(&heights);
        assert_eq!(viewport.offset(), 8);
        viewport.page_up(&heights);
        assert_eq!(viewport.offset(), 6);
        viewport.home();
        viewport.page_down(&heights);
        assert_eq!(viewport.offset(), 2);
    }

    #[test]
    fn test_viewport_item_taller_than_screen() {
        let heights = vec![1, 6, 1];
        let mut viewport = Viewport::default();
        viewport.set_height(4);

        viewport.end(&heights);
        assert_eq!(viewport.offset(), 2);
        viewport.page_up(&heights);
        assert_eq!(viewport.offset(), 1);
        viewport.page_up(&heights);
        assert_eq!(viewport.offset(), 0);
        viewport.page_down(&heights);
        assert_eq!(viewport.offset(), 1);
        viewport.page_down(&heights);
        assert_eq!(viewport.offset(), 2);

        viewport.end(&[]);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_viewport_clamp_after_shrink() {
        let mut viewport = Viewport::default();
        viewport.anchor_top(20);
        viewport.clamp(5);
        assert_eq!(viewport.offset(), 4);
        viewport.clamp(0);
        assert_eq!(viewport.offset(), 0);
    }
}
