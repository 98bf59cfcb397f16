//! Inferring the focused page from the scroll position, and keeping that
//! inference from fighting a jump the user just asked for.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    /// A jump is settling; viewport updates are ignored until `until`.
    ProgrammaticScroll { until: Instant },
}

#[derive(Debug, Clone)]
pub struct ScrollSync {
    phase: SyncPhase,
    window: Duration,
}

impl ScrollSync {
    pub fn new(window: Duration) -> Self {
        Self {
            phase: SyncPhase::Idle,
            window,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Starts a suppression window, replacing any window still pending.
    pub fn begin(&mut self, now: Instant) {
        self.phase = SyncPhase::ProgrammaticScroll {
            until: now + self.window,
        };
    }

    pub fn cancel(&mut self) {
        self.phase = SyncPhase::Idle;
    }

    pub fn is_suppressed(&mut self, now: Instant) -> bool {
        match self.phase {
            SyncPhase::ProgrammaticScroll { until, .. } if now < until => true,
            SyncPhase::ProgrammaticScroll { .. } => {
                self.phase = SyncPhase::Idle;
                false
            }
            SyncPhase::Idle => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageVisibility {
    pub index: usize,
    pub ratio: f32,
}

/// Most visible page whose ratio reaches `threshold`; ties go to the earlier
/// page.
pub fn infer_focused_page(visible: &[PageVisibility], threshold: f32) -> Option<usize> {
    let mut best: Option<PageVisibility> = None;
    for v in visible.iter().filter(|v| v.ratio >= threshold) {
        match best {
            Some(b) if b.ratio > v.ratio || (b.ratio == v.ratio && b.index <= v.index) => {}
            _ => best = Some(*v),
        }
    }
    best.map(|b| b.index)
}

/// Vertical strip of equally tall pages, measured in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollLayout {
    pub page_count: usize,
    pub page_rows: u16,
    pub gap_rows: u16,
    pub viewport_rows: u16,
}

impl ScrollLayout {
    pub fn new(page_count: usize, viewport_rows: u16, zoom: f32, gap_rows: u16) -> Self {
        let scaled = (f32::from(viewport_rows) * zoom).round();
        let page_rows = if scaled.is_finite() {
            scaled.clamp(1.0, f32::from(u16::MAX)) as u16
        } else {
            viewport_rows.max(1)
        };
        Self {
            page_count,
            page_rows,
            gap_rows,
            viewport_rows,
        }
    }

    fn stride(&self) -> usize {
        usize::from(self.page_rows) + usize::from(self.gap_rows)
    }

    pub fn page_offset(&self, index: usize) -> usize {
        index * self.stride()
    }

    pub fn total_rows(&self) -> usize {
        if self.page_count == 0 {
            return 0;
        }
        self.page_count * self.stride() - usize::from(self.gap_rows)
    }

    pub fn max_offset(&self) -> usize {
        self.total_rows()
            .saturating_sub(usize::from(self.viewport_rows))
    }

    /// Offset that centres page `index` in the viewport.
    pub fn offset_for_page(&self, index: usize) -> usize {
        let top = self.page_offset(index.min(self.page_count.saturating_sub(1)));
        let page = usize::from(self.page_rows);
        let view = usize::from(self.viewport_rows);
        let centred = if page >= view {
            top
        } else {
            top.saturating_sub((view - page) / 2)
        };
        centred.min(self.max_offset())
    }

    /// Intersection of each page with the viewport starting at `offset`.
    /// A page filling the whole viewport counts as fully visible even when it
    /// is taller than the viewport.
    pub fn visibility(&self, offset: usize) -> Vec<PageVisibility> {
        let view_top = offset;
        let view_bottom = offset + usize::from(self.viewport_rows);
        let page = usize::from(self.page_rows);
        let view = usize::from(self.viewport_rows).max(1);
        let mut out = Vec::new();
        if page == 0 || self.page_count == 0 {
            return out;
        }
        let first = view_top / self.stride();
        for index in first..self.page_count {
            let top = self.page_offset(index);
            if top >= view_bottom {
                break;
            }
            let bottom = top + page;
            let visible = bottom.min(view_bottom).saturating_sub(top.max(view_top));
            if visible == 0 {
                continue;
            }
            let of_page = visible as f32 / page as f32;
            let of_view = visible as f32 / view as f32;
            out.push(PageVisibility {
                index,
                ratio: of_page.max(of_view).min(1.0),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppression_expires_after_window() {
        let start = Instant::now();
        let mut sync = ScrollSync::new(Duration::from_millis(1000));
        sync.begin(start);
        assert!(sync.is_suppressed(start + Duration::from_millis(999)));
        assert!(!sync.is_suppressed(start + Duration::from_millis(1000)));
        assert_eq!(sync.phase(), SyncPhase::Idle);
    }

    #[test]
    fn new_jump_restarts_window() {
        let start = Instant::now();
        let mut sync = ScrollSync::new(Duration::from_millis(1000));
        sync.begin(start);
        sync.begin(start + Duration::from_millis(800));
        assert!(sync.is_suppressed(start + Duration::from_millis(1500)));
        match sync.phase() {
            SyncPhase::ProgrammaticScroll { until } => {
                assert_eq!(until, start + Duration::from_millis(1800))
            }
            SyncPhase::Idle => panic!("expected in-flight scroll"),
        }
        sync.cancel();
        assert!(!sync.is_suppressed(start + Duration::from_millis(1500)));
    }

    #[test]
    fn highest_ratio_above_threshold_wins() {
        let vis = [
            PageVisibility { index: 0, ratio: 0.2 },
            PageVisibility { index: 1, ratio: 0.85 },
            PageVisibility { index: 2, ratio: 0.95 },
        ];
        assert_eq!(infer_focused_page(&vis, 0.8), Some(2));
        assert_eq!(infer_focused_page(&vis[..2], 0.9), None);
    }

    #[test]
    fn equal_ratios_prefer_earlier_page() {
        let vis = [
            PageVisibility { index: 4, ratio: 1.0 },
            PageVisibility { index: 5, ratio: 1.0 },
        ];
        assert_eq!(infer_focused_page(&vis, 0.8), Some(4));
    }

    #[test]
    fn layout_scales_pages_with_zoom() {
        let layout = ScrollLayout::new(3, 20, 0.5, 1);
        assert_eq!(layout.page_rows, 10);
        assert_eq!(layout.page_offset(2), 22);
        assert_eq!(layout.total_rows(), 32);
        assert_eq!(layout.max_offset(), 12);
    }

    #[test]
    fn visibility_reports_partial_pages() {
        let layout = ScrollLayout::new(3, 20, 0.5, 1);
        let vis = layout.visibility(0);
        assert_eq!(vis.len(), 2);
        assert_eq!(vis[0], PageVisibility { index: 0, ratio: 1.0 });
        assert_eq!(vis[1].index, 1);
        assert!((vis[1].ratio - 0.9).abs() < 1e-6);
    }

    #[test]
    fn tall_page_filling_viewport_counts_as_visible() {
        let layout = ScrollLayout::new(2, 10, 3.0, 1);
        let vis = layout.visibility(5);
        assert_eq!(vis, vec![PageVisibility { index: 0, ratio: 1.0 }]);
        assert_eq!(infer_focused_page(&vis, 0.8), Some(0));
    }

    #[test]
    fn jump_target_centres_small_pages() {
        let layout = ScrollLayout::new(5, 20, 0.5, 0);
        assert_eq!(layout.offset_for_page(2), 15);
        assert_eq!(layout.offset_for_page(0), 0);
        assert_eq!(layout.offset_for_page(4), layout.max_offset());
        let vis = layout.visibility(layout.offset_for_page(2));
        assert_eq!(infer_focused_page(&vis, 0.8), Some(2));
    }

    #[test]
    fn empty_layout_has_no_visibility() {
        let layout = ScrollLayout::new(0, 20, 1.0, 1);
        assert_eq!(layout.total_rows(), 0);
        assert!(layout.visibility(0).is_empty());
    }
}
