use shared::pagination::{PageInfo, PageRequest};

/// Requested page plus the totals the server last reported for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pager {
    request: PageRequest,
    info: Option<PageInfo>,
}

impl Pager {
    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn info(&self) -> Option<PageInfo> {
        self.info
    }

    pub fn set_info(&mut self, info: PageInfo) {
        self.info = Some(info);
    }

    fn total_pages(&self) -> u32 {
        self.info.map(|info| info.total_pages).unwrap_or(1).max(1)
    }

    /// Controls are hidden for a single page of results.
    pub fn is_visible(&self) -> bool {
        self.info.is_some_and(|info| info.total_pages > 1)
    }

    pub fn can_go_previous(&self) -> bool {
        self.request.page() > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.request.page() < self.total_pages()
    }

    pub fn next(&mut self) -> Option<PageRequest> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to(self.request.page() + 1)
    }

    pub fn previous(&mut self) -> Option<PageRequest> {
        if !self.can_go_previous() {
            return None;
        }
        self.go_to(self.request.page() - 1)
    }

    /// Moves to `page` when it lies inside the reported bounds.
    pub fn go_to(&mut self, page: u32) -> Option<PageRequest> {
        if page < 1 || page > self.total_pages() || page == self.request.page() {
            return None;
        }
        self.request = self.request.with_page(page).ok()?;
        Some(self.request)
    }

    /// After a delete shrinks the result set, the requested page may no
    /// longer exist; step back to the last one the server reports.
    pub fn clamp_to_info(&mut self) -> Option<PageRequest> {
        let info = self.info?;
        if info.total_pages >= 1 && self.request.page() > info.total_pages {
            self.request = self.request.with_page(info.total_pages).ok()?;
            return Some(self.request);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(total: u64, total_pages: u32, current_page: u32) -> PageInfo {
        PageInfo {
            total,
            total_pages,
            current_page,
        }
    }

    #[test]
    fn navigation_stays_within_reported_pages() {
        let mut pager = Pager::default();
        pager.set_info(info(23, 3, 1));
        assert!(pager.is_visible());

        assert_eq!(pager.next().map(|r| r.page()), Some(2));
        assert_eq!(pager.next().map(|r| r.page()), Some(3));
        assert_eq!(pager.next(), None);
        assert_eq!(pager.previous().map(|r| r.page()), Some(2));
        assert_eq!(pager.request().page(), 2);
        assert_eq!(pager.request().limit(), 10);

        assert_eq!(pager.previous().map(|r| r.page()), Some(1));
        assert_eq!(pager.previous(), None);
        assert_eq!(pager.request().page(), 1);
    }

    #[test]
    fn single_page_hides_controls() {
        let mut pager = Pager::default();
        assert!(!pager.is_visible());
        pager.set_info(info(4, 1, 1));
        assert!(!pager.is_visible());
        assert_eq!(pager.next(), None);
    }

    #[test]
    fn clamps_after_result_set_shrinks() {
        let mut pager = Pager::default();
        pager.set_info(info(21, 3, 1));
        pager.go_to(3);
        pager.set_info(info(20, 2, 3));
        assert_eq!(pager.clamp_to_info().map(|r| r.page()), Some(2));
        assert_eq!(pager.clamp_to_info(), None);
    }
}
