//! Page/offset arithmetic and navigation markup for one paginated view.
//!
//! A `Pager` reads its current page from the request, derives the offset and
//! page count from the page size and total item count, and renders links that
//! keep every other request parameter intact. Several pagers can share one
//! page as long as each uses its own parameter key.

use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

use common::utils::html::escape;
use configs::{PaginationConfig, DEFAULT_PAGER_KEY};
use serde::Serialize;

use crate::errors::PagerError;
use crate::links::{LinkBuilder, QueryLinks};
use crate::request::RequestContext;

/// Pages shown before the current one in `nav_range`.
const NAV_BEFORE: u64 = 5;
/// Maximum number of pages in `nav_range`.
const NAV_WIDTH: u64 = 10;

/// Limit/offset window for a backing query. A zero offset is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitOffset {
    pub limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl LimitOffset {
    pub fn offset_or_zero(&self) -> u64 { self.offset.unwrap_or(0) }
}

/// Serializable snapshot of a pager, for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_count: u64,
    pub page_count: u64,
    pub offset: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    First,
    Last,
    Previous,
    Next,
}

#[derive(Clone)]
pub struct Pager {
    page: u64,
    limit: u64,
    total_count: u64,
    key: String,
    request: RequestContext,
    links: Arc<dyn LinkBuilder>,
}

impl fmt::Debug for Pager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("page", &self.page)
            .field("limit", &self.limit)
            .field("total_count", &self.total_count)
            .field("key", &self.key)
            .field("path", &self.request.path())
            .finish()
    }
}

impl Pager {
    /// Create a pager for the current request.
    ///
    /// The page comes from `request.param(key)`; a missing, non-numeric or zero
    /// value means page 1. The page is not clamped to the page count.
    pub fn new(
        request: &RequestContext,
        limit: u64,
        total_count: u64,
        key: Option<&str>,
    ) -> Result<Self, PagerError> {
        if limit == 0 {
            return Err(PagerError::InvalidLimit(limit));
        }
        let key = key.unwrap_or(DEFAULT_PAGER_KEY).to_string();
        let page = parse_page(request.param(&key));
        Ok(Self {
            page,
            limit,
            total_count,
            key,
            request: request.clone(),
            links: Arc::new(QueryLinks),
        })
    }

    pub fn from_config(
        request: &RequestContext,
        config: &PaginationConfig,
        total_count: u64,
    ) -> Result<Self, PagerError> {
        Self::new(request, config.per_page, total_count, Some(config.key.as_str()))
    }

    /// Replace the link builder used by `target_uri` and the rendered navigation.
    pub fn with_links(mut self, links: Arc<dyn LinkBuilder>) -> Self {
        self.links = links;
        self
    }

    /// Update the total item count. Page count and offset follow automatically.
    pub fn set_count(&mut self, total_count: u64) {
        self.total_count = total_count;
    }

    pub fn page(&self) -> u64 { self.page }
    pub fn limit(&self) -> u64 { self.limit }
    pub fn total_count(&self) -> u64 { self.total_count }
    pub fn key(&self) -> &str { &self.key }

    pub fn page_count(&self) -> u64 {
        self.total_count.div_ceil(self.limit)
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn is_empty(&self) -> bool { self.page_count() < 1 }

    pub fn first_page(&self) -> u64 { 1 }
    pub fn last_page(&self) -> u64 { self.page_count() }
    pub fn is_first_page(&self) -> bool { self.page == 1 }
    pub fn is_last_page(&self) -> bool { self.page == self.page_count() }

    pub fn previous_page(&self) -> u64 {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> u64 {
        self.page.saturating_add(1).min(self.page_count())
    }

    /// Up to ten page numbers around the current page, within `1..=page_count`.
    pub fn nav_range(&self) -> RangeInclusive<u64> {
        let count = self.page_count();
        if count == 0 {
            return RangeInclusive::new(1, 0);
        }
        let page = self.page.clamp(1, count);
        let mut start = page.saturating_sub(NAV_BEFORE).max(1);
        let end = (start + NAV_WIDTH - 1).min(count);
        if end - start + 1 < NAV_WIDTH {
            start = end.saturating_sub(NAV_WIDTH - 1).max(1);
        }
        start..=end
    }

    /// 0-based, half-open index range of the items on the current page.
    pub fn page_range(&self) -> Range<u64> {
        let start = self.offset().min(self.total_count);
        let end = self.offset().saturating_add(self.limit).min(self.total_count);
        start..end
    }

    pub fn limit_clause(&self) -> LimitOffset {
        let offset = self.offset();
        LimitOffset { limit: self.limit, offset: (offset > 0).then_some(offset) }
    }

    pub fn has_navigation(&self) -> bool { self.page_count() > 1 }

    pub fn page_for(&self, link: PageLink) -> u64 {
        match link {
            PageLink::First => self.first_page(),
            PageLink::Last => self.last_page(),
            PageLink::Previous => self.previous_page(),
            PageLink::Next => self.next_page(),
        }
    }

    /// Link to `page` on the current action, keeping all other parameters.
    pub fn target_uri(&self, page: u64) -> String {
        let params = self.request.params_with(&self.key, &page.to_string());
        self.links.build(self.request.path(), &params)
    }

    pub fn link(&self, link: PageLink) -> String {
        self.target_uri(self.page_for(link))
    }

    pub fn first_page_uri(&self) -> String { self.link(PageLink::First) }
    pub fn last_page_uri(&self) -> String { self.link(PageLink::Last) }
    pub fn previous_page_uri(&self) -> String { self.link(PageLink::Previous) }
    pub fn next_page_uri(&self) -> String { self.link(PageLink::Next) }

    /// Render the navigation fragment.
    ///
    /// The `first`, `previous`, `last`, `next` and `active` class names are
    /// relied on by existing stylesheets.
    pub fn navigation(&self) -> String {
        let mut nav = String::new();
        if !self.is_first_page() {
            nav.push_str(&format!(
                r#"<div class="first"><a href="{}">First</a></div>"#,
                escape(&self.first_page_uri())
            ));
            nav.push_str(&format!(
                r#"<div class="previous"><a href="{}">Previous</a></div>"#,
                escape(&self.previous_page_uri())
            ));
        }
        if !self.is_last_page() {
            nav.push_str(&format!(
                r#"<div class="last"><a href="{}">Last</a></div>"#,
                escape(&self.last_page_uri())
            ));
            nav.push_str(&format!(
                r#"<div class="next"><a href="{}">Next</a></div>"#,
                escape(&self.next_page_uri())
            ));
        }
        nav.push_str("<ul>");
        for i in self.nav_range() {
            if i == self.page {
                nav.push_str(&format!(r#"<li class="active">{i}</li>"#));
            } else {
                nav.push_str(&format!(
                    r#"<li><a href="{}">{i}</a></li>"#,
                    escape(&self.target_uri(i))
                ));
            }
        }
        nav.push_str("</ul>");
        nav
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.page,
            per_page: self.limit,
            total_count: self.total_count,
            page_count: self.page_count(),
            offset: self.offset(),
            has_previous: self.page > 1,
            has_next: self.page < self.page_count(),
        }
    }
}

fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: Option<&str>) -> RequestContext {
        let params = page
            .map(|p| vec![("_page".to_string(), p.to_string())])
            .unwrap_or_default();
        RequestContext::new("/items", params)
    }

    fn pager(page: u64, limit: u64, total: u64) -> Pager {
        Pager::new(&request(Some(page.to_string().as_str())), limit, total, None).unwrap()
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = Pager::new(&request(None), 0, 10, None).unwrap_err();
        assert_eq!(err, PagerError::InvalidLimit(0));
    }

    #[test]
    fn page_count_is_ceiling_of_total_over_limit() {
        for limit in 1..=12u64 {
            for total in 0..=50u64 {
                let p = pager(1, limit, total);
                let expected = (total + limit - 1) / limit;
                assert_eq!(p.page_count(), expected, "limit={limit} total={total}");
            }
        }
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let p = pager(1, 10, 0);
        assert_eq!(p.page_count(), 0);
        assert!(p.is_empty());
        assert!(!p.has_navigation());
        assert_eq!(p.nav_range().count(), 0);
        assert_eq!(p.page_range(), 0..0);
    }

    #[test]
    fn missing_or_garbage_page_defaults_to_first() {
        for raw in [None, Some("abc"), Some(""), Some("0"), Some("-3"), Some("2.5")] {
            let p = Pager::new(&request(raw), 10, 95, None).unwrap();
            assert_eq!(p.page(), 1, "raw={raw:?}");
            assert_eq!(p.offset(), 0);
        }
    }

    #[test]
    fn custom_key_reads_its_own_parameter() {
        let req = RequestContext::new(
            "/dash",
            vec![("_page".into(), "4".into()), ("comments".into(), "2".into())],
        );
        let posts = Pager::new(&req, 10, 100, None).unwrap();
        let comments = Pager::new(&req, 10, 100, Some("comments")).unwrap();
        assert_eq!(posts.page(), 4);
        assert_eq!(comments.page(), 2);
        assert_eq!(comments.key(), "comments");
    }

    #[test]
    fn from_config_uses_configured_size_and_key() {
        let cfg = PaginationConfig { per_page: 25, key: "p".into() };
        let req = RequestContext::new("/x", vec![("p".into(), "3".into())]);
        let p = Pager::from_config(&req, &cfg, 100).unwrap();
        assert_eq!(p.limit(), 25);
        assert_eq!(p.page(), 3);
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn first_page_of_ninety_five() {
        let p = pager(1, 10, 95);
        assert_eq!(p.page_count(), 10);
        assert_eq!(p.offset(), 0);
        assert!(p.is_first_page());
        assert!(!p.is_last_page());
        assert_eq!(p.previous_page(), 1);
        assert_eq!(p.next_page(), 2);
        assert_eq!(p.page_range(), 0..10);
    }

    #[test]
    fn last_page_of_ninety_five() {
        let p = pager(10, 10, 95);
        assert!(p.is_last_page());
        assert_eq!(p.next_page(), 10);
        assert_eq!(p.offset(), 90);
        assert_eq!(p.page_range(), 90..95);
    }

    #[test]
    fn first_and_last_flags_follow_page() {
        for page in 1..=12u64 {
            let p = pager(page, 10, 95);
            assert_eq!(p.is_first_page(), page == 1);
            assert_eq!(p.is_last_page(), page == 10);
        }
    }

    #[test]
    fn previous_and_next_stay_in_bounds() {
        for total in [1u64, 9, 10, 11, 95, 300] {
            for page in 1..=35u64 {
                let p = pager(page, 10, total);
                assert!(p.previous_page() >= 1);
                assert!(p.next_page() <= p.page_count());
            }
        }
    }

    #[test]
    fn nav_range_is_bounded_window() {
        for total in [1u64, 35, 95, 100, 1000] {
            for page in 1..=120u64 {
                let p = pager(page, 10, total);
                let range: Vec<u64> = p.nav_range().collect();
                assert!(range.len() <= 10, "page={page} total={total}");
                assert!(range.iter().all(|&i| i >= 1 && i <= p.page_count()));
                assert!(range.windows(2).all(|w| w[1] == w[0] + 1));
            }
        }
    }

    #[test]
    fn nav_range_centres_on_current_page() {
        assert_eq!(pager(1, 10, 1000).nav_range(), 1..=10);
        assert_eq!(pager(12, 10, 1000).nav_range(), 7..=16);
        assert_eq!(pager(100, 10, 1000).nav_range(), 91..=100);
        assert_eq!(pager(3, 10, 40).nav_range(), 1..=4);
    }

    #[test]
    fn out_of_range_page_is_kept_but_navigation_clamps() {
        let p = pager(50, 10, 95);
        assert_eq!(p.page(), 50);
        assert_eq!(p.offset(), 490);
        assert_eq!(p.next_page(), 10);
        assert_eq!(p.nav_range(), 1..=10);
        assert!(p.page_range().is_empty());
    }

    #[test]
    fn set_count_recomputes_derived_values() {
        let mut p = pager(3, 10, 95);
        p.set_count(21);
        assert_eq!(p.page_count(), 3);
        assert!(p.is_last_page());
        assert_eq!(p.offset(), 20);
        assert_eq!(p.page_range(), 20..21);
    }

    #[test]
    fn limit_clause_omits_zero_offset() {
        let first = serde_json::to_value(pager(1, 10, 95).limit_clause()).unwrap();
        assert_eq!(first, serde_json::json!({"limit": 10}));

        let third = pager(3, 10, 95).limit_clause();
        assert_eq!(third.offset, Some(20));
        let json = serde_json::to_value(third).unwrap();
        assert_eq!(json, serde_json::json!({"limit": 10, "offset": 20}));
    }

    #[test]
    fn target_uri_overrides_only_the_page_key() {
        let req = RequestContext::new(
            "/items",
            vec![("q".into(), "red".into()), ("_page".into(), "2".into())],
        );
        let p = Pager::new(&req, 10, 95, None).unwrap();
        assert_eq!(p.target_uri(5), "/items?q=red&_page=5");
        assert_eq!(p.first_page_uri(), "/items?q=red&_page=1");
        assert_eq!(p.previous_page_uri(), "/items?q=red&_page=1");
        assert_eq!(p.next_page_uri(), "/items?q=red&_page=3");
        assert_eq!(p.last_page_uri(), "/items?q=red&_page=10");
    }

    #[test]
    fn page_for_maps_each_link_kind() {
        let p = pager(4, 10, 95);
        assert_eq!(p.page_for(PageLink::First), 1);
        assert_eq!(p.page_for(PageLink::Previous), 3);
        assert_eq!(p.page_for(PageLink::Next), 5);
        assert_eq!(p.page_for(PageLink::Last), 10);
    }

    #[test]
    fn custom_link_builder_is_used() {
        let p = pager(2, 10, 30).with_links(Arc::new(crate::links::MountedLinks::new("/shop")));
        assert_eq!(p.target_uri(3), "/shop/items?_page=3");
    }

    #[test]
    fn navigation_on_first_page_omits_first_and_previous() {
        let nav = pager(1, 10, 35).navigation();
        assert!(!nav.contains(r#"class="first""#));
        assert!(!nav.contains(r#"class="previous""#));
        assert!(nav.contains(r#"<div class="last"><a href="/items?_page=4">Last</a></div>"#));
        assert!(nav.contains(r#"<div class="next"><a href="/items?_page=2">Next</a></div>"#));
        assert!(nav.contains(r#"<li class="active">1</li>"#));
        assert!(nav.contains(r#"<li><a href="/items?_page=4">4</a></li>"#));
        assert!(nav.starts_with("<div") && nav.ends_with("</ul>"));
    }

    #[test]
    fn navigation_on_last_page_omits_last_and_next() {
        let nav = pager(4, 10, 35).navigation();
        assert!(nav.contains(r#"<div class="first"><a href="/items?_page=1">First</a></div>"#));
        assert!(nav.contains(r#"<div class="previous"><a href="/items?_page=3">Previous</a></div>"#));
        assert!(!nav.contains(r#"class="last""#));
        assert!(!nav.contains(r#"class="next""#));
        assert!(nav.contains(r#"<li class="active">4</li>"#));
    }

    #[test]
    fn navigation_escapes_ampersands_in_links() {
        let req = RequestContext::new(
            "/items",
            vec![("q".into(), "a".into()), ("_page".into(), "1".into())],
        );
        let nav = Pager::new(&req, 10, 20, None).unwrap().navigation();
        assert!(nav.contains(r#"href="/items?q=a&amp;_page=2""#));
    }

    #[test]
    fn has_navigation_needs_more_than_one_page() {
        assert!(!pager(1, 10, 10).has_navigation());
        assert!(pager(1, 10, 11).has_navigation());
    }

    #[test]
    fn meta_snapshot() {
        let meta = pager(2, 10, 25).meta();
        assert_eq!(
            meta,
            PageMeta {
                page: 2,
                per_page: 10,
                total_count: 25,
                page_count: 3,
                offset: 10,
                has_previous: true,
                has_next: true,
            }
        );
    }
}
