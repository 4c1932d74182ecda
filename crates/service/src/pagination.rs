//! Collection adapter: counts a source, builds a `Pager`, and fetches the
//! current page's window.
//!
//! Sources implement `PageSource`. In-memory vectors slice themselves, and
//! sea-orm selects are counted and then re-queried with a limit and offset.

use async_trait::async_trait;
use configs::PaginationConfig;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, Select};
use tracing::debug;

use crate::errors::PagerError;
use crate::pager::{LimitOffset, Pager};
use crate::request::RequestContext;

/// Per-call overrides; unset fields fall back to `PaginationConfig`.
#[derive(Debug, Clone, Default)]
pub struct PaginateOptions {
    pub limit: Option<u64>,
    pub pager_key: Option<String>,
}

impl PaginateOptions {
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn pager_key(mut self, key: impl Into<String>) -> Self {
        self.pager_key = Some(key.into());
        self
    }
}

/// A collection that knows its size and can produce one limit/offset window.
#[async_trait]
pub trait PageSource: Send {
    type Item: Send;

    async fn total_count(&self) -> Result<u64, PagerError>;

    async fn fetch(self, window: LimitOffset) -> Result<Vec<Self::Item>, PagerError>;
}

#[async_trait]
impl<T> PageSource for Vec<T>
where
    T: Send + Sync,
{
    type Item = T;

    async fn total_count(&self) -> Result<u64, PagerError> {
        Ok(self.len() as u64)
    }

    async fn fetch(self, window: LimitOffset) -> Result<Vec<T>, PagerError> {
        let (start, end) = slice_bounds(self.len(), window);
        Ok(self.into_iter().skip(start).take(end - start).collect())
    }
}

/// A sea-orm select bound to a connection. Filters and ordering already
/// applied to the select carry over to the page query.
pub struct QuerySource<'db, E: EntityTrait> {
    db: &'db DatabaseConnection,
    select: Select<E>,
}

impl<'db, E: EntityTrait> QuerySource<'db, E> {
    pub fn new(db: &'db DatabaseConnection, select: Select<E>) -> Self {
        Self { db, select }
    }
}

#[async_trait]
impl<'db, E> PageSource for QuerySource<'db, E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    type Item = E::Model;

    async fn total_count(&self) -> Result<u64, PagerError> {
        let total = self.select.clone().count(self.db).await?;
        Ok(total)
    }

    async fn fetch(self, window: LimitOffset) -> Result<Vec<E::Model>, PagerError> {
        let mut query = self.select.limit(window.limit);
        if let Some(offset) = window.offset {
            query = query.offset(offset);
        }
        let rows = query.all(self.db).await?;
        Ok(rows)
    }
}

/// One page of items together with the pager that produced it.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pager: Pager,
}

impl<T> Page<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Items paired with their 1-based position in the whole collection.
    pub fn iter_numbered(&self) -> impl Iterator<Item = (u64, &T)> + '_ {
        let offset = self.pager.offset();
        self.items
            .iter()
            .enumerate()
            .map(move |(i, item)| (offset + i as u64 + 1, item))
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn into_parts(self) -> (Vec<T>, Pager) {
        (self.items, self.pager)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn build_pager(
    request: &RequestContext,
    options: &PaginateOptions,
    config: &PaginationConfig,
    total: u64,
) -> Result<Pager, PagerError> {
    let limit = options.limit.unwrap_or(config.per_page);
    let key = options.pager_key.as_deref().unwrap_or(&config.key);
    let pager = Pager::new(request, limit, total, Some(key))?;
    debug!(
        key = pager.key(),
        page = pager.page(),
        limit = pager.limit(),
        total,
        page_count = pager.page_count(),
        "pager built"
    );
    Ok(pager)
}

/// Count `source`, build a pager for the current request, and fetch its page.
pub async fn paginate<S: PageSource>(
    source: S,
    request: &RequestContext,
    options: &PaginateOptions,
    config: &PaginationConfig,
) -> Result<Page<S::Item>, PagerError> {
    let total = source.total_count().await?;
    let pager = build_pager(request, options, config, total)?;
    let items = source.fetch(pager.limit_clause()).await?;
    Ok(Page { items, pager })
}

/// Synchronous variant for borrowed in-memory slices; clones the window.
pub fn paginate_slice<T: Clone>(
    items: &[T],
    request: &RequestContext,
    options: &PaginateOptions,
    config: &PaginationConfig,
) -> Result<Page<T>, PagerError> {
    let pager = build_pager(request, options, config, items.len() as u64)?;
    let (start, end) = slice_bounds(items.len(), pager.limit_clause());
    Ok(Page { items: items[start..end].to_vec(), pager })
}

fn slice_bounds(len: usize, window: LimitOffset) -> (usize, usize) {
    let start = usize::try_from(window.offset_or_zero()).unwrap_or(usize::MAX).min(len);
    let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
    let end = start.saturating_add(limit).min(len);
    (start, end)
}
