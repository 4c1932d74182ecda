//! Pagination helpers for request handlers.
//! - `pager`: page/offset arithmetic and navigation markup.
//! - `pagination`: counts a collection and fetches the current page's window.
//! - `request` / `links`: the per-request context and link generation used by both.

pub mod errors;
pub mod links;
pub mod pager;
pub mod pagination;
pub mod request;

pub use errors::PagerError;
pub use links::{LinkBuilder, MountedLinks, QueryLinks};
pub use pager::{LimitOffset, PageLink, PageMeta, Pager};
pub use pagination::{paginate, paginate_slice, Page, PageSource, PaginateOptions, QuerySource};
pub use request::RequestContext;
