//! Cursor pagination helpers.
//!
//! Both forms walk the same cursor protocol over the same facade
//! primitive: the first fetch carries the seed cursor (usually absent),
//! each subsequent fetch carries the prior page's `end_cursor`, and a page
//! reporting `has_next_page == false` ends the sequence. A failed fetch
//! propagates unchanged; pages already delivered are not rolled back.

use std::future::Future;

use crate::error::{DiscussionsError, DiscussionsResult};
use crate::types::PaginatedResult;

/// Bound on the total number of items collected across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit {
    /// Maximum number of items to fetch.
    pub max_items: usize,
}

impl PageLimit {
    /// Create a new limit.
    #[must_use]
    pub const fn new(max_items: usize) -> Self {
        Self { max_items }
    }
}

/// Collect every node of a cursor-paginated result set.
///
/// `fetch_page` receives the cursor for the page to load (`None` for the
/// first) and is expected to issue exactly one request. With a
/// [`PageLimit`], exceeding the bound is an error rather than a silent
/// truncation.
pub async fn paginate_cursor<T, F, Fut>(
    mut cursor: Option<String>,
    limit: Option<PageLimit>,
    mut fetch_page: F,
) -> DiscussionsResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = DiscussionsResult<PaginatedResult<T>>>,
{
    let mut out = Vec::new();
    loop {
        let page = fetch_page(cursor.clone()).await?;
        let remaining = limit.map(|limit| limit.max_items.saturating_sub(out.len()));
        if let Some(remaining) = remaining {
            if remaining == 0 {
                return Err(DiscussionsError::Validation(
                    "pagination limit exceeded".to_string(),
                ));
            }
            out.extend(page.nodes.into_iter().take(remaining));
        } else {
            out.extend(page.nodes);
        }

        if !page.page_info.has_next_page {
            break;
        }
        cursor.clone_from(&page.page_info.end_cursor);
        if cursor.is_none() {
            break;
        }
    }

    Ok(out)
}

/// Lazy page iterator for the blocking facade.
///
/// Yields one `PaginatedResult` per fetch; terminates after the final page
/// or after yielding a fetch error.
pub struct Pages<T, F>
where
    F: FnMut(Option<String>) -> DiscussionsResult<PaginatedResult<T>>,
{
    fetch: F,
    cursor: Option<String>,
    done: bool,
}

impl<T, F> Pages<T, F>
where
    F: FnMut(Option<String>) -> DiscussionsResult<PaginatedResult<T>>,
{
    /// Create an iterator starting from the given seed cursor.
    pub fn new(after: Option<String>, fetch: F) -> Self {
        Self {
            fetch,
            cursor: after,
            done: false,
        }
    }
}

impl<T, F> Iterator for Pages<T, F>
where
    F: FnMut(Option<String>) -> DiscussionsResult<PaginatedResult<T>>,
{
    type Item = DiscussionsResult<PaginatedResult<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match (self.fetch)(self.cursor.take()) {
            Ok(page) => {
                if page.page_info.has_next_page {
                    self.cursor.clone_from(&page.page_info.end_cursor);
                    if self.cursor.is_none() {
                        self.done = true;
                    }
                } else {
                    self.done = true;
                }
                Some(Ok(page))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
