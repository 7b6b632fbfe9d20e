//! Cursor bookkeeping for the two paging styles of the Jira REST API.
//!
//! Neither pager performs I/O. The caller asks for the next request, sends it,
//! and feeds the page back with `record`. Both pagers fail with
//! [`Error::PaginationStalled`] rather than loop on a page that makes no
//! progress.

use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::error::{Error, Result};
use crate::models::ProjectPage;
use crate::request::ResourceRequest;

/// Page size the service uses when `maxResults` is not given.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetWindow {
    pub start_at: u64,
    pub max_results: u64,
}

/// `startAt` / `total` paging, as used by `GET search`.
///
/// The total is unknown until the first page arrives and is fixed from then
/// on. `startAt` advances by the items actually received, since the service
/// may return fewer than requested.
#[derive(Debug, Clone)]
pub struct OffsetPager {
    page_size: u64,
    limit: Option<u64>,
    total: Option<u64>,
    fetched: u64,
}

impl OffsetPager {
    pub fn new(limit: Option<u64>) -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            limit,
            total: None,
            fetched: 0,
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    fn target(&self) -> Option<u64> {
        self.total
            .map(|total| self.limit.map_or(total, |limit| limit.min(total)))
    }

    /// `None` once the smaller of limit and total has been collected.
    pub fn next_window(&self) -> Option<OffsetWindow> {
        let remaining = match self.target() {
            None => self.limit.unwrap_or(self.page_size),
            Some(target) if self.fetched >= target => return None,
            Some(target) => target - self.fetched,
        };

        Some(OffsetWindow {
            start_at: self.fetched,
            max_results: remaining.min(self.page_size),
        })
    }

    /// Records a page and returns how many of its items to keep; anything
    /// past the limit is dropped.
    pub fn record(&mut self, total: u64, received: usize) -> Result<usize> {
        if self.total.is_none() {
            self.total = Some(total);
        }
        let target = self.target().unwrap_or(total);
        let remaining = target.saturating_sub(self.fetched);

        if received == 0 && remaining > 0 {
            return Err(Error::PaginationStalled(format!(
                "empty page at startAt={} after {} of {} items",
                self.fetched, self.fetched, target
            )));
        }

        let keep = (received as u64).min(remaining);
        self.fetched += keep;
        Ok(keep as usize)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Cursor {
    Start,
    Offset(u64),
    Url(Url),
    Done,
}

/// `isLast` / `nextPage` paging, as used by `GET project/search`.
///
/// A `nextPage` URL is only followed when it shares the origin of the base
/// URL, since every request carries the session credentials. A link to any
/// other host is reduced to its `startAt` parameter.
#[derive(Debug, Clone)]
pub struct CursorPager {
    path: String,
    base_url: Url,
    cursor: Cursor,
    offset: u64,
}

impl CursorPager {
    pub fn new(resource_path: impl Into<String>, base_url: &Url) -> Self {
        Self {
            path: resource_path.into(),
            base_url: base_url.clone(),
            cursor: Cursor::Start,
            offset: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.cursor == Cursor::Done
    }

    pub fn next_request(&self) -> Option<ResourceRequest> {
        match &self.cursor {
            Cursor::Start => Some(ResourceRequest::path(self.path.as_str())),
            Cursor::Offset(start_at) => {
                Some(ResourceRequest::path(self.path.as_str()).query("startAt", start_at))
            }
            Cursor::Url(url) => Some(ResourceRequest::url(url.clone())),
            Cursor::Done => None,
        }
    }

    pub fn record(&mut self, page: &ProjectPage) -> Result<()> {
        let received = page.values.len() as u64;
        self.offset = page.start_at.unwrap_or(self.offset).saturating_add(received);

        if page.is_last {
            self.cursor = Cursor::Done;
            return Ok(());
        }
        if received == 0 {
            return Err(Error::PaginationStalled(format!(
                "{} returned an empty page that is not the last one",
                self.path
            )));
        }

        let next = match &page.next_page {
            None | Some(Value::Null) => Cursor::Offset(self.offset),
            Some(Value::String(raw)) => match Url::parse(raw) {
                Ok(url) => self.cursor_from_url(url)?,
                Err(_) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Cursor::Offset)
                    .map_err(|_| {
                        Error::UnexpectedResponse(format!("unusable nextPage cursor {raw:?}"))
                    })?,
            },
            Some(Value::Number(n)) => n.as_u64().map(Cursor::Offset).ok_or_else(|| {
                Error::UnexpectedResponse(format!("unusable nextPage cursor {n}"))
            })?,
            Some(other) => {
                return Err(Error::UnexpectedResponse(format!(
                    "unusable nextPage cursor {other}"
                )));
            }
        };

        if next == self.cursor {
            return Err(Error::PaginationStalled(format!(
                "{} handed back the cursor it was called with",
                self.path
            )));
        }
        self.cursor = next;
        Ok(())
    }

    fn cursor_from_url(&self, url: Url) -> Result<Cursor> {
        if url.origin() == self.base_url.origin() {
            return Ok(Cursor::Url(url));
        }

        warn!(
            "nextPage points at foreign host {}, not following it",
            url.origin().ascii_serialization()
        );
        url.query_pairs()
            .find(|(key, _)| *key == "startAt")
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Cursor::Offset)
            .ok_or_else(|| {
                Error::UnexpectedResponse(format!(
                    "nextPage on foreign host {} without a startAt",
                    url.origin().ascii_serialization()
                ))
            })
    }
}
