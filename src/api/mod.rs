// Copyright 2023 vinyldns-cli authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! VinylDNS API endpoints and the models they exchange.
//!
//! Each resource lives in its own module and adds its methods to
//! [`Client`](crate::client::Client).

use std::fmt;
use std::future::Future;

use tracing::{debug, warn};

use crate::error::Result;

pub mod batch_changes;
pub mod groups;
pub mod record_sets;
pub mod zones;

/// Paging and name filtering shared by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub name_filter: Option<String>,
    pub start_from: Option<String>,
    pub max_items: Option<u32>,
}

/// Sort order of the global record-set search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameSort {
    #[default]
    Asc,
    Desc,
}

impl NameSort {
    /// `DESC` selects descending order; anything else sorts ascending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("DESC") => NameSort::Desc,
            _ => NameSort::Asc,
        }
    }
}

impl fmt::Display for NameSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSort::Asc => f.write_str("ASC"),
            NameSort::Desc => f.write_str("DESC"),
        }
    }
}

/// Filter of the global record-set search (`GET /recordsets`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalListFilter {
    pub record_name_filter: String,
    pub record_type_filter: Vec<String>,
    pub record_owner_group_filter: Option<String>,
    pub name_sort: NameSort,
    pub start_from: Option<String>,
    pub max_items: Option<u32>,
}

/// A filter that can be moved to the next page.
pub trait PageCursor {
    fn start_from(&self) -> Option<&str>;
    fn set_start_from(&mut self, start_from: Option<String>);
}

impl PageCursor for ListFilter {
    fn start_from(&self) -> Option<&str> {
        self.start_from.as_deref()
    }

    fn set_start_from(&mut self, start_from: Option<String>) {
        self.start_from = start_from;
    }
}

impl PageCursor for GlobalListFilter {
    fn start_from(&self) -> Option<&str> {
        self.start_from.as_deref()
    }

    fn set_start_from(&mut self, start_from: Option<String>) {
        self.start_from = start_from;
    }
}

/// One page of a list response.
pub trait Page {
    type Item;

    /// Splits the page into its items and the key of the next page.
    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

/// Fetches every page, starting from `filter`'s cursor, until the response
/// stops returning a `nextId` or hands back the cursor it was sent.
pub(crate) async fn paginate<F, P, Fetch, Fut>(mut filter: F, mut fetch: Fetch) -> Result<Vec<P::Item>>
where
    F: PageCursor + Clone,
    P: Page,
    Fetch: FnMut(F) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut all = Vec::new();
    let mut pages = 0usize;

    loop {
        let (items, next_id) = fetch(filter.clone()).await?.into_parts();
        pages += 1;
        debug!(page = pages, items = items.len(), next_id = ?next_id, "fetched page");
        all.extend(items);

        match next_id {
            Some(next) if filter.start_from() == Some(next.as_str()) => {
                warn!(next_id = %next, "nextId repeats the requested page, stopping");
                break;
            }
            Some(next) if !next.is_empty() => filter.set_start_from(Some(next)),
            _ => break,
        }
    }

    Ok(all)
}
