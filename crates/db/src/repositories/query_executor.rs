//! Two-phase paginated rich query.
//!
//! Phase A runs the selector without paging and counts matches. Phase B runs
//! it again with `skip` / `limit` and decodes the page. The ledger offers no
//! snapshot across the two queries, so a write landing between them can make
//! `total` disagree with the page by that write.

use agritrace_core::asset::Stamped;
use agritrace_core::codec;
use agritrace_core::error::CoreError;
use agritrace_core::page::{Page, SortOrder};
use agritrace_core::selector::SelectorDoc;
use serde::de::DeserializeOwned;

use crate::TxContext;

pub struct QueryExecutor;

impl QueryExecutor {
    /// Count, then fetch one page sorted by `updatedAt` in `order`.
    ///
    /// `limit == 0` leaves the page unbounded. A `skip` beyond the number of
    /// matches fails with [`CoreError::SkipExceedsTotal`] before any page is
    /// fetched.
    pub async fn execute<T>(
        ctx: &TxContext<'_>,
        selector: &SelectorDoc,
        skip: u64,
        limit: u64,
        order: SortOrder,
    ) -> Result<Page<T>, CoreError>
    where
        T: DeserializeOwned + Stamped,
    {
        let total = Self::count(ctx, selector).await?;
        if skip > total {
            return Err(CoreError::SkipExceedsTotal { skip, total });
        }

        let query = selector.with_page(skip, limit).to_json()?;
        let page_size = u32::try_from(limit).unwrap_or(u32::MAX);
        let (records, _bookmark) = ctx
            .ledger
            .query_paged(&query, page_size, "")
            .await
            .map_err(|e| CoreError::ledger("paged query", None, e))?;

        let mut items = Vec::new();
        for record in records {
            let record = record.map_err(|e| CoreError::ledger("paged query", None, e))?;
            items.push(codec::decode::<T>(&record.value)?);
        }

        sort_by_updated(&mut items, order);
        Ok(Page { items, total })
    }

    /// Number of live records matching `selector`, ignoring its paging.
    pub async fn count(ctx: &TxContext<'_>, selector: &SelectorDoc) -> Result<u64, CoreError> {
        let query = selector.with_page(0, 0).to_json()?;
        let records = ctx
            .ledger
            .query(&query)
            .await
            .map_err(|e| CoreError::ledger("count query", None, e))?;

        let mut total = 0u64;
        for record in records {
            record.map_err(|e| CoreError::ledger("count query", None, e))?;
            total += 1;
        }
        Ok(total)
    }
}

/// Stable sort by `updatedAt`.
pub(crate) fn sort_by_updated<T: Stamped>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::OldestFirst => items.sort_by_key(|item| item.updated_at()),
        SortOrder::NewestFirst => items.sort_by(|a, b| b.updated_at().cmp(&a.updated_at())),
    }
}
