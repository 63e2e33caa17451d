//! Pull-based, sortable, paginated table model.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::BoxFuture;

/// Fetch function the table invokes whenever it needs rows.
pub type DataSource<T> = Arc<dyn Fn() -> BoxFuture<'static, Vec<T>> + Send + Sync>;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Active sort: column key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: &'static str,
    pub direction: SortDirection,
}

impl Sort {
    pub fn ascending(key: &'static str) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }
}

/// A table column. Columns without a comparator cannot be sorted on.
pub struct Column<T> {
    pub key: &'static str,
    pub title: &'static str,
    compare: Option<fn(&T, &T) -> Ordering>,
}

impl<T> Column<T> {
    /// A column rows can be sorted by.
    pub fn sortable(key: &'static str, title: &'static str, compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            key,
            title,
            compare: Some(compare),
        }
    }

    /// A column with no ordering, e.g. action buttons.
    pub fn fixed(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            compare: None,
        }
    }

    pub fn is_sortable(&self) -> bool {
        self.compare.is_some()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            title: self.title,
            compare: self.compare,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.is_sortable())
            .finish()
    }
}

struct TableState<T> {
    rows: Vec<T>,
    sort: Sort,
    page: usize,
    page_size: usize,
    reloads: u64,
}

/// Table whose rows come from a [`DataSource`] it pulls on `reload`.
///
/// Nothing is fetched until the first `reload`. Reloads keep the current
/// sort and page; the page is clamped if the row count shrinks.
pub struct TableParams<T> {
    columns: Arc<Vec<Column<T>>>,
    source: DataSource<T>,
    state: Arc<Mutex<TableState<T>>>,
}

impl<T> Clone for TableParams<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            source: self.source.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> TableParams<T> {
    pub fn new(columns: Vec<Column<T>>, sort: Sort, page_size: usize, source: DataSource<T>) -> Self {
        Self {
            columns: Arc::new(columns),
            source,
            state: Arc::new(Mutex::new(TableState {
                rows: Vec::new(),
                sort,
                page: 1,
                page_size: page_size.max(1),
                reloads: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TableState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn comparator(&self, key: &str) -> Option<fn(&T, &T) -> Ordering> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .and_then(|c| c.compare)
    }

    fn sort_rows(rows: &mut [T], compare: Option<fn(&T, &T) -> Ordering>, direction: SortDirection) {
        if let Some(compare) = compare {
            match direction {
                SortDirection::Ascending => rows.sort_by(compare),
                SortDirection::Descending => rows.sort_by(|a, b| compare(b, a)),
            }
        }
    }

    /// Pull fresh rows from the data source, keeping sort and page.
    ///
    /// Returns the number of rows now held.
    pub async fn reload(&self) -> usize {
        let mut rows = (self.source)().await;
        let sort = self.sort();
        Self::sort_rows(&mut rows, self.comparator(sort.key), sort.direction);

        let mut state = self.lock();
        state.rows = rows;
        state.reloads += 1;
        let pages = page_count(state.rows.len(), state.page_size);
        state.page = state.page.min(pages);
        state.rows.len()
    }

    /// Sort by `key`. The active column flips direction; a new column
    /// starts ascending. Returns false for unknown or fixed columns.
    pub fn set_sort(&self, key: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.key == key && c.is_sortable()) else {
            return false;
        };

        let mut state = self.lock();
        state.sort = if state.sort.key == column.key {
            Sort {
                key: column.key,
                direction: state.sort.direction.flip(),
            }
        } else {
            Sort::ascending(column.key)
        };
        let direction = state.sort.direction;
        Self::sort_rows(&mut state.rows, column.compare, direction);
        state.page = 1;
        true
    }

    /// Move to `page` (1-based), clamped to the available pages.
    pub fn set_page(&self, page: usize) -> usize {
        let mut state = self.lock();
        let pages = page_count(state.rows.len(), state.page_size);
        state.page = page.clamp(1, pages);
        state.page
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn sort(&self) -> Sort {
        self.lock().sort
    }

    pub fn page(&self) -> usize {
        self.lock().page
    }

    pub fn page_size(&self) -> usize {
        self.lock().page_size
    }

    /// Number of pages; an empty table still has one.
    pub fn page_count(&self) -> usize {
        let state = self.lock();
        page_count(state.rows.len(), state.page_size)
    }

    /// Total rows across all pages.
    pub fn total(&self) -> usize {
        self.lock().rows.len()
    }

    /// How many reloads have completed.
    pub fn reload_count(&self) -> u64 {
        self.lock().reloads
    }

    /// All rows in sorted order.
    pub fn rows(&self) -> Vec<T> {
        self.lock().rows.clone()
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<T> {
        let state = self.lock();
        state
            .rows
            .iter()
            .skip((state.page - 1) * state.page_size)
            .take(state.page_size)
            .cloned()
            .collect()
    }
}

fn page_count(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size).max(1)
}
