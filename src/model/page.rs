//! Page parameters for list queries and the paged response wrapper.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Columns a computer list may be sorted by.
///
/// The SQL text for each variant is fixed here; nothing user-supplied is
/// ever formatted into a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Name,
    Introduced,
    Discontinued,
}

impl Order {
    pub fn column(self) -> &'static str {
        match self {
            Order::Name => "name",
            Order::Introduced => "introduced",
            Order::Discontinued => "discontinued",
        }
    }

    /// Index the planner is pinned to when sorting by this column.
    pub fn index(self) -> &'static str {
        match self {
            Order::Name => "ix_computer_name",
            Order::Introduced => "ix_computer_introduced",
            Order::Discontinued => "ix_computer_discontinued",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Offset, size, ordering and optional name-prefix filter of a list query.
///
/// `page_number` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageParameters {
    #[serde(rename = "page")]
    pub page_number: u32,
    pub size: u32,
    pub order: Order,
    pub direction: Direction,
    pub search: Option<String>,
}

impl Default for PageParameters {
    fn default() -> Self {
        Self {
            page_number: 0,
            size: DEFAULT_PAGE_SIZE,
            order: Order::default(),
            direction: Direction::default(),
            search: None,
        }
    }
}

impl PageParameters {
    pub fn new(page_number: u32, size: u32) -> Self {
        Self {
            page_number,
            size,
            ..Self::default()
        }
    }

    pub fn ordered(mut self, order: Order, direction: Direction) -> Self {
        self.order = order;
        self.direction = direction;
        self
    }

    pub fn searching(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Calculate SQL offset: size × page number, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        i64::from(self.size).saturating_mul(i64::from(self.page_number))
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// LIKE pattern for the name-prefix filter, escaped for `ESCAPE '\'`.
    pub fn search_pattern(&self) -> String {
        let prefix = self.search.as_deref().unwrap_or_default();
        let mut pattern = String::with_capacity(prefix.len() + 1);
        for ch in prefix.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, params: &PageParameters) -> Self {
        let size = i64::from(params.size);
        let pages = if size == 0 { 0 } else { (total + size - 1) / size };
        Self {
            items,
            total,
            page: params.page_number,
            size: params.size,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_size_times_page_number() {
        assert_eq!(PageParameters::new(0, 10).offset(), 0);
        assert_eq!(PageParameters::new(1, 10).offset(), 10);
        assert_eq!(PageParameters::new(3, 25).offset(), 75);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let p = PageParameters::new(u32::MAX, u32::MAX);
        assert_eq!(p.offset(), i64::MAX);

        let p = PageParameters::new(u32::MAX, 2);
        assert_eq!(p.offset(), 2 * i64::from(u32::MAX));
    }

    #[test]
    fn search_pattern_escapes_like_metacharacters() {
        let p = PageParameters::default().searching("50%_off\\");
        assert_eq!(p.search_pattern(), "50\\%\\_off\\\\%");
    }

    #[test]
    fn missing_search_matches_everything() {
        assert_eq!(PageParameters::default().search_pattern(), "%");
    }

    #[test]
    fn page_count_rounds_up() {
        let params = PageParameters::new(0, 10);
        let page: Page<()> = Page::new(vec![], 21, &params);
        assert_eq!(page.pages, 3);

        let empty: Page<()> = Page::new(vec![], 0, &params);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn query_string_fields_deserialize() {
        let p: PageParameters = serde_json::from_str(
            r#"{"page":2,"size":5,"order":"discontinued","direction":"desc","search":"mac"}"#,
        )
        .unwrap();
        assert_eq!(p.page_number, 2);
        assert_eq!(p.size, 5);
        assert_eq!(p.order, Order::Discontinued);
        assert_eq!(p.direction, Direction::Desc);
        assert_eq!(p.search.as_deref(), Some("mac"));
    }
}
