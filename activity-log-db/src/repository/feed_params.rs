use std::str::FromStr;
use validator::Validate;

use crate::repository::pagination::{PageRequest, MAX_OFFSET};
use crate::repository_error::RepositoryError;

/// Comparison applied by a feed filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Null,
    NotNull,
    Contains,
}

impl FilterOperator {
    /// Whether the operator takes a comma separated list of values
    pub fn is_list(&self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }

    /// Whether the operator takes no value at all
    pub fn is_unary(&self) -> bool {
        matches!(self, FilterOperator::Null | FilterOperator::NotNull)
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOperator::Eq),
            "neq" => Ok(FilterOperator::Neq),
            "lt" => Ok(FilterOperator::Lt),
            "lte" => Ok(FilterOperator::Lte),
            "gt" => Ok(FilterOperator::Gt),
            "gte" => Ok(FilterOperator::Gte),
            "in" => Ok(FilterOperator::In),
            "nin" => Ok(FilterOperator::NotIn),
            "null" => Ok(FilterOperator::Null),
            "nnull" => Ok(FilterOperator::NotNull),
            "contains" => Ok(FilterOperator::Contains),
            _ => Err(format!("Unknown filter operator '{s}'")),
        }
    }
}

/// One caller supplied condition. Field names and values stay raw here; they are
/// resolved against the log's columns when the query is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl FeedFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            values: vec![value.into()],
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }
}

/// # Documentation
/// Options of a feed or revision listing, equivalent to the HTTP query parameters
///
/// - `columns`: explicit projection; `None` selects every column
/// - `filters`: AND-ed conditions
/// - `sort`: accepted for compatibility, always replaced by `id DESC`
/// - `meta`: attach `total_count` to the envelope
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct FeedParams {
    pub columns: Option<Vec<String>>,
    pub filters: Vec<FeedFilter>,
    pub sort: Option<Vec<String>>,
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: usize,
    #[validate(range(max = MAX_OFFSET, message = "offset is too large"))]
    pub offset: usize,
    pub meta: bool,
}

impl Default for FeedParams {
    fn default() -> Self {
        Self {
            columns: None,
            filters: Vec::new(),
            sort: None,
            limit: PageRequest::DEFAULT_LIMIT,
            offset: 0,
            meta: false,
        }
    }
}

impl FeedParams {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_filter(mut self, filter: FeedFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.limit = page.limit;
        self.offset = page.offset;
        self
    }

    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    /// Parse HTTP style query pairs.
    ///
    /// Recognized keys: `columns` (or `fields`), `meta`, `limit`, `offset`, `page`,
    /// `sort` and `filter[<field>][<op>]` / `filter[<field>]`. Unknown keys are ignored.
    ///
    /// # Example
    /// ```
    /// use activity_log_db::repository::feed_params::FeedParams;
    ///
    /// let params = FeedParams::from_query_pairs([
    ///     ("columns", "id,type,item"),
    ///     ("filter[collection][eq]", "posts"),
    ///     ("meta", "1"),
    /// ]).unwrap();
    /// assert!(params.meta);
    /// assert_eq!(params.filters.len(), 1);
    /// ```
    pub fn from_query_pairs<'a, I>(pairs: I) -> Result<Self, RepositoryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = FeedParams::default();
        let mut page_number = None;

        for (key, value) in pairs {
            match key {
                "columns" | "fields" => params.columns = Some(split_list(value)),
                "sort" => params.sort = Some(split_list(value)),
                "meta" => params.meta = parse_flag(value)?,
                "limit" => params.limit = parse_number(key, value)?,
                "offset" => params.offset = parse_number(key, value)?,
                "page" => page_number = Some(parse_number(key, value)?),
                _ if key.starts_with("filter[") => params.filters.push(parse_filter(key, value)?),
                _ => {}
            }
        }

        if let Some(page_number) = page_number {
            params.offset = PageRequest::for_page(params.limit, page_number)
                .ok_or_else(|| RepositoryError::validation(format!("page {page_number} is out of range")))?
                .offset;
        }

        params.validate()?;
        Ok(params)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: &str) -> Result<bool, RepositoryError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(RepositoryError::validation(format!("meta must be 0 or 1, got '{value}'"))),
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize, RepositoryError> {
    value
        .parse()
        .map_err(|_| RepositoryError::validation(format!("{key} must be a non-negative integer, got '{value}'")))
}

/// `filter[field]` or `filter[field][op]`
fn parse_filter(key: &str, value: &str) -> Result<FeedFilter, RepositoryError> {
    let malformed = || RepositoryError::validation(format!("Malformed filter parameter '{key}'"));

    let inner = key
        .strip_prefix("filter[")
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;

    let (field, operator) = match inner.split_once("][") {
        Some((field, op)) => (field, op.parse::<FilterOperator>().map_err(RepositoryError::Validation)?),
        None => (inner, FilterOperator::Eq),
    };

    if field.is_empty() || field.contains(['[', ']']) {
        return Err(malformed());
    }

    let values = if operator.is_unary() {
        Vec::new()
    } else if operator.is_list() {
        split_list(value)
    } else {
        vec![value.to_string()]
    };

    Ok(FeedFilter {
        field: field.to_string(),
        operator,
        values,
    })
}
