//! Query shaping for the activity feed and revision listings.
//!
//! Caller parameters are resolved against the log's columns and rendered into a
//! parameterized SELECT plus a matching COUNT. Sorting is never taken from the
//! caller: rows always come back newest first.

use activity_log_db::models::activity::{ActivityAction, ActivityColumn, ActivityType};
use activity_log_db::repository::feed_params::{FeedFilter, FeedParams, FilterOperator};
use activity_log_db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

pub(crate) const ACTIVITY_TABLE: &str = "activity";

/// Comment children are hidden from the feed; file activity always shows.
pub(crate) const VISIBILITY_PREDICATE: &str = r#"("parent_id" IS NULL OR "type" = 'FILES')"#;

const ORDER_BY: &str = r#"ORDER BY "id" DESC"#;

/// What the query is restricted to before caller filters apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope<'a> {
    /// Top level activity across all collections
    Visible,
    /// Every entry of one item, comment threads included
    Item { collection: &'a str, item: &'a str },
}

/// A value bound to a placeholder, typed after the column it is compared with
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
    Type(ActivityType),
    Action(ActivityAction),
    DateTime(DateTime<Utc>),
}

impl SqlValue {
    fn parse(column: ActivityColumn, raw: &str) -> Result<Self, String> {
        let invalid = || format!("invalid input value for column \"{column}\": \"{raw}\"");
        match column {
            ActivityColumn::Id | ActivityColumn::ParentId => {
                raw.parse().map(SqlValue::Int).map_err(|_| invalid())
            }
            ActivityColumn::Type => raw.parse().map(SqlValue::Type).map_err(|_| invalid()),
            ActivityColumn::Action => raw.parse().map(SqlValue::Action).map_err(|_| invalid()),
            ActivityColumn::Datetime => DateTime::parse_from_rfc3339(raw)
                .map(|dt| SqlValue::DateTime(dt.with_timezone(&Utc)))
                .map_err(|_| invalid()),
            _ => Ok(SqlValue::Text(raw.to_string())),
        }
    }
}

/// Rendered feed statements sharing one set of bind values
#[derive(Debug, Clone, PartialEq)]
pub struct FeedQuery {
    pub columns: Vec<ActivityColumn>,
    pub select_sql: String,
    pub count_sql: String,
    pub binds: Vec<SqlValue>,
}

impl FeedQuery {
    pub fn build(params: &FeedParams, scope: FeedScope<'_>) -> Result<Self, RepositoryError> {
        let columns = resolve_columns(params.columns.as_deref())?;
        let projection = columns.iter().map(|c| quote_ident(c.as_str())).collect::<Vec<_>>().join(", ");

        let mut builder = ConditionBuilder::default();
        for filter in &params.filters {
            if let Err(message) = builder.push_filter(filter) {
                return Err(RepositoryError::invalid_query(message, builder.render_select(&projection)));
            }
        }

        match scope {
            FeedScope::Visible => builder.conditions.push(VISIBILITY_PREDICATE.to_string()),
            FeedScope::Item { collection, item } => {
                let collection = builder.push_bind(SqlValue::Text(collection.to_string()));
                let item = builder.push_bind(SqlValue::Text(item.to_string()));
                builder.conditions.push(format!(r#""collection" = {collection}"#));
                builder.conditions.push(format!(r#""item" = {item}"#));
            }
        }

        let page = params.page();
        let select_sql = format!(
            "{} {ORDER_BY} LIMIT {} OFFSET {}",
            builder.render_select(&projection),
            page.limit,
            page.offset
        );
        let count_sql = format!("SELECT COUNT(*) AS total_count FROM {ACTIVITY_TABLE}{}", builder.render_where());

        Ok(FeedQuery {
            columns,
            select_sql,
            count_sql,
            binds: builder.binds,
        })
    }
}

/// Bind `values` to `query` in placeholder order
pub(crate) fn bind_values<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    values: &[SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for value in values {
        query = match value.clone() {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Type(v) => query.bind(v),
            SqlValue::Action(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
        };
    }
    query
}

/// Caller columns replace the default projection; an empty list means every column.
fn resolve_columns(requested: Option<&[String]>) -> Result<Vec<ActivityColumn>, RepositoryError> {
    let requested = match requested {
        Some(requested) if !requested.is_empty() => requested,
        _ => return Ok(ActivityColumn::ALL.to_vec()),
    };

    let mut columns = Vec::with_capacity(requested.len());
    for name in requested {
        match name.parse::<ActivityColumn>() {
            Ok(column) => columns.push(column),
            Err(_) => {
                let projection = requested.iter().map(|n| quote_ident(n)).collect::<Vec<_>>().join(", ");
                return Err(RepositoryError::invalid_query(
                    format!("column \"{name}\" does not exist"),
                    format!("SELECT {projection} FROM {ACTIVITY_TABLE}"),
                ));
            }
        }
    }
    Ok(columns)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn escape_like(value: &str) -> String {
    value.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[derive(Default)]
struct ConditionBuilder {
    conditions: Vec<String>,
    binds: Vec<SqlValue>,
}

impl ConditionBuilder {
    fn push_bind(&mut self, value: SqlValue) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }

    fn push_filter(&mut self, filter: &FeedFilter) -> Result<(), String> {
        let column = filter
            .field
            .parse::<ActivityColumn>()
            .map_err(|_| format!("column \"{}\" does not exist", filter.field))?;
        let ident = quote_ident(column.as_str());

        let condition = match filter.operator {
            FilterOperator::Null => format!("{ident} IS NULL"),
            FilterOperator::NotNull => format!("{ident} IS NOT NULL"),
            FilterOperator::In | FilterOperator::NotIn => {
                let negated = filter.operator == FilterOperator::NotIn;
                if filter.values.is_empty() {
                    // empty list: IN matches nothing, NOT IN matches everything
                    if negated { "TRUE".to_string() } else { "FALSE".to_string() }
                } else {
                    let mut placeholders = Vec::with_capacity(filter.values.len());
                    for raw in &filter.values {
                        let value = SqlValue::parse(column, raw)?;
                        placeholders.push(self.push_bind(value));
                    }
                    let keyword = if negated { "NOT IN" } else { "IN" };
                    format!("{ident} {keyword} ({})", placeholders.join(", "))
                }
            }
            FilterOperator::Contains => {
                if !column.is_textual() {
                    return Err(format!("operator contains is not supported for column \"{column}\""));
                }
                let raw = single_value(filter)?;
                let placeholder = self.push_bind(SqlValue::Text(format!("%{}%", escape_like(raw))));
                format!("{ident} LIKE {placeholder}")
            }
            FilterOperator::Eq
            | FilterOperator::Neq
            | FilterOperator::Lt
            | FilterOperator::Lte
            | FilterOperator::Gt
            | FilterOperator::Gte => {
                let op = match filter.operator {
                    FilterOperator::Eq => "=",
                    FilterOperator::Neq => "<>",
                    FilterOperator::Lt => "<",
                    FilterOperator::Lte => "<=",
                    FilterOperator::Gt => ">",
                    _ => ">=",
                };
                let value = SqlValue::parse(column, single_value(filter)?)?;
                let placeholder = self.push_bind(value);
                format!("{ident} {op} {placeholder}")
            }
        };

        self.conditions.push(format!("({condition})"));
        Ok(())
    }

    fn render_where(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    fn render_select(&self, projection: &str) -> String {
        format!("SELECT {projection} FROM {ACTIVITY_TABLE}{}", self.render_where())
    }
}

fn single_value(filter: &FeedFilter) -> Result<&str, String> {
    match filter.values.as_slice() {
        [value] => Ok(value.as_str()),
        _ => Err(format!("filter on \"{}\" expects exactly one value", filter.field)),
    }
}
