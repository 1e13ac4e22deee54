//! Pipe-delimited query text builder.
//!
//! Covers what the engine needs to express: type filters, a region-in-list
//! filter, time-range filters, and a projection of named fields. Values are
//! always emitted as quoted literals.

use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    table: String,
    stages: Vec<String>,
}

impl QueryBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            stages: Vec::new(),
        }
    }

    /// `| where type in~ (...)`, case-insensitive.
    pub fn where_type_in<S: AsRef<str>>(self, types: &[S]) -> Self {
        self.where_in("type", types)
    }

    /// `| where field =~ 'value'`, case-insensitive equality.
    pub fn where_eq(mut self, field: &str, value: &str) -> Self {
        self.stages
            .push(format!("where {field} =~ {}", quote(value)));
        self
    }

    /// `| where field in~ (...)`. An empty list matches nothing.
    pub fn where_in<S: AsRef<str>>(mut self, field: &str, values: &[S]) -> Self {
        if values.is_empty() {
            self.stages.push("where false".to_string());
        } else {
            self.stages
                .push(format!("where {field} in~ ({})", quote_list(values)));
        }
        self
    }

    /// Inclusive time-range filter on a datetime field.
    pub fn where_between(mut self, field: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.stages.push(format!(
            "where {field} between ({} .. {})",
            datetime(start),
            datetime(end)
        ));
        self
    }

    /// Keep rows whose `[start_field, end_field]` interval overlaps
    /// `[start, end]`. A null end is treated as still ongoing.
    pub fn where_overlaps(
        mut self,
        start_field: &str,
        end_field: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        self.stages.push(format!(
            "where {start_field} <= {} and (isnull({end_field}) or {end_field} >= {})",
            datetime(end),
            datetime(start)
        ));
        self
    }

    /// `| extend name = expr`.
    pub fn extend(mut self, name: &str, expr: &str) -> Self {
        self.stages.push(format!("extend {name} = {expr}"));
        self
    }

    /// `| project a, b = expr, ...`. Each field is either a bare column or
    /// a `name = expr` pair.
    pub fn project<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        let list: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        self.stages.push(format!("project {}", list.join(", ")));
        self
    }

    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.stages
            .push(format!("order by {field} {}", order.keyword()));
        self
    }

    pub fn build(&self) -> String {
        let mut out = self.table.clone();
        for stage in &self.stages {
            out.push_str("\n| ");
            out.push_str(stage);
        }
        out
    }
}

/// Count-only variant of built query text, used for pre-flight volume reports.
pub fn count_query(query: &str) -> String {
    format!("{}\n| count", query.trim_end())
}

/// Whether query text ends in a count stage.
pub fn is_count_query(query: &str) -> bool {
    query
        .rsplit('|')
        .next()
        .is_some_and(|stage| stage.trim() == "count")
}

/// Source table of query text (everything before the first pipe).
pub fn source_table(query: &str) -> &str {
    query.split('|').next().unwrap_or("").trim()
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn quote_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| quote(v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn datetime(instant: DateTime<Utc>) -> String {
    format!(
        "datetime({})",
        instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
