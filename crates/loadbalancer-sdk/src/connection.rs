//! Request parameters for list endpoints
//!
//! Filters are encoded as `<property>:<operator>=<value>` query parameters,
//! with multiple values joined by commas.

use std::fmt;

/// Comparison operator for a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Lk,
    Gt,
    Lt,
    In,
    Neq,
    Nin,
    Nlk,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Lk => "lk",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::In => "in",
            FilterOperator::Neq => "neq",
            FilterOperator::Nin => "nin",
            FilterOperator::Nlk => "nlk",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single property filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub property: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(
        property: impl Into<String>,
        operator: FilterOperator,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            property: property.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Equality filter on a single value
    pub fn eq(property: impl Into<String>, value: impl ToString) -> Self {
        Self::new(property, FilterOperator::Eq, [value.to_string()])
    }

    fn query_pair(&self) -> (String, String) {
        (
            format!("{}:{}", self.property, self.operator),
            self.values.join(","),
        )
    }
}

/// Filtering and pagination for list requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequestParameters {
    pub filters: Vec<Filter>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ApiRequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn add_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Query string pairs for this request
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> =
            self.filters.iter().map(Filter::query_pair).collect();

        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }

        query
    }
}
