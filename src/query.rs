use reqwest::Url;

/// Single query-parameter value.
///
/// Booleans serialize as literal `true`/`false`; lists use indexed-bracket
/// notation (`key[0]=v0&key[1]=v1`).
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<QueryValue>),
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Ordered query-parameter list appended to an endpoint URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams(Vec<(String, QueryValue)>);

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.push((name.into(), value.into()));
    }

    /// Appends one parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends the encoded parameters to `url`, keeping any query items the
    /// URL already carries.
    pub(crate) fn append_to(&self, url: &mut Url) {
        if self.0.is_empty() {
            return;
        }
        let mut flattened = Vec::new();
        for (name, value) in &self.0 {
            flatten(name, value, &mut flattened);
        }
        let mut pairs = url.query_pairs_mut();
        for (name, rendered) in &flattened {
            pairs.append_pair(name, rendered);
        }
    }
}

fn flatten(name: &str, value: &QueryValue, out: &mut Vec<(String, String)>) {
    match value {
        QueryValue::Bool(value) => out.push((name.to_owned(), value.to_string())),
        QueryValue::Integer(value) => out.push((name.to_owned(), value.to_string())),
        QueryValue::Float(value) => out.push((name.to_owned(), value.to_string())),
        QueryValue::Text(value) => out.push((name.to_owned(), value.clone())),
        QueryValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{name}[{index}]"), item, out);
            }
        }
    }
}

impl From<()> for QueryParams {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> From<Vec<(K, V)>> for QueryParams {
    fn from(values: Vec<(K, V)>) -> Self {
        Self(
            values
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<QueryValue>, const N: usize> From<[(K, V); N]> for QueryParams {
    fn from(values: [(K, V); N]) -> Self {
        Self(
            values
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
