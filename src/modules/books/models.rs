use serde::{Deserialize, Deserializer, Serialize};

/// A bibliographic record held by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the store, omitted from JSON when zero
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    pub title: String,
    pub author: String,
    pub pages: i64,
}

impl Book {
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>, pages: i64) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            pages,
        }
    }
}

fn is_zero(id: &i64) -> bool {
    *id == 0
}

/// Response body for `GET /books?all=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookListResponse {
    pub data: Vec<Book>,
    pub total: usize,
}

impl From<Vec<Book>> for BookListResponse {
    fn from(data: Vec<Book>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

/// Request model for creating a new book.
///
/// Absent or `null` fields decode to empty values so that validation, not
/// decoding, reports them. A client-supplied `id` is accepted and discarded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewBook {
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    _id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pages: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, pages: i64) -> Self {
        Self {
            _id: 0,
            title: title.into(),
            author: author.into(),
            pages,
        }
    }

    /// Decode the first JSON value in `body`.
    ///
    /// A `null` body yields an empty payload; anything after the first value is ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<NewBook>>()
            .next();
        match first {
            Some(decoded) => decoded.map(Option::unwrap_or_default),
            None => Err(<serde_json::Error as serde::de::Error>::custom(
                "request body is empty",
            )),
        }
    }

    /// Names of the fields that fail validation, empty when the payload is acceptable.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if self.title.is_empty() {
            invalid.push("title");
        }
        if self.author.is_empty() {
            invalid.push("author");
        }
        if self.pages <= 0 {
            invalid.push("pages");
        }
        invalid
    }
}
