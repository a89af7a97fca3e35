use serde::{Deserialize, Serialize};

/// An isolated customer partition.
///
/// Immutable once created: `id` is the partition key every tenant-scoped
/// client is bound to, `slug` is the human-facing lookup token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub slug: String,
}

impl Tenant {
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
        }
    }
}
