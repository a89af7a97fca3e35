pub mod directory;
pub mod error;
pub mod handle;
pub mod in_memory;
pub mod resolver;
pub mod slug;
pub mod sqlite;

pub use directory::TenantDirectory;
pub use error::{Result, TenantError};
pub use handle::TenantHandle;
pub use in_memory::{InMemoryTenantClient, InMemoryTenantDirectory};
pub use resolver::{TenantCacheConfig, TenantResolver};
pub use slug::{MAX_SLUG_LENGTH, normalize_slug};
pub use sqlite::SqliteTenantDirectory;

#[cfg(test)]
mod tests;
