//! Account persistence: the store interface and its Postgres and in-memory backends.

mod memory;
mod pool;
mod repositories;
mod store;

pub use memory::MemoryAccountStore;
pub use pool::{create_pool, run_migrations, DbPool};
pub use repositories::{AccountRow, PgAccountStore};
pub use store::{AccountStore, ConflictKind, StoreError, StoreResult};
