mod database;
mod remote;
mod sqlite_store;

pub use database::{Database, Connection};
pub use remote::{AuthProvider, LocalAuth, RemoteStore};
pub use sqlite_store::SqliteStore;
