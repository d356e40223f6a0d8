pub mod models;
pub mod store;
pub mod dbs;
pub mod error;

pub use models::{NewReply, NewThread, Reply, Thread, DELETED_REPLY_TEXT};
pub use store::BoardStore;
pub use dbs::memory::MemoryBoardStore;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoBoardStore;
pub use error::{PersistError, Result};
