mod client;
mod models;
mod repositories;

pub use client::MongoBoardStore;
pub use models::{MongoReply, MongoThread};
