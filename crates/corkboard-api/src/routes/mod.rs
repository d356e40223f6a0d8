pub mod docs;
pub mod health;
pub mod replies;
pub mod threads;
