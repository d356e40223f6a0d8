pub mod reply;
pub mod thread;

pub use reply::MongoReplyRepository;
pub use thread::MongoThreadRepository;
