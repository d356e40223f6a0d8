mod reply;
mod thread;

use chrono::{DateTime, SubsecRound, Utc};

pub use reply::{NewReply, Reply, DELETED_REPLY_TEXT};
pub use thread::{NewThread, Thread};

/// Current time at the millisecond precision BSON dates can hold, so every
/// backend hands out timestamps that survive a round trip unchanged.
pub fn timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
