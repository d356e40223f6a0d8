use mongodb::{
    Client, Collection,
    bson::{self, doc, oid::ObjectId},
    options::ReturnDocument,
};

use crate::dbs::mongo::models::{MongoReply, MongoThread};
use crate::error::Result;

/// Operations on replies embedded in thread documents. Shares the
/// `threads` collection with [`MongoThreadRepository`](super::MongoThreadRepository).
#[derive(Clone)]
pub struct MongoReplyRepository {
    collection: Collection<MongoThread>,
}

impl MongoReplyRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("threads");
        Self { collection }
    }

    /// Push a reply and bump the thread in a single update.
    ///
    /// `$max` keeps `bumped_on` from ever moving backwards. Returns the
    /// updated thread, or `None` if no thread matched.
    pub async fn push_reply(
        &self,
        thread_id: ObjectId,
        reply: &MongoReply,
    ) -> Result<Option<MongoThread>> {
        let filter = doc! { "_id": thread_id };
        let pushed = bson::to_bson(reply)?;
        let update = doc! {
            "$push": { "replies": pushed },
            "$max": { "bumped_on": bson::DateTime::from_chrono(reply.created_on) },
        };

        let updated = self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    /// Set one field of a single embedded reply via the positional operator.
    /// Returns false when the thread/reply pair did not match.
    async fn set_reply_field(
        &self,
        thread_id: ObjectId,
        reply_id: ObjectId,
        field: &str,
        value: bson::Bson,
    ) -> Result<bool> {
        let filter = doc! { "_id": thread_id, "replies._id": reply_id };
        let mut set = bson::Document::new();
        set.insert(format!("replies.$.{field}"), value);
        let update = doc! { "$set": set };
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count > 0)
    }

    pub async fn mark_reported(&self, thread_id: ObjectId, reply_id: ObjectId) -> Result<bool> {
        self.set_reply_field(thread_id, reply_id, "reported", bson::Bson::Boolean(true))
            .await
    }

    pub async fn set_text(&self, thread_id: ObjectId, reply_id: ObjectId, text: &str) -> Result<bool> {
        self.set_reply_field(thread_id, reply_id, "text", bson::Bson::String(text.to_string()))
            .await
    }
}
