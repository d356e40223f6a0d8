use mongodb::{Client, Collection, bson::doc, bson::oid::ObjectId};
use futures::TryStreamExt;

use crate::dbs::mongo::models::MongoThread;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoThreadRepository {
    collection: Collection<MongoThread>,
}

impl MongoThreadRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("threads");
        Self { collection }
    }

    pub async fn insert_thread(&self, thread: &MongoThread) -> Result<()> {
        self.collection.insert_one(thread).await?;
        Ok(())
    }

    /// Get thread by ID
    pub async fn get_thread(&self, thread_id: ObjectId) -> Result<Option<MongoThread>> {
        let filter = doc! { "_id": thread_id };
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn exists(&self, thread_id: ObjectId) -> Result<bool> {
        let count = self
            .collection
            .count_documents(doc! { "_id": thread_id })
            .await?;
        Ok(count > 0)
    }

    /// List threads on a board, most recently bumped first
    pub async fn list_threads(&self, board: &str, limit: i64) -> Result<Vec<MongoThread>> {
        let filter = doc! { "board": board };
        let threads = self
            .collection
            .find(filter)
            .sort(doc! { "bumped_on": -1, "_id": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(threads)
    }

    /// Set the reported flag. Returns false when no thread matched.
    pub async fn mark_reported(&self, thread_id: ObjectId) -> Result<bool> {
        let filter = doc! { "_id": thread_id };
        let update = doc! { "$set": { "reported": true } };
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count > 0)
    }

    /// Delete thread (embedded replies go with it). Returns false when nothing was deleted.
    pub async fn delete_thread(&self, thread_id: ObjectId) -> Result<bool> {
        let filter = doc! { "_id": thread_id };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }
}
