use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::ReplaceOptions, Collection};

use crate::{db::Database, errors::AppResult, models::domain::AllowListEntry};

#[async_trait]
pub trait AllowListRepository: Send + Sync {
    async fn exists(&self, identity: &str) -> AppResult<bool>;
    async fn find_all(&self) -> AppResult<Vec<AllowListEntry>>;
    async fn upsert(&self, entry: AllowListEntry) -> AppResult<AllowListEntry>;
    /// Returns whether an entry was actually removed.
    async fn delete(&self, identity: &str) -> AppResult<bool>;
}

pub struct MongoAllowListRepository {
    collection: Collection<AllowListEntry>,
}

impl MongoAllowListRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.authorized_users(),
        }
    }
}

#[async_trait]
impl AllowListRepository for MongoAllowListRepository {
    async fn exists(&self, identity: &str) -> AppResult<bool> {
        let entry = self.collection.find_one(doc! { "_id": identity }).await?;
        Ok(entry.is_some())
    }

    async fn find_all(&self) -> AppResult<Vec<AllowListEntry>> {
        let cursor = self.collection.find(doc! {}).await?;
        let entries: Vec<AllowListEntry> = cursor.try_collect().await?;
        Ok(entries)
    }

    async fn upsert(&self, entry: AllowListEntry) -> AppResult<AllowListEntry> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": entry.identity.as_str() }, &entry)
            .with_options(options)
            .await?;

        Ok(entry)
    }

    async fn delete(&self, identity: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": identity })
            .await?;

        Ok(result.deleted_count > 0)
    }
}
