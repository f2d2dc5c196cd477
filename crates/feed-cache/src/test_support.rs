//! Test doubles and fixtures for the cache use cases

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_core::FeedRecord;
use tokio::sync::oneshot;
use url::Url;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::{CachedFeed, FeedStore};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReceivedMessage {
    DeleteCachedFeed,
    Insert(Vec<FeedRecord>, DateTime<Utc>),
    Retrieve,
}

type Pending<T> = Mutex<Vec<Option<oneshot::Sender<T>>>>;

/// Store that records every call and parks it until the test completes it
#[derive(Default)]
pub(crate) struct FeedStoreSpy {
    received: Mutex<Vec<ReceivedMessage>>,
    deletions: Pending<Result<()>>,
    insertions: Pending<Result<()>>,
    retrievals: Pending<Result<CachedFeed>>,
}

impl FeedStoreSpy {
    pub(crate) fn received_messages(&self) -> Vec<ReceivedMessage> {
        self.received.lock().unwrap().clone()
    }

    pub(crate) async fn wait_for_messages(&self, count: usize) {
        while self.received.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }

    pub(crate) async fn complete_deletion(&self, index: usize, result: Result<()>) {
        let _ = take_pending(&self.deletions, index).await.send(result);
    }

    pub(crate) async fn complete_insertion(&self, index: usize, result: Result<()>) {
        let _ = take_pending(&self.insertions, index).await.send(result);
    }

    pub(crate) async fn complete_retrieval(&self, index: usize, result: Result<CachedFeed>) {
        let _ = take_pending(&self.retrievals, index).await.send(result);
    }

    fn park<T>(&self, message: ReceivedMessage, slots: &Pending<T>) -> oneshot::Receiver<T> {
        let (tx, rx) = oneshot::channel();
        self.received.lock().unwrap().push(message);
        slots.lock().unwrap().push(Some(tx));
        rx
    }
}

async fn take_pending<T>(slots: &Pending<T>, index: usize) -> oneshot::Sender<T> {
    loop {
        let sender = slots.lock().unwrap().get_mut(index).and_then(Option::take);
        match sender {
            Some(sender) => return sender,
            None => tokio::task::yield_now().await,
        }
    }
}

fn abandoned() -> StoreError {
    StoreError::Corrupted("pending call abandoned by test".to_string())
}

#[async_trait]
impl FeedStore for FeedStoreSpy {
    async fn delete_cached_feed(&self) -> Result<()> {
        let rx = self.park(ReceivedMessage::DeleteCachedFeed, &self.deletions);
        rx.await.unwrap_or_else(|_| Err(abandoned()))
    }

    async fn insert(&self, feed: &[FeedRecord], timestamp: DateTime<Utc>) -> Result<()> {
        let rx = self.park(
            ReceivedMessage::Insert(feed.to_vec(), timestamp),
            &self.insertions,
        );
        rx.await.unwrap_or_else(|_| Err(abandoned()))
    }

    async fn retrieve(&self) -> Result<CachedFeed> {
        let rx = self.park(ReceivedMessage::Retrieve, &self.retrievals);
        rx.await.unwrap_or_else(|_| Err(abandoned()))
    }
}

pub(crate) fn any_error() -> StoreError {
    StoreError::Corrupted("any error".to_string())
}

pub(crate) fn unique_record() -> FeedRecord {
    FeedRecord::new(
        Uuid::new_v4(),
        Some("any description".to_string()),
        Some("any location".to_string()),
        Url::parse("https://any-url.com").unwrap(),
    )
}

pub(crate) fn unique_feed() -> Vec<FeedRecord> {
    vec![unique_record(), unique_record()]
}
