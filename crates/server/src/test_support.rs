//! Shared fixtures for server tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use gonghun_client::{ApiError, Fetcher, QueryClient};
use gonghun_core::ExpiringCache;

pub const PAGE_JSON: &str = r#"{
    "TOTAL_COUNT": 1, "PAGE_COUNT": 1, "PAGE_INDEX": 1, "COUNT_PER_PAGE": 10, "ITEM_COUNT": 1,
    "ITEMS": [{"NAME_KO": "유관순", "SEX": "0", "HUNKUK": "PSG00002", "WORKOUT_AFFIL": "UGC00003"}]
}"#;

type Request = (String, Vec<(&'static str, String)>);

/// Replays one body and counts the requests it serves.
#[derive(Default)]
pub struct StaticFetcher {
    body: String,
    calls: AtomicUsize,
    last: Mutex<Option<Request>>,
}

impl StaticFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Request> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str, params: &[(&'static str, String)]) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((url.to_string(), params.to_vec()));
        Ok(self.body.clone())
    }
}

pub fn client_replying(body: &str) -> (QueryClient, Arc<StaticFetcher>) {
    let fetcher = Arc::new(StaticFetcher { body: body.to_string(), ..Default::default() });
    let cache = ExpiringCache::new(chrono::Duration::minutes(30));
    let client = QueryClient::with_fetcher("http://localhost/opnAPI", fetcher.clone(), cache);
    (client, fetcher)
}
