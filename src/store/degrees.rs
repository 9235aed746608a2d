use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{FetchOutcome, FetchedValue, Snapshot};
use crate::client::{self, JobsApi};
use crate::models::Degree;

/// Holds the degree levels offered by the jobs API
#[derive(Clone)]
pub struct DegreeStore {
    api: Arc<dyn JobsApi>,
    degrees: FetchedValue<Vec<Degree>>,
}

impl DegreeStore {
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        Self {
            api,
            degrees: FetchedValue::new(),
        }
    }

    /// Fetch the degree list and replace the stored one.
    ///
    /// On error the previous list is kept.
    pub async fn fetch_degrees(&self) -> client::Result<FetchOutcome> {
        let ticket = self.degrees.issue_ticket();
        debug!("Fetching degrees (ticket {})", ticket);

        let degrees = match self.api.fetch_degrees().await {
            Ok(degrees) => degrees,
            Err(e) => {
                warn!("Fetching degrees failed, keeping previous list: {}", e);
                return Err(e);
            }
        };
        let count = degrees.len();

        if self.degrees.apply(ticket, degrees) {
            info!("Stored {} degrees", count);
            Ok(FetchOutcome::Applied { count })
        } else {
            debug!("Dropped stale degrees response (ticket {})", ticket);
            Ok(FetchOutcome::Stale)
        }
    }

    pub fn degrees(&self) -> Arc<Vec<Degree>> {
        self.degrees.value()
    }

    pub fn set_degrees(&self, degrees: Vec<Degree>) {
        self.degrees.replace(degrees);
    }

    pub fn snapshot(&self) -> Snapshot<Vec<Degree>> {
        self.degrees.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<Vec<Degree>>> {
        self.degrees.subscribe()
    }

    /// Degree names in fetch order, without repeats
    pub fn unique_degrees(&self) -> Vec<String> {
        let degrees = self.degrees.value();
        let mut seen = HashSet::new();
        degrees
            .iter()
            .filter(|d| seen.insert(d.degree.as_str()))
            .map(|d| d.degree.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::models::Job;
    use crate::store::jobs::tests::ScriptedApi;

    /// Holds the first degrees call open until released so a second call can overtake it
    #[derive(Default)]
    struct GatedApi {
        calls: AtomicUsize,
        first_started: Notify,
        release_first: Notify,
    }

    #[async_trait]
    impl JobsApi for GatedApi {
        async fn fetch_jobs(&self) -> client::Result<Vec<Job>> {
            Ok(vec![])
        }

        async fn fetch_degrees(&self) -> client::Result<Vec<Degree>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.first_started.notify_one();
                self.release_first.notified().await;
                Ok(vec![degree(1, "Associate")])
            } else {
                Ok(vec![degree(2, "Master's"), degree(3, "Ph.D.")])
            }
        }
    }

    fn degree(id: u64, name: &str) -> Degree {
        Degree {
            id,
            degree: name.to_string(),
        }
    }

    #[tokio::test]
    async fn fetch_stores_degrees() {
        let api = ScriptedApi::with_degrees(vec![degree(1, "Master's"), degree(2, "Ph.D.")]);
        let store = DegreeStore::new(Arc::new(api));

        let outcome = store.fetch_degrees().await.unwrap();

        assert_eq!(outcome, FetchOutcome::Applied { count: 2 });
        assert_eq!(store.degrees().len(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_degrees() {
        let store = DegreeStore::new(Arc::new(ScriptedApi::failing()));
        store.set_degrees(vec![degree(1, "Master's")]);

        assert!(store.fetch_degrees().await.is_err());
        assert_eq!(*store.degrees(), vec![degree(1, "Master's")]);
    }

    #[test]
    fn unique_degrees_keeps_first_occurrence_order() {
        let store = DegreeStore::new(Arc::new(ScriptedApi::failing()));
        store.set_degrees(vec![
            degree(1, "Master's"),
            degree(2, "Bachelor's"),
            degree(3, "Master's"),
        ]);

        assert_eq!(store.unique_degrees(), vec!["Master's", "Bachelor's"]);
    }

    #[tokio::test]
    async fn slower_earlier_fetch_does_not_overwrite_newer_one() {
        let api = Arc::new(GatedApi::default());
        let store = DegreeStore::new(api.clone());

        let slow = {
            let store = store.clone();
            tokio::spawn(async move { store.fetch_degrees().await })
        };
        api.first_started.notified().await;

        let fast = store.fetch_degrees().await.unwrap();
        api.release_first.notify_one();
        let slow = slow.await.unwrap().unwrap();

        assert_eq!(fast, FetchOutcome::Applied { count: 2 });
        assert_eq!(slow, FetchOutcome::Stale);
        assert_eq!(store.unique_degrees(), vec!["Master's", "Ph.D."]);
    }
}
