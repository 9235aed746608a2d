use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

use crate::store::{DegreeStore, FetchOutcome, JobStore};

/// Background worker that periodically refetches jobs and degrees
pub struct Refresher {
    jobs: JobStore,
    degrees: DegreeStore,
}

impl Refresher {
    pub fn new(jobs: JobStore, degrees: DegreeStore) -> Self {
        Self { jobs, degrees }
    }

    /// Refresh every `period` until `shutdown_rx` flips to true or its sender is dropped.
    ///
    /// The first refresh happens one full period after start; startup does its own fetch.
    /// A failed fetch is logged and retried on the next tick.
    pub async fn run(&self, period: Duration, mut shutdown_rx: watch::Receiver<bool>) {
        info!("Refresher started, refreshing every {}s", period.as_secs());

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Refresher received shutdown signal, stopping");
                        break;
                    }
                }
            }
        }
    }

    /// One refresh of both stores; returns how many of the two fetches succeeded
    pub async fn refresh_once(&self) -> usize {
        let mut succeeded = 0;

        match self.jobs.fetch_jobs().await {
            Ok(FetchOutcome::Applied { count }) => {
                info!("Refresher stored {} jobs", count);
                succeeded += 1;
            }
            Ok(FetchOutcome::Stale) => succeeded += 1,
            Err(e) => error!("Refresher failed to fetch jobs: {}", e),
        }

        match self.degrees.fetch_degrees().await {
            Ok(_) => succeeded += 1,
            Err(e) => error!("Refresher failed to fetch degrees: {}", e),
        }

        succeeded
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::filter::tests::job;
    use crate::store::jobs::tests::ScriptedApi;
    use crate::store::UserFilterStore;

    fn refresher(api: ScriptedApi) -> (Refresher, JobStore) {
        let api = Arc::new(api);
        let jobs = JobStore::new(api.clone(), UserFilterStore::new());
        let degrees = DegreeStore::new(api);
        (Refresher::new(jobs.clone(), degrees), jobs)
    }

    #[tokio::test]
    async fn refresh_once_updates_jobs() {
        let (refresher, jobs) = refresher(ScriptedApi::with_jobs(vec![job(
            1,
            "Vue Developer",
            "Google",
            "Full-time",
            "Master's",
        )]));

        assert_eq!(refresher.refresh_once().await, 2);
        assert_eq!(jobs.jobs().len(), 1);
    }

    #[tokio::test]
    async fn refresh_once_survives_failures() {
        let (refresher, jobs) = refresher(ScriptedApi::failing());
        assert_eq!(refresher.refresh_once().await, 0);
        assert!(jobs.jobs().is_empty());
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let (refresher, _) = refresher(ScriptedApi::failing());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            refresher.run(Duration::from_secs(3600), shutdown_rx).await;
        });

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("refresher did not stop")
            .unwrap();
    }
}
