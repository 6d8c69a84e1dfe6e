use log::{info, warn};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::modules::models::general::establish_connection;
use crate::modules::models::swimmer::Swimmer;

/// ages drift off dates of birth one swimmer at a time, so a nightly sweep
/// keeps the roster honest
pub async fn recompute_ages() {
    let conn = &mut establish_connection();
    match Swimmer::recompute_ages(conn) {
        Ok(updated) => {
            info!(target:"cron_jobs:recompute_ages", "updated {} ages", updated);
        }
        Err(err) => {
            warn!(target:"cron_jobs:recompute_ages", "failed recomputing ages: {}", err);
        }
    }
}

pub async fn register_cron_jobs() {
    let scheduler = JobScheduler::new().await.unwrap();

    // run every night at 04:00
    let j = Job::new_async("0 0 4 * * *", |_uuid, _l| {
        Box::pin(async {
            recompute_ages().await;
        })
    })
    .unwrap();
    scheduler.add(j).await.unwrap();
    scheduler.start().await.unwrap();
}
