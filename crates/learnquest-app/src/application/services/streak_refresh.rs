use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::RefreshStreakHandler;
use crate::application::commands::progression_commands::RefreshStreakCommand;
use learnquest_domain::learner::LearnerRepository;

/// Minute past local midnight at which the daily sweep runs. Slightly
/// offset so a completion logged at 00:00:00 lands before the check.
const RUN_MINUTE: u32 = 5;

/// Background service that re-evaluates every learner's streak once per
/// day, shortly after local midnight.
pub struct StreakRefreshService {
    learner_repo: Arc<dyn LearnerRepository>,
    handler: Arc<RefreshStreakHandler>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StreakRefreshService {
    pub fn new(
        learner_repo: Arc<dyn LearnerRepository>,
        handler: Arc<RefreshStreakHandler>,
    ) -> Self {
        Self {
            learner_repo,
            handler,
            task: Mutex::new(None),
        }
    }

    /// Start the daily loop. Idempotent: a second start is ignored.
    pub async fn start(&self) {
        let mut task = self.task.lock().await;
        if task.is_some() {
            warn!("Streak refresh service already running");
            return;
        }

        let learner_repo = Arc::clone(&self.learner_repo);
        let handler = Arc::clone(&self.handler);

        let handle = tokio::spawn(async move {
            loop {
                let now = Local::now();
                let next_run = match now
                    .date_naive()
                    .succ_opt()
                    .and_then(|d| d.and_hms_opt(0, RUN_MINUTE, 0))
                    .and_then(|dt| dt.and_local_timezone(now.timezone()).single())
                {
                    Some(next) => next,
                    None => {
                        error!("Failed to compute next streak refresh time, task exiting");
                        break;
                    }
                };

                let wait = (next_run - now)
                    .to_std()
                    .unwrap_or(std::time::Duration::from_secs(60));
                tokio::time::sleep(wait).await;

                Self::run_sweep(&learner_repo, &handler).await;
            }
        });

        *task = Some(handle);
        info!(
            "✅ Streak refresh service started (daily at 00:{:02} local)",
            RUN_MINUTE
        );
    }

    /// Run the daily check for every learner now.
    pub async fn refresh_all(&self) {
        Self::run_sweep(&self.learner_repo, &self.handler).await;
    }

    /// Stop the daily loop if it is running.
    pub async fn stop(&self) {
        let mut task = self.task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
            info!("Streak refresh service stopped");
        }
    }

    // Failures are logged per learner and do not stop the sweep.
    async fn run_sweep(learner_repo: &Arc<dyn LearnerRepository>, handler: &RefreshStreakHandler) {
        let learners = match learner_repo.find_all().await {
            Ok(learners) => learners,
            Err(e) => {
                error!("Streak refresh sweep could not list learners: {}", e);
                return;
            }
        };

        let total = learners.len();
        let mut broken = 0usize;

        for learner in learners {
            let cmd = RefreshStreakCommand {
                learner_id: learner.id().as_str().to_string(),
            };
            match handler.handle(cmd).await {
                Ok(result) if result.streak_broken => broken += 1,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "Streak refresh failed for learner {}: {}",
                        learner.id().as_str(),
                        e
                    );
                }
            }
        }

        info!(
            "[streak] daily sweep done learners={} broken={}",
            total, broken
        );
    }
}
