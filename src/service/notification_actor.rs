use crate::error::AdhanError;
use crate::service::notification_loop::{CycleOutcome, NotificationLoop};

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How long `shutdown` waits for an in-flight cycle before killing the actor.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum NotificationActorMessage {
    /// Poll timer fired; run a cycle and schedule the next one.
    Tick,
    /// Run a cycle immediately, outside the timer, and report its outcome.
    RunNow(RpcReplyPort<CycleOutcome>),
}

/// Handle owning the background notification actor.
pub struct NotificationHandle {
    actor: ActorRef<NotificationActorMessage>,
    join: JoinHandle<()>,
}

impl NotificationHandle {
    /// Run one cycle now and wait for its outcome.
    pub async fn run_now(&self) -> Result<CycleOutcome, AdhanError> {
        ractor::call!(self.actor, NotificationActorMessage::RunNow)
            .map_err(|e| AdhanError::RactorError(format!("RunNow RPC failed: {e}")))
    }

    /// Stop polling. A cycle in progress gets a short grace period to finish
    /// (it may be sleeping through a cooldown) before the actor is killed.
    pub async fn shutdown(self) {
        self.actor.stop(Some("shutdown".to_string()));
        let mut join = self.join;
        if tokio::time::timeout(SHUTDOWN_GRACE, &mut join).await.is_err() {
            warn!("notification actor did not stop in time; killing it");
            self.actor.kill();
            let _ = join.await;
        }
        info!("notification actor stopped");
    }
}

struct NotificationActorState {
    job: NotificationLoop,
    poll_interval: Duration,
}

struct NotificationActor;

#[ractor::async_trait]
impl Actor for NotificationActor {
    type Msg = NotificationActorMessage;
    type State = NotificationActorState;
    type Arguments = (NotificationLoop, Duration);

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        (job, poll_interval): Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!(
            poll_interval_secs = poll_interval.as_secs_f64(),
            "NotificationActor started"
        );
        myself.send_after(poll_interval, || NotificationActorMessage::Tick);
        Ok(NotificationActorState { job, poll_interval })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            NotificationActorMessage::Tick => {
                let outcome = state.job.run_cycle().await;
                debug!(?outcome, "notification cycle finished");
                myself.send_after(state.poll_interval, || NotificationActorMessage::Tick);
            }
            NotificationActorMessage::RunNow(reply) => {
                let outcome = state.job.run_cycle().await;
                let _ = reply.send(outcome);
            }
        }
        Ok(())
    }
}

/// Start the background notification actor. The first cycle runs one
/// `poll_interval` after start.
pub async fn spawn(
    job: NotificationLoop,
    poll_interval: Duration,
) -> Result<NotificationHandle, AdhanError> {
    let (actor, join) = Actor::spawn(None, NotificationActor, (job, poll_interval))
        .await
        .map_err(|e| AdhanError::RactorError(format!("spawn NotificationActor failed: {e}")))?;
    Ok(NotificationHandle { actor, join })
}
