//! Serialized access to a running session.
//!
//! [`GameService`] moves a [`GameController`] onto its own Tokio task and
//! feeds it [`Command`]s from a bounded queue, one at a time. A day
//! advance awaits its event inside the task, so no other command can
//! slip between the growth step and the event merge.
//!
//! Advisor calls that do not need exclusive access run off-task:
//!
//! - **Planting**: the task checks the request, spawns the tip fetch, and
//!   the tip re-enters the queue as [`Command::CommitPlanting`], where
//!   affordability is checked again.
//! - **Chat**: answered against the state at the time of the question.
//!
//! After every command that touched the state the task publishes a fresh
//! [`SessionSnapshot`] on a `watch` channel. Readers and the observer's
//! `WebSocket` feed use it and never wait on the queue.

use std::sync::Arc;

use sprout_types::{GameState, PlantKind};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::advisor::{self, Advisor};
use crate::controller::{GameController, SessionSnapshot};
use crate::error::GameError;
use crate::intents::IntentOutcome;

/// Capacity of the command queue.
const COMMAND_QUEUE_CAPACITY: usize = 64;

/// Reply carrying the post-intent state.
type StateReply = oneshot::Sender<Result<GameState, GameError>>;

/// A request to the game service task.
#[derive(Debug)]
pub enum Command {
    /// Advance one day.
    AdvanceDay {
        /// Receives the state after the day advance.
        reply: StateReply,
    },
    /// Start planting; the commit follows once the tip arrives.
    PlantSeed {
        /// Target plot.
        slot: u32,
        /// Plant to sow.
        plant: PlantKind,
        /// Receives the state after the request was checked.
        reply: StateReply,
    },
    /// Finish a planting started by [`Command::PlantSeed`].
    CommitPlanting {
        /// Target plot.
        slot: u32,
        /// Plant to sow.
        plant: PlantKind,
        /// Tip to log before sowing.
        tip: String,
    },
    /// Water a plot.
    Water {
        /// Target plot.
        slot: u32,
        /// Receives the post-intent state.
        reply: StateReply,
    },
    /// Harvest a plot.
    Harvest {
        /// Target plot.
        slot: u32,
        /// Receives the post-intent state.
        reply: StateReply,
    },
    /// Clear a plot.
    Remove {
        /// Target plot.
        slot: u32,
        /// Receives the post-intent state.
        reply: StateReply,
    },
    /// Refill the shared water supply.
    BuyWater {
        /// Receives the post-intent state.
        reply: StateReply,
    },
    /// Ask the advisor a question.
    Chat {
        /// The player's question.
        question: String,
        /// Receives the answer (or the canned fallback).
        reply: oneshot::Sender<String>,
    },
}

/// Cloneable client for a running [`GameService`].
///
/// The service stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct GameHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl GameHandle {
    /// The latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// The latest published game state.
    pub fn state(&self) -> GameState {
        self.snapshots.borrow().state.clone()
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Advance one day and return the resulting state.
    pub async fn advance_day(&self) -> Result<GameState, GameError> {
        self.request(|reply| Command::AdvanceDay { reply }).await?
    }

    /// Request planting. Returns once the request was checked; the tip
    /// and the commit arrive later as a separate state change.
    pub async fn plant_seed(&self, slot: u32, plant: PlantKind) -> Result<GameState, GameError> {
        self.request(|reply| Command::PlantSeed { slot, plant, reply })
            .await?
    }

    /// Water a plot.
    pub async fn water(&self, slot: u32) -> Result<GameState, GameError> {
        self.request(|reply| Command::Water { slot, reply }).await?
    }

    /// Harvest a plot.
    pub async fn harvest(&self, slot: u32) -> Result<GameState, GameError> {
        self.request(|reply| Command::Harvest { slot, reply }).await?
    }

    /// Clear a plot.
    pub async fn remove(&self, slot: u32) -> Result<GameState, GameError> {
        self.request(|reply| Command::Remove { slot, reply }).await?
    }

    /// Buy a water refill.
    pub async fn buy_water(&self) -> Result<GameState, GameError> {
        self.request(|reply| Command::BuyWater { reply }).await?
    }

    /// Ask the advisor a question.
    pub async fn chat(&self, question: impl Into<String>) -> Result<String, GameError> {
        let question = question.into();
        self.request(|reply| Command::Chat { question, reply }).await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, GameError> {
        let (reply, response) = oneshot::channel();
        if self.commands.send(build(reply)).await.is_err() {
            return Err(GameError::ServiceStopped);
        }
        response.await.or(Err(GameError::ServiceStopped))
    }
}

/// Runs a [`GameController`] on a dedicated task.
#[derive(Debug)]
pub struct GameService<A> {
    controller: GameController<A>,
    commands: mpsc::Receiver<Command>,
    requeue: mpsc::WeakSender<Command>,
    snapshots: watch::Sender<SessionSnapshot>,
    revision: u64,
}

impl<A: Advisor> GameService<A> {
    /// Spawn the service task and return a handle to it.
    pub fn spawn(controller: GameController<A>) -> (GameHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot(0));
        let service = Self {
            controller,
            commands: rx,
            requeue: tx.downgrade(),
            snapshots: snapshot_tx,
            revision: 0,
        };
        let task = tokio::spawn(service.run());
        let handle = GameHandle {
            commands: tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        info!("Game service started");
        while let Some(command) = self.commands.recv().await {
            self.handle(command).await;
        }
        info!(revision = self.revision, "Game service stopped");
    }

    fn publish(&mut self) {
        self.revision = self.revision.saturating_add(1);
        let snapshot = self.controller.snapshot(self.revision);
        self.snapshots.send_replace(snapshot);
    }

    /// Process one command, publishing before any reply goes out.
    async fn handle(&mut self, command: Command) {
        match command {
            Command::AdvanceDay { reply } => {
                self.controller.advance_day().await;
                self.respond(reply, Ok(IntentOutcome::Applied))
            }
            Command::PlantSeed { slot, plant, reply } => {
                let outcome = self.controller.begin_planting(slot, plant);
                if outcome == Ok(IntentOutcome::Pending) {
                    self.fetch_tip(slot, plant);
                }
                self.respond(reply, outcome)
            }
            Command::CommitPlanting { slot, plant, tip } => {
                match self.controller.commit_planting(slot, plant, &tip) {
                    Ok(outcome) => {
                        debug!(slot, %plant, ?outcome, "Planting committed");
                        self.publish();
                    }
                    Err(e) => warn!(slot, %plant, error = %e, "Planting commit refused"),
                }
            }
            Command::Water { slot, reply } => {
                let outcome = self.controller.water(slot);
                self.respond(reply, outcome)
            }
            Command::Harvest { slot, reply } => {
                let outcome = self.controller.harvest(slot);
                self.respond(reply, outcome)
            }
            Command::Remove { slot, reply } => {
                let outcome = self.controller.remove(slot);
                self.respond(reply, outcome)
            }
            Command::BuyWater { reply } => {
                let outcome = self.controller.buy_water();
                self.respond(reply, Ok(outcome))
            }
            Command::Chat { question, reply } => {
                self.answer(question, reply);
            }
        }
    }

    /// Publish if the intent was accepted, then send the post-intent state.
    fn respond(&mut self, reply: StateReply, outcome: Result<IntentOutcome, GameError>) {
        if outcome.is_ok() {
            self.publish();
        }
        let response = outcome.map(|_| self.controller.state().clone());
        // The caller may have gone away; the change stands regardless.
        let _ = reply.send(response);
    }

    fn fetch_tip(&self, slot: u32, plant: PlantKind) {
        let advisor = Arc::clone(self.controller.advisor());
        let deadline = self.controller.deadlines().tip_timeout();
        let requeue = self.requeue.clone();
        tokio::spawn(async move {
            let tip = advisor::tip_or_fallback(advisor.as_ref(), plant, deadline).await;
            let Some(commands) = requeue.upgrade() else {
                debug!(slot, %plant, "Service stopped before planting tip arrived");
                return;
            };
            if commands
                .send(Command::CommitPlanting { slot, plant, tip })
                .await
                .is_err()
            {
                debug!(slot, %plant, "Service stopped before planting commit");
            }
        });
    }

    fn answer(&self, question: String, reply: oneshot::Sender<String>) {
        let advisor = Arc::clone(self.controller.advisor());
        let deadline = self.controller.deadlines().chat_timeout();
        let state = self.controller.state().clone();
        tokio::spawn(async move {
            let answer =
                advisor::chat_or_fallback(advisor.as_ref(), &question, &state, deadline).await;
            let _ = reply.send(answer);
        });
    }
}
