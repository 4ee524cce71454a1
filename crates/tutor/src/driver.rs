use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, instrument};

use crate::clock::Clock;
use crate::session::{SessionController, SessionSettings, SessionSnapshot};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("practice session is closed")]
    Closed,
}

#[derive(Debug)]
enum Command {
    Configure(SessionSettings),
    PhysicalKey(char),
    KeyClick(String),
    Snapshot(oneshot::Sender<SessionSnapshot>),
}

/// Runs a [`SessionController`] on a tokio task, sleeping until its pause
/// windows close and applying input as it arrives.
pub struct SessionDriver;

impl SessionDriver {
    #[instrument(skip_all)]
    pub fn spawn<C: Clock + 'static>(controller: SessionController<C>) -> SessionHandle {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(controller.snapshot());
        let task = tokio::spawn(run(controller, receiver, publisher));
        info!("session driver started");
        SessionHandle {
            commands,
            snapshots,
            task: Some(task),
        }
    }
}

async fn run<C: Clock>(
    mut controller: SessionController<C>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    publisher: watch::Sender<SessionSnapshot>,
) {
    loop {
        let deadline = controller.next_deadline();
        let wake = deadline.map(Instant::from_std).unwrap_or_else(Instant::now);
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => apply(&mut controller, command),
                None => break,
            },
            _ = sleep_until(wake), if deadline.is_some() => {
                controller.poll_timers();
            }
        }
        publisher.send_replace(controller.snapshot());
    }
    controller.teardown();
}

fn apply<C: Clock>(controller: &mut SessionController<C>, command: Command) {
    match command {
        Command::Configure(settings) => controller.configure(settings),
        Command::PhysicalKey(key) => {
            let outcome = controller.handle_physical_key(key);
            debug!(?key, ?outcome, "physical key");
        }
        Command::KeyClick(pitch_name) => {
            let outcome = controller.handle_key_click(&pitch_name);
            debug!(%pitch_name, ?outcome, "key click");
        }
        Command::Snapshot(reply) => {
            controller.poll_timers();
            let _ = reply.send(controller.snapshot());
        }
    }
}

/// The host's subscription to a running session. Dropping it, or calling
/// [`SessionHandle::shutdown`], stops the session and cancels any pending
/// pause window.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl SessionHandle {
    pub fn configure(&self, settings: SessionSettings) -> Result<(), SessionError> {
        self.send(Command::Configure(settings))
    }

    pub fn physical_key(&self, key: char) -> Result<(), SessionError> {
        self.send(Command::PhysicalKey(key))
    }

    pub fn key_click(&self, pitch_name: impl Into<String>) -> Result<(), SessionError> {
        self.send(Command::KeyClick(pitch_name.into()))
    }

    /// Last snapshot published after an input or a closed window.
    pub fn latest(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A snapshot taken now, with an up-to-date elapsed time.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Receiver notified whenever the session publishes a new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub async fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("session driver stopped");
        }
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
