//! Team registry
//!
//! A team is the per-group watcher that owns deadline reminders. The
//! reminders themselves live elsewhere; this module only tracks which chats
//! have a running team and lets callers start and stop them. A new group's
//! team is registered immediately, so a leave that follows a join always
//! finds it; the "start watching" queue only notifies the runner.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::{mpsc, watch};
use tracing::{info, debug, warn};
use crate::models::Group;
use crate::utils::errors::{StandupBotError, Result};

/// Running watcher for one group
#[derive(Debug)]
pub struct Team {
    pub group: Group,
    stop_tx: watch::Sender<bool>,
}

impl Team {
    fn new(group: Group) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self { group, stop_tx }
    }

    /// Signal the team to stop; idempotent
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
        debug!(chat_id = self.group.chat_id, "Team stopped");
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }

    /// Receiver that flips to `true` once the team is stopped
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.stop_tx.subscribe()
    }
}

/// Process-wide set of running teams
#[derive(Debug)]
pub struct TeamRegistry {
    teams: RwLock<HashMap<i64, Arc<Team>>>,
    watchers: mpsc::UnboundedSender<Group>,
}

impl TeamRegistry {
    /// Create a registry and the receiving end of its "start watching" queue
    ///
    /// Feed the receiver to [`TeamRegistry::run`], or drain it by hand.
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Group>) {
        let (watchers, rx) = mpsc::unbounded_channel();
        let registry = Arc::new(Self {
            teams: RwLock::new(HashMap::new()),
            watchers,
        });
        (registry, rx)
    }

    /// Start a team for `group` and notify the runner that it must be watched
    pub fn watch(&self, group: Group) -> Result<Arc<Team>> {
        let chat_id = group.chat_id;
        let team = self.start_team(group.clone());
        self.watchers
            .send(group)
            .map_err(|_| StandupBotError::Config(format!("team queue closed, chat {} is not watched", chat_id)))?;
        Ok(team)
    }

    /// Start a team for `group`, replacing and stopping any previous one
    pub fn start_team(&self, group: Group) -> Arc<Team> {
        let chat_id = group.chat_id;
        let team = Arc::new(Team::new(group));
        let previous = match self.teams.write() {
            Ok(mut teams) => teams.insert(chat_id, Arc::clone(&team)),
            Err(poisoned) => poisoned.into_inner().insert(chat_id, Arc::clone(&team)),
        };
        if let Some(previous) = previous {
            warn!(chat_id = chat_id, "Replacing running team");
            previous.stop();
        }
        info!(chat_id = chat_id, "Team started");
        team
    }

    pub fn find_team(&self, chat_id: i64) -> Option<Arc<Team>> {
        match self.teams.read() {
            Ok(teams) => teams.get(&chat_id).cloned(),
            Err(poisoned) => poisoned.into_inner().get(&chat_id).cloned(),
        }
    }

    /// Drop the team of a chat from the registry
    pub fn forget(&self, chat_id: i64) -> Option<Arc<Team>> {
        match self.teams.write() {
            Ok(mut teams) => teams.remove(&chat_id),
            Err(poisoned) => poisoned.into_inner().remove(&chat_id),
        }
    }

    pub fn len(&self) -> usize {
        match self.teams.read() {
            Ok(teams) => teams.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Watch every group arriving on the queue until the queue closes
    ///
    /// A group whose team was stopped or forgotten before the runner got to
    /// it is skipped; the runner never starts teams itself.
    pub async fn run(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<Group>) {
        while let Some(group) = rx.recv().await {
            let chat_id = group.chat_id;
            let team = match self.find_team(chat_id) {
                Some(team) if !team.is_stopped() => team,
                _ => {
                    debug!(chat_id = chat_id, "Team gone before watching began");
                    continue;
                }
            };

            let mut stopped = team.subscribe();
            drop(team);
            tokio::spawn(async move {
                info!(chat_id = chat_id, "Watching group");
                while !*stopped.borrow_and_update() {
                    if stopped.changed().await.is_err() {
                        break;
                    }
                }
                debug!(chat_id = chat_id, "Stopped watching group");
            });
        }
        debug!("Team queue closed");
    }
}
