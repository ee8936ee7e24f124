use std::collections::VecDeque;

use derive_more::Deref;
use safeboard_text::{Component, ProtocolVersion, Text};
use tracing::{debug, warn};

use crate::op::{ObjectiveActionKind, ObjectiveDisplay, ScoreboardOp, TeamActionKind, TeamProperties};
use crate::DisplaySlot;

/// Everything [`SafeScoreboard`](crate::SafeScoreboard) needs from the
/// platform a player is connected through.
///
/// Implemented once per platform. The board never sees concrete platform
/// types, only the handles this trait hands out.
pub trait ScoreboardHost {
    /// Platform representation of a registered objective.
    type Objective;
    /// Platform representation of a created team.
    type Team;

    /// Protocol version of the player. Text is rendered for this version.
    fn version(&self) -> ProtocolVersion;

    /// Renders a component for this player. Must be free of side effects.
    fn render(&self, component: &Component) -> Text {
        component.convert(self.version()).into_owned()
    }

    /// Creates the platform objective. Called once per registration.
    fn realize_objective(&mut self, name: &str, display: &ObjectiveDisplay) -> Self::Objective;

    /// Copies changed objective properties onto the platform objective.
    fn sync_objective(&mut self, objective: &mut Self::Objective, display: &ObjectiveDisplay) {
        let _ = (objective, display);
    }

    /// Creates the platform team. Called once per team, before any operation
    /// referencing it is sent.
    fn realize_team(&mut self, name: &str) -> Self::Team;

    /// Copies team properties onto the platform team.
    fn sync_team(&mut self, team: &mut Self::Team, properties: &TeamProperties) {
        let _ = (team, properties);
    }

    /// Copies the full member list onto the platform team.
    fn sync_team_members(&mut self, team: &mut Self::Team, members: &[String]) {
        let _ = (team, members);
    }

    /// Transmits an operation. Operations must reach the player in the order
    /// they are sent.
    fn send(&mut self, op: ScoreboardOp);
}

/// Decides the member list of team operations that carry one.
pub trait MembershipAuthority: Send + Sync + 'static {
    /// Returns the members that should be sent for `team` instead of
    /// `observed`.
    fn members(&mut self, team: &str, kind: TeamActionKind, observed: &[String]) -> Vec<String>;
}

/// Leaves member lists as they are.
#[derive(Copy, Clone, Default, Debug)]
pub struct KeepObservedMembers;

impl MembershipAuthority for KeepObservedMembers {
    fn members(&mut self, _team: &str, _kind: TeamActionKind, observed: &[String]) -> Vec<String> {
        observed.to_vec()
    }
}

impl<F> MembershipAuthority for F
where
    F: FnMut(&str, TeamActionKind, &[String]) -> Vec<String> + Send + Sync + 'static,
{
    fn members(&mut self, team: &str, kind: TeamActionKind, observed: &[String]) -> Vec<String> {
        self(team, kind, observed)
    }
}

/// Where an operation came from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Origin {
    /// Emitted by the board itself.
    Local,
    /// Written to the channel by someone else.
    Foreign,
}

/// Objective activity seen by the anti-override pass.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ScoreboardNotification {
    Objective {
        action: ObjectiveActionKind,
        objective: String,
        origin: Origin,
    },
    DisplayObjective {
        slot: DisplaySlot,
        objective: String,
        origin: Origin,
        /// Name of the objective the board itself has in this slot, if it is
        /// not the one being displayed.
        displaced: Option<String>,
    },
}

/// Receives anti-override notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: ScoreboardNotification);
}

/// Notifications waiting to be delivered to a [`NotificationSink`].
///
/// Holds at most [`NotificationQueue::CAPACITY`] entries. When nothing
/// flushes the queue the oldest notifications are dropped.
#[derive(Clone, Default, Debug, Deref)]
pub struct NotificationQueue {
    #[deref]
    queue: VecDeque<ScoreboardNotification>,
    dropped: usize,
}

impl NotificationQueue {
    pub const CAPACITY: usize = 256;

    /// Number of notifications discarded since the last flush.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Delivers every queued notification to `sink`, oldest first.
    pub fn flush(&mut self, sink: &mut impl NotificationSink) {
        if self.dropped > 0 {
            debug!(dropped = self.dropped, "scoreboard notifications were dropped before flush");
            self.dropped = 0;
        }

        for notification in self.queue.drain(..) {
            sink.notify(notification);
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.dropped = 0;
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&mut self, notification: ScoreboardNotification) {
        if self.queue.len() == Self::CAPACITY {
            if self.dropped == 0 {
                warn!(
                    capacity = Self::CAPACITY,
                    "scoreboard notification queue is full, dropping the oldest entries"
                );
            }
            self.queue.pop_front();
            self.dropped += 1;
        }
        self.queue.push_back(notification);
    }
}
