//! Inspection of every operation written to a player's scoreboard channel.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::host::{MembershipAuthority, NotificationQueue, NotificationSink, Origin, ScoreboardNotification};
use crate::op::ScoreboardOp;
use crate::state::ScoreboardState;

/// Turns the anti-override pass on or off for objectives and teams
/// independently. A disabled side forwards operations unchanged.
#[derive(Resource, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AntiOverrideSettings {
    /// Report objective and display slot operations.
    pub scoreboard: bool,
    /// Correct member lists of team operations.
    pub teams: bool,
}

impl Default for AntiOverrideSettings {
    fn default() -> Self {
        Self {
            scoreboard: true,
            teams: true,
        }
    }
}

impl AntiOverrideSettings {
    pub const DISABLED: Self = Self {
        scoreboard: false,
        teams: false,
    };
}

/// Per-player classifier for outbound operations.
///
/// Objective and display slot operations pass through untouched and are
/// reported to the queue. Team operations that carry members get their
/// member list replaced by the [`MembershipAuthority`]. Property-only team
/// updates are never touched: they cannot change membership.
#[derive(Debug, Default)]
pub struct AntiOverride {
    settings: AntiOverrideSettings,
    notifications: NotificationQueue,
}

impl AntiOverride {
    pub fn new(settings: AntiOverrideSettings) -> Self {
        Self {
            settings,
            notifications: NotificationQueue::default(),
        }
    }

    pub fn settings(&self) -> AntiOverrideSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: AntiOverrideSettings) {
        self.settings = settings;
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Drops undelivered notifications.
    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub fn flush_notifications(&mut self, sink: &mut impl NotificationSink) {
        self.notifications.flush(sink);
    }

    /// Classifies `op` and returns what should actually be sent.
    pub fn inspect<O, T>(
        &mut self,
        mut op: ScoreboardOp,
        origin: Origin,
        state: &ScoreboardState<O, T>,
        authority: &mut dyn MembershipAuthority,
    ) -> ScoreboardOp {
        match &mut op {
            ScoreboardOp::DisplayObjective { slot, objective } if self.settings.scoreboard => {
                let displaced = state
                    .objective_in_slot(*slot)
                    .filter(|ours| ours.name() != objective.as_str())
                    .map(|ours| ours.name().to_owned());

                self.notifications.notify(ScoreboardNotification::DisplayObjective {
                    slot: *slot,
                    objective: objective.clone(),
                    origin,
                    displaced,
                });
            }
            ScoreboardOp::Objective { name, action } if self.settings.scoreboard => {
                self.notifications.notify(ScoreboardNotification::Objective {
                    action: action.kind(),
                    objective: name.clone(),
                    origin,
                });
            }
            ScoreboardOp::Team { name, action } if self.settings.teams => {
                let kind = action.kind();

                // Property-only updates are never corrected.
                if let Some(members) = action.members_mut().filter(|_| kind.carries_members()) {
                    let corrected = authority.members(name, kind, members);
                    if corrected != *members {
                        trace!(team = %name, ?kind, ?origin, from = ?members, to = ?corrected, "corrected team members");
                    }
                    *members = corrected;
                }
            }
            _ => {}
        }

        op
    }
}
