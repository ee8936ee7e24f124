#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

use std::marker::PhantomData;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

mod anti_override;
mod board;
mod error;
mod host;
mod objective;
pub mod op;
mod state;
mod team;

pub use anti_override::{AntiOverride, AntiOverrideSettings};
pub use board::SafeScoreboard;
pub use error::{EntityKind, ScoreboardError};
pub use host::{
    KeepObservedMembers, MembershipAuthority, NotificationQueue, NotificationSink, Origin,
    ScoreboardHost, ScoreboardNotification,
};
pub use objective::{DisplaySlot, HealthDisplay, NumberFormat, Objective, Score, MAX_NAME_LENGTH};
pub use op::{
    ObjectiveAction, ObjectiveActionKind, ObjectiveDisplay, ScoreboardOp, TeamAction,
    TeamActionKind, TeamProperties,
};
pub use state::ScoreboardState;
pub use team::{CollisionRule, NameTagVisibility, Team, TeamOptions};

/// Keeps every [`SafeScoreboard<H>`] component in sync with the
/// [`AntiOverrideSettings`] resource and turns their notifications into
/// [`ObjectiveObserved`] and [`DisplayObjectiveObserved`] events.
///
/// Add it once per host type.
pub struct ScoreboardPlugin<H>(PhantomData<fn() -> H>);

impl<H> Default for ScoreboardPlugin<H> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<H> Plugin for ScoreboardPlugin<H>
where
    H: ScoreboardHost + Send + Sync + 'static,
    H::Objective: Send + Sync + 'static,
    H::Team: Send + Sync + 'static,
{
    fn build(&self, app: &mut App) {
        app.init_resource::<AntiOverrideSettings>()
            .add_event::<ObjectiveObserved>()
            .add_event::<DisplayObjectiveObserved>()
            .add_systems(PreUpdate, apply_anti_override_settings::<H>)
            .add_systems(PostUpdate, send_notification_events::<H>);
    }
}

/// An objective operation was sent to `player`.
#[derive(Event, Clone, PartialEq, Eq, Debug)]
pub struct ObjectiveObserved {
    pub player: Entity,
    pub action: ObjectiveActionKind,
    pub objective: String,
    pub origin: Origin,
}

/// An objective was shown in one of `player`'s display slots.
#[derive(Event, Clone, PartialEq, Eq, Debug)]
pub struct DisplayObjectiveObserved {
    pub player: Entity,
    pub slot: DisplaySlot,
    pub objective: String,
    pub origin: Origin,
    /// The board's own objective for this slot, if another one was shown.
    pub displaced: Option<String>,
}

/// Boards pick the settings up when they are spawned and whenever the
/// resource changes.
fn apply_anti_override_settings<H>(
    settings: Res<AntiOverrideSettings>,
    mut boards: Query<&mut SafeScoreboard<H>>,
) where
    H: ScoreboardHost + Send + Sync + 'static,
    H::Objective: Send + Sync + 'static,
    H::Team: Send + Sync + 'static,
{
    for mut board in &mut boards {
        if (settings.is_changed() || board.is_added()) && board.settings() != *settings {
            board.set_settings(*settings);
        }
    }
}

fn send_notification_events<H>(
    mut boards: Query<(Entity, &mut SafeScoreboard<H>)>,
    mut objectives: EventWriter<ObjectiveObserved>,
    mut displays: EventWriter<DisplayObjectiveObserved>,
) where
    H: ScoreboardHost + Send + Sync + 'static,
    H::Objective: Send + Sync + 'static,
    H::Team: Send + Sync + 'static,
{
    for (player, mut board) in &mut boards {
        if !board.has_pending_notifications() {
            continue;
        }

        board.flush_notifications(&mut EventSink {
            player,
            objectives: &mut objectives,
            displays: &mut displays,
        });
    }
}

struct EventSink<'a, 'o, 'd> {
    player: Entity,
    objectives: &'a mut EventWriter<'o, ObjectiveObserved>,
    displays: &'a mut EventWriter<'d, DisplayObjectiveObserved>,
}

impl NotificationSink for EventSink<'_, '_, '_> {
    fn notify(&mut self, notification: ScoreboardNotification) {
        match notification {
            ScoreboardNotification::Objective {
                action,
                objective,
                origin,
            } => {
                self.objectives.send(ObjectiveObserved {
                    player: self.player,
                    action,
                    objective,
                    origin,
                });
            }
            ScoreboardNotification::DisplayObjective {
                slot,
                objective,
                origin,
                displaced,
            } => {
                self.displays.send(DisplayObjectiveObserved {
                    player: self.player,
                    slot,
                    objective,
                    origin,
                    displaced,
                });
            }
        }
    }
}
