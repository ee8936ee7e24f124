use bevy_ecs::component::{Component, StorageType};
use tracing::{debug, trace, warn};

use crate::anti_override::{AntiOverride, AntiOverrideSettings};
use crate::error::{EntityKind, ScoreboardError};
use crate::host::{KeepObservedMembers, MembershipAuthority, NotificationSink, Origin, ScoreboardHost};
use crate::op::{ObjectiveAction, ObjectiveDisplay, ScoreboardOp, TeamAction, TeamProperties};
use crate::state::ScoreboardState;
use crate::{DisplaySlot, NumberFormat, Objective, Score, Team, MAX_NAME_LENGTH};

/// A player's scoreboard.
///
/// Changes made through the board are translated into [`ScoreboardOp`]s and
/// sent through the [`ScoreboardHost`] in order. Every one of them, and every
/// foreign operation handed to [`SafeScoreboard::intercept`], is inspected by
/// the board's [`AntiOverride`] before it reaches the channel.
///
/// A board must only be used by one writer at a time.
pub struct SafeScoreboard<H: ScoreboardHost> {
    host: H,
    state: ScoreboardState<H::Objective, H::Team>,
    anti_override: AntiOverride,
    authority: Box<dyn MembershipAuthority>,
}

impl<H: ScoreboardHost> SafeScoreboard<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: ScoreboardState::new(),
            anti_override: AntiOverride::default(),
            authority: Box::new(KeepObservedMembers),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AntiOverrideSettings) -> Self {
        self.anti_override.set_settings(settings);
        self
    }

    #[must_use]
    pub fn with_membership_authority(mut self, authority: impl MembershipAuthority) -> Self {
        self.authority = Box::new(authority);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &ScoreboardState<H::Objective, H::Team> {
        &self.state
    }

    pub fn settings(&self) -> AntiOverrideSettings {
        self.anti_override.settings()
    }

    pub fn set_settings(&mut self, settings: AntiOverrideSettings) {
        self.anti_override.set_settings(settings);
    }

    /// Registers `objective` and shows it in its display slot.
    ///
    /// Fails if an objective with the same name is already registered.
    pub fn register_objective(&mut self, objective: Objective) -> Result<(), ScoreboardError> {
        if self.state.objective(objective.name()).is_some() {
            return Err(ScoreboardError::duplicate(
                EntityKind::Objective,
                objective.name(),
            ));
        }

        self.register_objective_unchecked(objective);
        Ok(())
    }

    /// Updates the title, health display and number format of an objective.
    ///
    /// An objective that is not registered yet is registered first, so this
    /// never fails.
    pub fn update_objective(&mut self, objective: Objective) {
        if self.state.objective(objective.name()).is_none() {
            debug!(
                objective = objective.name(),
                "update of unregistered objective, registering it first"
            );
            self.register_objective_unchecked(objective.clone());
        }

        let Some(entry) = self.state.objective_entry_mut(objective.name()) else {
            return;
        };

        entry.objective.title = objective.title;
        entry.objective.health_display = objective.health_display;
        entry.objective.number_format = objective.number_format;

        let display = render_objective(&self.host, &entry.objective);
        self.host.sync_objective(&mut entry.platform, &display);

        let name = entry.objective.name().to_owned();
        self.emit(ScoreboardOp::Objective {
            name,
            action: ObjectiveAction::Update(display),
        });
    }

    /// Unregisters the objective named `name` and returns it. Unknown names
    /// are ignored.
    pub fn unregister_objective(&mut self, name: &str) -> Option<Objective> {
        let Some(entry) = self.state.remove_objective(name) else {
            debug!(objective = name, "ignoring unregister of unknown objective");
            return None;
        };

        self.emit(ScoreboardOp::Objective {
            name: name.to_owned(),
            action: ObjectiveAction::Unregister,
        });

        Some(entry.objective)
    }

    /// Sends the display slot assignment for whichever of this board's
    /// objectives belongs in `slot` again. Used to take a slot back after
    /// someone else displayed their objective in it.
    ///
    /// Returns `false` if no registered objective uses `slot`.
    pub fn reassert_display_slot(&mut self, slot: DisplaySlot) -> bool {
        let Some(name) = self
            .state
            .objective_in_slot(slot)
            .map(|objective| objective.name().to_owned())
        else {
            return false;
        };

        self.emit(ScoreboardOp::DisplayObjective {
            slot,
            objective: name,
        });
        true
    }

    /// Publishes a score. The objective does not have to be registered with
    /// this board.
    pub fn set_score(&mut self, score: &Score) {
        let op = ScoreboardOp::SetScore {
            objective: score.objective.clone(),
            holder: score.holder.clone(),
            value: score.value,
            display_name: score
                .display_name
                .as_ref()
                .map(|name| self.host.render(name)),
            number_format: render_number_format(&self.host, score.number_format.as_ref()),
        };

        self.emit(op);
    }

    pub fn remove_score(&mut self, objective: &str, holder: &str) {
        self.emit(ScoreboardOp::ResetScore {
            objective: objective.to_owned(),
            holder: holder.to_owned(),
        });
    }

    /// Creates a team without showing it to the player. Populate it with
    /// [`Self::team_mut`], then call [`Self::register_team`].
    pub fn create_team(&mut self, name: &str) -> Result<&mut Team, ScoreboardError> {
        if self.state.team(name).is_some() {
            return Err(ScoreboardError::duplicate(EntityKind::Team, name));
        }

        warn_long_name(EntityKind::Team, name);

        let platform = self.host.realize_team(name);
        Ok(self.state.insert_team(Team::new(name), platform))
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.state.team(name)
    }

    pub fn team_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.state.team_mut(name)
    }

    /// Shows a created team to the player, members included.
    pub fn register_team(&mut self, name: &str) -> Result<(), ScoreboardError> {
        let Some(entry) = self.state.team_entry_mut(name) else {
            return Err(ScoreboardError::unknown(EntityKind::Team, name));
        };

        if entry.registered {
            return Err(ScoreboardError::duplicate(EntityKind::Team, name));
        }

        let properties = render_team(&self.host, &entry.team);
        let members: Vec<String> = entry.team.members().iter().cloned().collect();

        self.host.sync_team(&mut entry.platform, &properties);
        self.host.sync_team_members(&mut entry.platform, &members);
        entry.registered = true;

        self.emit(ScoreboardOp::Team {
            name: name.to_owned(),
            action: TeamAction::Create {
                properties,
                members,
            },
        });

        Ok(())
    }

    /// Sends the current properties of a registered team. Membership is not
    /// part of the update.
    pub fn update_team(&mut self, name: &str) -> Result<(), ScoreboardError> {
        let Some(entry) = self.state.team_entry_mut(name) else {
            return Err(ScoreboardError::unknown(EntityKind::Team, name));
        };

        if !entry.registered {
            return Err(ScoreboardError::inconsistent(EntityKind::Team, name));
        }

        let properties = render_team(&self.host, &entry.team);
        self.host.sync_team(&mut entry.platform, &properties);

        self.emit(ScoreboardOp::Team {
            name: name.to_owned(),
            action: TeamAction::Update { properties },
        });

        Ok(())
    }

    /// Removes a team and returns it. Teams that were never registered are
    /// dropped without sending anything. Unknown names are ignored.
    pub fn unregister_team(&mut self, name: &str) -> Option<Team> {
        let Some(entry) = self.state.remove_team(name) else {
            debug!(team = name, "ignoring unregister of unknown team");
            return None;
        };

        if entry.registered {
            self.emit(ScoreboardOp::Team {
                name: name.to_owned(),
                action: TeamAction::Remove { members: vec![] },
            });
        }

        Some(entry.team)
    }

    /// Inspects an operation someone else is about to write to this
    /// player's channel and returns the operation that should be written
    /// instead.
    ///
    /// Operations the board sends itself are inspected already and must not
    /// be passed here.
    pub fn intercept(&mut self, op: ScoreboardOp) -> ScoreboardOp {
        let op = self.anti_override.inspect(
            op,
            Origin::Foreign,
            &self.state,
            self.authority.as_mut(),
        );
        trace!(?op, "forwarding foreign scoreboard operation");
        op
    }

    pub fn has_pending_notifications(&self) -> bool {
        !self.anti_override.notifications().is_empty()
    }

    /// Delivers queued anti-override notifications to `sink`.
    pub fn flush_notifications(&mut self, sink: &mut impl NotificationSink) {
        self.anti_override.flush_notifications(sink);
    }

    /// Forgets every objective and team without sending anything. Used when
    /// the player's session ends.
    pub fn clear(&mut self) {
        self.state.clear();
        self.anti_override.clear_notifications();
    }

    fn register_objective_unchecked(&mut self, objective: Objective) {
        warn_long_name(EntityKind::Objective, objective.name());

        let display = render_objective(&self.host, &objective);
        let platform = self.host.realize_objective(objective.name(), &display);
        let name = objective.name().to_owned();
        let slot = objective.display_slot;

        self.state.insert_objective(objective, platform);

        self.emit(ScoreboardOp::Objective {
            name: name.clone(),
            action: ObjectiveAction::Register(display),
        });
        self.emit(ScoreboardOp::DisplayObjective {
            slot,
            objective: name,
        });
    }

    fn emit(&mut self, op: ScoreboardOp) {
        let op = self.anti_override.inspect(
            op,
            Origin::Local,
            &self.state,
            self.authority.as_mut(),
        );
        trace!(?op, "sending scoreboard operation");
        self.host.send(op);
    }
}

impl<H> Component for SafeScoreboard<H>
where
    H: ScoreboardHost + Send + Sync + 'static,
    H::Objective: Send + Sync + 'static,
    H::Team: Send + Sync + 'static,
{
    const STORAGE_TYPE: StorageType = StorageType::Table;
}

fn warn_long_name(kind: EntityKind, name: &str) {
    let len = name.chars().count();
    if len > MAX_NAME_LENGTH {
        warn!("{kind} name \"{name}\" is {len} characters long, clients before 1.18 only accept {MAX_NAME_LENGTH}");
    }
}

fn render_objective<H: ScoreboardHost>(host: &H, objective: &Objective) -> ObjectiveDisplay {
    ObjectiveDisplay {
        title: host.render(&objective.title),
        health_display: objective.health_display,
        number_format: render_number_format(host, objective.number_format.as_ref()),
    }
}

fn render_number_format<H: ScoreboardHost>(
    host: &H,
    format: Option<&NumberFormat>,
) -> Option<safeboard_text::Text> {
    format
        .filter(|_| host.version().supports_number_format())
        .map(|format| host.render(&format.0))
}

fn render_team<H: ScoreboardHost>(host: &H, team: &Team) -> TeamProperties {
    TeamProperties {
        display_name: host.render(&team.display_name),
        options: team.options,
        color: team.color,
        collision_rule: team.collision_rule,
        visibility: team.visibility,
        prefix: host.render(&team.prefix),
        suffix: host.render(&team.suffix),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use safeboard_text::{NamedColor, ProtocolVersion, Text};

    use super::*;
    use crate::host::{NotificationQueue, ScoreboardNotification};
    use crate::op::TeamActionKind;
    use crate::{HealthDisplay, ObjectiveActionKind, TeamOptions};

    #[derive(Default)]
    struct MockHost {
        version: ProtocolVersion,
        realized_objectives: usize,
        realized_teams: Vec<String>,
        synced_members: Vec<Vec<String>>,
        sent: Vec<ScoreboardOp>,
    }

    impl ScoreboardHost for MockHost {
        type Objective = String;
        type Team = String;

        fn version(&self) -> ProtocolVersion {
            self.version
        }

        fn realize_objective(&mut self, name: &str, _display: &ObjectiveDisplay) -> String {
            self.realized_objectives += 1;
            name.to_owned()
        }

        fn realize_team(&mut self, name: &str) -> String {
            self.realized_teams.push(name.to_owned());
            name.to_owned()
        }

        fn sync_team_members(&mut self, _team: &mut String, members: &[String]) {
            self.synced_members.push(members.to_vec());
        }

        fn send(&mut self, op: ScoreboardOp) {
            self.sent.push(op);
        }
    }

    fn board() -> SafeScoreboard<MockHost> {
        SafeScoreboard::new(MockHost::default())
    }

    fn health() -> Objective {
        Objective::new("health", "Health")
            .with_display_slot(DisplaySlot::BelowName)
            .with_health_display(HealthDisplay::Hearts)
    }

    fn red_team(board: &mut SafeScoreboard<MockHost>) {
        let team = board.create_team("red").unwrap();
        team.color = NamedColor::Red;
        team.options = TeamOptions::new()
            .with_friendly_fire(true)
            .with_see_invisible_teammates(true);
        team.set_members(["Alice", "Bob"]);
    }

    #[test]
    fn register_sends_register_then_display() {
        let mut board = board();
        board.register_objective(health()).unwrap();

        assert_eq!(
            board.host().sent,
            [
                ScoreboardOp::Objective {
                    name: "health".into(),
                    action: ObjectiveAction::Register(ObjectiveDisplay {
                        title: Text::text("Health"),
                        health_display: HealthDisplay::Hearts,
                        number_format: None,
                    }),
                },
                ScoreboardOp::DisplayObjective {
                    slot: DisplaySlot::BelowName,
                    objective: "health".into(),
                },
            ]
        );
        assert_eq!(board.host().realized_objectives, 1);
    }

    #[test]
    fn sidebar_objective_sends_exactly_two_operations() {
        let mut board = board();
        board
            .register_objective(Objective::new("health", "HP").with_display_slot(DisplaySlot::Sidebar))
            .unwrap();

        assert_eq!(
            board.host().sent,
            [
                ScoreboardOp::Objective {
                    name: "health".into(),
                    action: ObjectiveAction::Register(ObjectiveDisplay {
                        title: Text::text("HP"),
                        health_display: HealthDisplay::Integer,
                        number_format: None,
                    }),
                },
                ScoreboardOp::DisplayObjective {
                    slot: DisplaySlot::Sidebar,
                    objective: "health".into(),
                },
            ]
        );
    }

    #[test]
    fn duplicate_objective_is_rejected() {
        let mut board = board();
        board.register_objective(health()).unwrap();

        let err = board.register_objective(health()).unwrap_err();

        assert_eq!(
            err,
            ScoreboardError::DuplicateEntity {
                kind: EntityKind::Objective,
                name: "health".into(),
            }
        );
        assert_eq!(board.host().sent.len(), 2);
        assert_eq!(board.host().realized_objectives, 1);
    }

    #[test]
    fn objective_can_be_registered_again_after_unregister() {
        let mut board = board();
        board.register_objective(health()).unwrap();

        assert!(board.unregister_objective("health").is_some());
        assert!(board.state().objective("health").is_none());

        board.register_objective(health()).unwrap();
        assert_eq!(board.host().realized_objectives, 2);
    }

    #[test]
    fn unregister_unknown_objective_sends_nothing() {
        let mut board = board();

        assert!(board.unregister_objective("ghost").is_none());
        assert!(board.host().sent.is_empty());
    }

    #[test]
    fn update_of_unregistered_objective_registers_it() {
        let mut healed = board();
        healed.update_objective(health());

        let mut explicit = board();
        explicit.register_objective(health()).unwrap();
        explicit.update_objective(health());

        assert_eq!(healed.host().sent, explicit.host().sent);
        assert_eq!(healed.state().objective("health"), explicit.state().objective("health"));
        assert_eq!(healed.host().realized_objectives, explicit.host().realized_objectives);
        assert_eq!(healed.host().realized_objectives, 1);
        assert_eq!(
            healed.host().sent.last(),
            Some(&ScoreboardOp::Objective {
                name: "health".into(),
                action: ObjectiveAction::Update(ObjectiveDisplay {
                    title: Text::text("Health"),
                    health_display: HealthDisplay::Hearts,
                    number_format: None,
                }),
            })
        );
    }

    #[test]
    fn long_objective_names_are_accepted() {
        let mut board = board();
        let name = "seventeen_chars_x";
        assert_eq!(name.chars().count(), MAX_NAME_LENGTH + 1);

        board.register_objective(Objective::new(name, "Long")).unwrap();

        assert!(board.state().objective(name).is_some());
        assert_eq!(board.host().sent.len(), 2);
    }

    #[test]
    fn long_team_names_are_accepted() {
        let mut board = board();
        let name = "seventeen_team_xy";
        assert_eq!(name.chars().count(), MAX_NAME_LENGTH + 1);

        board.create_team(name).unwrap();
        board.register_team(name).unwrap();

        assert_eq!(board.host().realized_teams, [name.to_owned()]);
    }

    #[test]
    fn unflushed_notifications_stay_bounded() {
        let mut board = board();

        for _ in 0..10_000 {
            board.register_objective(health()).unwrap();
            board.unregister_objective("health");
        }

        let notifications = board.anti_override.notifications();
        assert_eq!(notifications.len(), NotificationQueue::CAPACITY);
        assert_eq!(notifications.dropped(), 30_000 - NotificationQueue::CAPACITY);

        // Oldest entries go first, the last unregister survives.
        assert_eq!(
            notifications.back(),
            Some(&ScoreboardNotification::Objective {
                action: ObjectiveActionKind::Unregister,
                objective: "health".into(),
                origin: Origin::Local,
            })
        );

        let mut sink = NotificationQueue::default();
        board.flush_notifications(&mut sink);
        assert!(!board.has_pending_notifications());
        assert_eq!(board.anti_override.notifications().dropped(), 0);
        assert_eq!(sink.len(), NotificationQueue::CAPACITY);
    }

    #[test]
    fn clear_drops_pending_notifications() {
        let mut board = board();
        board.register_objective(health()).unwrap();
        assert!(board.has_pending_notifications());

        board.clear();

        assert!(!board.has_pending_notifications());
    }

    #[test]
    fn update_keeps_display_slot() {
        let mut board = board();
        board.register_objective(health()).unwrap();

        board.update_objective(
            Objective::new("health", "Vitality").with_display_slot(DisplaySlot::Sidebar),
        );

        let objective = board.state().objective("health").unwrap();
        assert_eq!(objective.display_slot, DisplaySlot::BelowName);
        assert_eq!(objective.health_display, HealthDisplay::Integer);
        assert_eq!(board.host().sent.len(), 3);
    }

    #[test]
    fn number_format_requires_support() {
        let mut board = SafeScoreboard::new(MockHost {
            version: ProtocolVersion::V1_16,
            ..Default::default()
        });

        board.set_score(
            &Score::new("kills", "Alice", 3).with_number_format(NumberFormat("pts".into())),
        );

        assert_eq!(
            board.host().sent,
            [ScoreboardOp::SetScore {
                objective: "kills".into(),
                holder: "Alice".into(),
                value: 3,
                display_name: None,
                number_format: None,
            }]
        );
    }

    #[test]
    fn register_team_sends_single_create() {
        let mut board = board();
        red_team(&mut board);

        assert!(board.host().sent.is_empty());
        board.register_team("red").unwrap();

        let [ScoreboardOp::Team { name, action }] = &board.host().sent[..] else {
            panic!("expected one team operation, got {:?}", board.host().sent);
        };
        let TeamAction::Create {
            properties,
            members,
        } = action
        else {
            panic!("expected create, got {action:?}");
        };

        assert_eq!(name, "red");
        assert_eq!(properties.color, NamedColor::Red);
        assert_eq!(properties.options.into_bits(), 0b11);
        assert_eq!(members, &["Alice".to_owned(), "Bob".to_owned()]);
        assert_eq!(board.host().synced_members, [vec!["Alice".to_owned(), "Bob".to_owned()]]);
        assert_eq!(board.host().realized_teams, ["red"]);
        assert!(board.state().is_team_registered("red"));
    }

    #[test]
    fn update_team_leaves_membership_alone() {
        let mut board = board();
        red_team(&mut board);
        board.register_team("red").unwrap();

        board.team_mut("red").unwrap().add_member("Carol");
        board.update_team("red").unwrap();

        let Some(ScoreboardOp::Team { action, .. }) = board.host().sent.last() else {
            panic!("expected a team operation");
        };
        assert_eq!(action.kind(), TeamActionKind::Update);
        assert_eq!(action.members(), None);
        assert_eq!(board.host().synced_members.len(), 1);
    }

    #[test]
    fn team_lifecycle_errors() {
        let mut board = board();

        assert_eq!(
            board.register_team("red"),
            Err(ScoreboardError::UnknownEntity {
                kind: EntityKind::Team,
                name: "red".into(),
            })
        );

        red_team(&mut board);
        assert!(matches!(
            board.create_team("red"),
            Err(ScoreboardError::DuplicateEntity { .. })
        ));
        assert_eq!(
            board.update_team("red"),
            Err(ScoreboardError::InconsistentState {
                kind: EntityKind::Team,
                name: "red".into(),
            })
        );

        board.register_team("red").unwrap();
        assert!(matches!(
            board.register_team("red"),
            Err(ScoreboardError::DuplicateEntity { .. })
        ));
    }

    #[test]
    fn unregister_team_only_sends_for_registered_teams() {
        let mut board = board();
        red_team(&mut board);

        assert!(board.unregister_team("red").is_some());
        assert!(board.host().sent.is_empty());

        red_team(&mut board);
        board.register_team("red").unwrap();
        board.unregister_team("red").unwrap();

        assert_eq!(
            board.host().sent.last(),
            Some(&ScoreboardOp::Team {
                name: "red".into(),
                action: TeamAction::Remove { members: vec![] },
            })
        );
        assert!(board.unregister_team("red").is_none());
    }

    #[test]
    fn foreign_team_members_are_replaced() {
        let mut board = board().with_membership_authority(
            |team: &str, _kind: TeamActionKind, _observed: &[String]| {
                if team == "red" {
                    vec!["Alice".to_owned()]
                } else {
                    vec![]
                }
            },
        );

        let out = board.intercept(ScoreboardOp::Team {
            name: "red".into(),
            action: TeamAction::AddMembers {
                members: vec!["Mallory".into()],
            },
        });

        assert_eq!(
            out,
            ScoreboardOp::Team {
                name: "red".into(),
                action: TeamAction::AddMembers {
                    members: vec!["Alice".into()],
                },
            }
        );
        assert!(board.host().sent.is_empty());
    }

    #[test]
    fn foreign_display_reports_displaced_objective() {
        let mut board = board();
        board.register_objective(health()).unwrap();
        board.flush_notifications(&mut NotificationQueue::default());

        board.intercept(ScoreboardOp::DisplayObjective {
            slot: DisplaySlot::BelowName,
            objective: "foreign".into(),
        });

        let mut queue = NotificationQueue::default();
        board.flush_notifications(&mut queue);

        assert_eq!(
            *queue,
            [ScoreboardNotification::DisplayObjective {
                slot: DisplaySlot::BelowName,
                objective: "foreign".into(),
                origin: Origin::Foreign,
                displaced: Some("health".into()),
            }]
        );
        assert!(!board.has_pending_notifications());

        assert!(board.reassert_display_slot(DisplaySlot::BelowName));
        assert!(!board.reassert_display_slot(DisplaySlot::List));
    }

    #[test]
    fn local_operations_are_reported() {
        let mut board = board();
        board.register_objective(health()).unwrap();

        let mut queue = NotificationQueue::default();
        board.flush_notifications(&mut queue);

        assert_eq!(
            *queue,
            [
                ScoreboardNotification::Objective {
                    action: ObjectiveActionKind::Register,
                    objective: "health".into(),
                    origin: Origin::Local,
                },
                ScoreboardNotification::DisplayObjective {
                    slot: DisplaySlot::BelowName,
                    objective: "health".into(),
                    origin: Origin::Local,
                    displaced: None,
                },
            ]
        );
    }

    #[test]
    fn disabled_board_forwards_foreign_ops() {
        let mut board = board()
            .with_settings(AntiOverrideSettings::DISABLED)
            .with_membership_authority(
                |_team: &str, _kind: TeamActionKind, _observed: &[String]| vec![],
            );
        let op = ScoreboardOp::Team {
            name: "red".into(),
            action: TeamAction::RemoveMembers {
                members: vec!["Mallory".into()],
            },
        };

        assert_eq!(board.intercept(op.clone()), op);
        assert!(!board.has_pending_notifications());
    }
}
