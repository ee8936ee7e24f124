use std::collections::HashMap;
use std::mem;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use safeboard_scoreboard::op::TeamProperties;
use safeboard_scoreboard::{
    AntiOverrideSettings, MembershipAuthority, ObjectiveDisplay, SafeScoreboard, ScoreboardHost,
    ScoreboardOp, ScoreboardPlugin, TeamActionKind,
};
use safeboard_text::ProtocolVersion;

pub struct ScenarioSinglePlayer {
    /// The new bevy application.
    pub app: App,
    /// Entity holding the player's [`SafeScoreboard<RecordingHost>`].
    pub player: Entity,
}

impl ScenarioSinglePlayer {
    /// Sets up an app with [`ScoreboardPlugin`] and a single player whose
    /// board records everything it sends.
    ///
    /// Reduces boilerplate in unit tests.
    pub fn new() -> Self {
        Self::with_board(SafeScoreboard::new(RecordingHost::default()))
    }

    pub fn with_board(board: SafeScoreboard<RecordingHost>) -> Self {
        let mut app = App::new();

        app.add_plugins(ScoreboardPlugin::<RecordingHost>::default());

        let player = app.world_mut().spawn(board).id();

        app.update(); // Initialize plugins.

        Self { app, player }
    }

    pub fn board(&self) -> &SafeScoreboard<RecordingHost> {
        self.app
            .world()
            .get::<SafeScoreboard<RecordingHost>>(self.player)
            .expect("player has no scoreboard")
    }

    pub fn board_mut(&mut self) -> Mut<'_, SafeScoreboard<RecordingHost>> {
        self.app
            .world_mut()
            .get_mut::<SafeScoreboard<RecordingHost>>(self.player)
            .expect("player has no scoreboard")
    }

    pub fn set_settings(&mut self, settings: AntiOverrideSettings) {
        self.app.world_mut().insert_resource(settings);
    }

    /// Takes every operation the player's board has sent so far.
    pub fn take_sent(&mut self) -> Vec<ScoreboardOp> {
        self.board_mut().host_mut().take_sent()
    }
}

impl Default for ScenarioSinglePlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`ScoreboardHost`] that keeps sent operations in memory instead of
/// writing them to a connection.
#[derive(Clone, Default, Debug)]
pub struct RecordingHost {
    pub version: ProtocolVersion,
    /// Operations in the order they were sent.
    pub sent: Vec<ScoreboardOp>,
    /// Names of objectives a handle was realized for.
    pub realized_objectives: Vec<String>,
    /// Names of teams a handle was realized for.
    pub realized_teams: Vec<String>,
}

impl RecordingHost {
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    pub fn take_sent(&mut self) -> Vec<ScoreboardOp> {
        mem::take(&mut self.sent)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct RecordedObjective {
    pub name: String,
    pub display: ObjectiveDisplay,
}

#[derive(Clone, PartialEq, Default, Debug)]
pub struct RecordedTeam {
    pub name: String,
    pub properties: Option<TeamProperties>,
    pub members: Vec<String>,
}

impl ScoreboardHost for RecordingHost {
    type Objective = RecordedObjective;
    type Team = RecordedTeam;

    fn version(&self) -> ProtocolVersion {
        self.version
    }

    fn realize_objective(&mut self, name: &str, display: &ObjectiveDisplay) -> RecordedObjective {
        self.realized_objectives.push(name.to_owned());
        RecordedObjective {
            name: name.to_owned(),
            display: display.clone(),
        }
    }

    fn sync_objective(&mut self, objective: &mut RecordedObjective, display: &ObjectiveDisplay) {
        objective.display = display.clone();
    }

    fn realize_team(&mut self, name: &str) -> RecordedTeam {
        self.realized_teams.push(name.to_owned());
        RecordedTeam {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    fn sync_team(&mut self, team: &mut RecordedTeam, properties: &TeamProperties) {
        team.properties = Some(properties.clone());
    }

    fn sync_team_members(&mut self, team: &mut RecordedTeam, members: &[String]) {
        team.members = members.to_vec();
    }

    fn send(&mut self, op: ScoreboardOp) {
        self.sent.push(op);
    }
}

/// Answers membership questions from a fixed table. Teams missing from the
/// table keep whatever members were observed.
#[derive(Clone, Default, Debug)]
pub struct FixedMembership {
    teams: HashMap<String, Vec<String>>,
}

impl FixedMembership {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_team<I, S>(mut self, team: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teams
            .insert(team.into(), members.into_iter().map(Into::into).collect());
        self
    }
}

impl MembershipAuthority for FixedMembership {
    fn members(&mut self, team: &str, _kind: TeamActionKind, observed: &[String]) -> Vec<String> {
        self.teams
            .get(team)
            .cloned()
            .unwrap_or_else(|| observed.to_vec())
    }
}
