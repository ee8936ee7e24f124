use bevy_ecs::event::Events;
use pretty_assertions::assert_eq;
use safeboard_scoreboard::op::{TeamAction, TeamProperties};
use safeboard_scoreboard::{
    AntiOverrideSettings, DisplayObjectiveObserved, DisplaySlot, Objective, Origin,
    SafeScoreboard, ScoreboardOp,
};
use safeboard_text::{NamedColor, Text};

use crate::testing::{FixedMembership, RecordingHost, ScenarioSinglePlayer};

fn scenario() -> ScenarioSinglePlayer {
    let board = SafeScoreboard::new(RecordingHost::default())
        .with_membership_authority(FixedMembership::new().with_team("red", ["Alice"]));

    ScenarioSinglePlayer::with_board(board)
}

fn properties() -> TeamProperties {
    TeamProperties {
        display_name: Text::text("Red"),
        options: Default::default(),
        color: NamedColor::Red,
        collision_rule: Default::default(),
        visibility: Default::default(),
        prefix: Text::default(),
        suffix: Text::default(),
    }
}

fn foreign_create(team: &str) -> ScoreboardOp {
    ScoreboardOp::Team {
        name: team.into(),
        action: TeamAction::Create {
            properties: properties(),
            members: vec!["Mallory".into()],
        },
    }
}

#[test]
fn foreign_team_members_are_corrected() {
    let mut scenario = scenario();

    let out = scenario.board_mut().intercept(foreign_create("red"));

    let ScoreboardOp::Team {
        action: TeamAction::Create { members, .. },
        ..
    } = &out
    else {
        panic!("team operation changed shape: {out:?}");
    };
    assert_eq!(members, &["Alice"]);
}

#[test]
fn teams_without_an_answer_keep_observed_members() {
    let mut scenario = scenario();

    let op = foreign_create("blue");
    assert_eq!(scenario.board_mut().intercept(op.clone()), op);
}

#[test]
fn property_updates_are_never_corrected() {
    let mut scenario = scenario();

    let op = ScoreboardOp::Team {
        name: "red".into(),
        action: TeamAction::Update {
            properties: properties(),
        },
    };

    assert_eq!(scenario.board_mut().intercept(op.clone()), op);
}

#[test]
fn local_team_operations_are_corrected_too() {
    let mut scenario = scenario();

    {
        let mut board = scenario.board_mut();
        let team = board.create_team("red").unwrap();
        team.set_members(["Alice", "Mallory"]);
        board.register_team("red").unwrap();
    }

    let sent = scenario.take_sent();
    let [ScoreboardOp::Team {
        action: TeamAction::Create { members, .. },
        ..
    }] = &sent[..]
    else {
        panic!("expected one team creation, got {sent:?}");
    };
    assert_eq!(members, &["Alice".to_owned()]);
}

#[test]
fn settings_resource_reaches_boards() {
    let mut scenario = scenario();

    scenario.set_settings(AntiOverrideSettings::DISABLED);
    scenario.app.update();

    assert_eq!(scenario.board().settings(), AntiOverrideSettings::DISABLED);

    let op = foreign_create("red");
    assert_eq!(scenario.board_mut().intercept(op.clone()), op);

    scenario.board_mut().intercept(ScoreboardOp::DisplayObjective {
        slot: DisplaySlot::Sidebar,
        objective: "foreign".into(),
    });
    assert!(!scenario.board().has_pending_notifications());
}

#[test]
fn displaced_objective_is_reported() {
    let mut scenario = scenario();

    scenario
        .board_mut()
        .register_objective(Objective::new("kills", "Kills"))
        .unwrap();
    scenario.app.update();
    scenario.take_sent();

    scenario.board_mut().intercept(ScoreboardOp::DisplayObjective {
        slot: DisplaySlot::Sidebar,
        objective: "foreign".into(),
    });
    scenario.app.update();

    let events = scenario
        .app
        .world()
        .resource::<Events<DisplayObjectiveObserved>>();
    let observed: Vec<_> = events.iter_current_update_events().cloned().collect();

    assert_eq!(
        observed,
        [DisplayObjectiveObserved {
            player: scenario.player,
            slot: DisplaySlot::Sidebar,
            objective: "foreign".into(),
            origin: Origin::Foreign,
            displaced: Some("kills".into()),
        }]
    );

    assert!(scenario.board_mut().reassert_display_slot(DisplaySlot::Sidebar));
    assert_eq!(
        scenario.take_sent(),
        [ScoreboardOp::DisplayObjective {
            slot: DisplaySlot::Sidebar,
            objective: "kills".into(),
        }]
    );
}
