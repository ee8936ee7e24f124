//! Abstract scoreboard operations.
//!
//! These are what the [`ScoreboardHost`](crate::ScoreboardHost) turns into
//! packets or API calls. They hold text already rendered for the receiving
//! client and are plain owned data, so the anti-override pass can rewrite
//! them before they are handed to the channel.

use safeboard_text::{NamedColor, Text};

use crate::{CollisionRule, DisplaySlot, HealthDisplay, NameTagVisibility, TeamOptions};

#[derive(Clone, PartialEq, Debug)]
pub enum ScoreboardOp {
    Objective {
        name: String,
        action: ObjectiveAction,
    },
    DisplayObjective {
        slot: DisplaySlot,
        objective: String,
    },
    SetScore {
        objective: String,
        holder: String,
        value: i32,
        display_name: Option<Text>,
        number_format: Option<Text>,
    },
    ResetScore {
        objective: String,
        holder: String,
    },
    Team {
        name: String,
        action: TeamAction,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub enum ObjectiveAction {
    Register(ObjectiveDisplay),
    Unregister,
    Update(ObjectiveDisplay),
}

/// Rendered properties of an objective.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectiveDisplay {
    pub title: Text,
    pub health_display: HealthDisplay,
    pub number_format: Option<Text>,
}

/// The kind of an [`ObjectiveAction`]. Ordinals match the wire values.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ObjectiveActionKind {
    Register,
    Unregister,
    Update,
}

impl ObjectiveActionKind {
    pub const VALUES: [Self; 3] = [Self::Register, Self::Unregister, Self::Update];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        if ordinal < Self::VALUES.len() {
            Some(Self::VALUES[ordinal])
        } else {
            None
        }
    }
}

impl ObjectiveAction {
    pub fn kind(&self) -> ObjectiveActionKind {
        match self {
            Self::Register(_) => ObjectiveActionKind::Register,
            Self::Unregister => ObjectiveActionKind::Unregister,
            Self::Update(_) => ObjectiveActionKind::Update,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum TeamAction {
    /// Creates the team, or replaces it, with its full member list.
    Create {
        properties: TeamProperties,
        members: Vec<String>,
    },
    Remove {
        members: Vec<String>,
    },
    /// Changes properties only. Never touches membership.
    Update {
        properties: TeamProperties,
    },
    AddMembers {
        members: Vec<String>,
    },
    RemoveMembers {
        members: Vec<String>,
    },
}

/// Rendered properties of a team.
#[derive(Clone, PartialEq, Debug)]
pub struct TeamProperties {
    pub display_name: Text,
    pub options: TeamOptions,
    pub color: NamedColor,
    pub collision_rule: CollisionRule,
    pub visibility: NameTagVisibility,
    pub prefix: Text,
    pub suffix: Text,
}

/// The kind of a [`TeamAction`]. Ordinals match the wire values.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TeamActionKind {
    Create,
    Remove,
    Update,
    AddMembers,
    RemoveMembers,
}

impl TeamActionKind {
    pub const VALUES: [Self; 5] = [
        Self::Create,
        Self::Remove,
        Self::Update,
        Self::AddMembers,
        Self::RemoveMembers,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        if ordinal < Self::VALUES.len() {
            Some(Self::VALUES[ordinal])
        } else {
            None
        }
    }

    /// Whether actions of this kind carry a member list.
    pub const fn carries_members(self) -> bool {
        !matches!(self, Self::Update)
    }
}

impl TeamAction {
    pub fn kind(&self) -> TeamActionKind {
        match self {
            Self::Create { .. } => TeamActionKind::Create,
            Self::Remove { .. } => TeamActionKind::Remove,
            Self::Update { .. } => TeamActionKind::Update,
            Self::AddMembers { .. } => TeamActionKind::AddMembers,
            Self::RemoveMembers { .. } => TeamActionKind::RemoveMembers,
        }
    }

    pub fn members(&self) -> Option<&[String]> {
        match self {
            Self::Create { members, .. }
            | Self::Remove { members }
            | Self::AddMembers { members }
            | Self::RemoveMembers { members } => Some(members),
            Self::Update { .. } => None,
        }
    }

    pub fn members_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::Create { members, .. }
            | Self::Remove { members }
            | Self::AddMembers { members }
            | Self::RemoveMembers { members } => Some(members),
            Self::Update { .. } => None,
        }
    }
}
