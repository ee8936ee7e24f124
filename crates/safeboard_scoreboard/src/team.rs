use bitfield_struct::bitfield;
use indexmap::IndexSet;
use safeboard_text::{Component, NamedColor};

/// Packed team options, in the layout the client expects.
#[bitfield(u8)]
#[derive(PartialEq, Eq, Hash)]
pub struct TeamOptions {
    pub friendly_fire: bool,
    pub see_invisible_teammates: bool,
    #[bits(6)]
    _pad: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum CollisionRule {
    #[default]
    Always,
    Never,
    PushOtherTeams,
    PushOwnTeam,
}

impl CollisionRule {
    pub const VALUES: [Self; 4] = [
        Self::Always,
        Self::Never,
        Self::PushOtherTeams,
        Self::PushOwnTeam,
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

    /// Name used for the rule in the team packet.
    pub const fn name(self) -> &'static str {
        ["always", "never", "pushOtherTeams", "pushOwnTeam"][self as usize]
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum NameTagVisibility {
    #[default]
    Always,
    Never,
    HideForOtherTeams,
    HideForOwnTeam,
}

impl NameTagVisibility {
    pub const VALUES: [Self; 4] = [
        Self::Always,
        Self::Never,
        Self::HideForOtherTeams,
        Self::HideForOwnTeam,
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

    /// Name used for the visibility in the team packet.
    pub const fn name(self) -> &'static str {
        ["always", "never", "hideForOtherTeams", "hideForOwnTeam"][self as usize]
    }
}

/// A team as the server wants the player to see it.
///
/// Teams are created with
/// [`SafeScoreboard::create_team`](crate::SafeScoreboard::create_team),
/// populated through
/// [`SafeScoreboard::team_mut`](crate::SafeScoreboard::team_mut) and only
/// become visible once registered.
#[derive(Clone, PartialEq, Debug)]
pub struct Team {
    name: String,
    pub display_name: Component,
    pub prefix: Component,
    pub suffix: Component,
    pub color: NamedColor,
    pub options: TeamOptions,
    pub collision_rule: CollisionRule,
    pub visibility: NameTagVisibility,
    members: IndexSet<String>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: Component::from(name.clone()),
            name,
            prefix: Component::default(),
            suffix: Component::default(),
            color: NamedColor::White,
            options: TeamOptions::new(),
            collision_rule: CollisionRule::default(),
            visibility: NameTagVisibility::default(),
            members: IndexSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in insertion order.
    pub fn members(&self) -> &IndexSet<String> {
        &self.members
    }

    /// Returns `true` if the member was not already present.
    pub fn add_member(&mut self, holder: impl Into<String>) -> bool {
        self.members.insert(holder.into())
    }

    /// Returns `true` if the member was present.
    pub fn remove_member(&mut self, holder: &str) -> bool {
        self.members.shift_remove(holder)
    }

    pub fn set_members<I, S>(&mut self, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
    }
}
