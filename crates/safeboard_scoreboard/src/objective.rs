use safeboard_text::Component;

/// Objectives and teams with names longer than this are rejected by older
/// clients. Longer names are allowed but logged.
pub const MAX_NAME_LENGTH: usize = 16;

/// Where an objective is shown on the client.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum DisplaySlot {
    /// Next to the player's name in the player list.
    List,
    /// On the right side of the screen.
    #[default]
    Sidebar,
    /// Below the player's name tag.
    BelowName,
}

impl DisplaySlot {
    /// Every slot, indexed by its wire ordinal.
    pub const VALUES: [Self; 3] = [Self::List, Self::Sidebar, Self::BelowName];

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

/// How scores of an objective are rendered.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum HealthDisplay {
    /// Display the value as a number.
    #[default]
    Integer,
    /// Display the value as hearts.
    Hearts,
}

impl HealthDisplay {
    pub const VALUES: [Self; 2] = [Self::Integer, Self::Hearts];

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

/// Replaces the rendered number of a score with fixed text. Only shown to
/// 1.20.3+ clients; older clients render the number.
#[derive(Clone, PartialEq, Debug)]
pub struct NumberFormat(pub Component);

/// A named objective as the server wants the player to see it.
#[derive(Clone, PartialEq, Debug)]
pub struct Objective {
    name: String,
    pub title: Component,
    pub display_slot: DisplaySlot,
    pub health_display: HealthDisplay,
    pub number_format: Option<NumberFormat>,
}

impl Objective {
    pub fn new(name: impl Into<String>, title: impl Into<Component>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            display_slot: DisplaySlot::default(),
            health_display: HealthDisplay::default(),
            number_format: None,
        }
    }

    /// The identity of the objective. Fixed for the objective's lifetime.
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn with_display_slot(mut self, slot: DisplaySlot) -> Self {
        self.display_slot = slot;
        self
    }

    #[must_use]
    pub fn with_health_display(mut self, health_display: HealthDisplay) -> Self {
        self.health_display = health_display;
        self
    }

    #[must_use]
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = Some(format);
        self
    }
}

/// A value published for a holder in an objective.
///
/// Scores have no lifecycle of their own. Setting one publishes the value,
/// removing one deletes the association.
#[derive(Clone, PartialEq, Debug)]
pub struct Score {
    pub objective: String,
    pub holder: String,
    pub value: i32,
    pub display_name: Option<Component>,
    pub number_format: Option<NumberFormat>,
}

impl Score {
    pub fn new(objective: impl Into<String>, holder: impl Into<String>, value: i32) -> Self {
        Self {
            objective: objective.into(),
            holder: holder.into(),
            value,
            display_name: None,
            number_format: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Component>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = Some(format);
        self
    }
}
