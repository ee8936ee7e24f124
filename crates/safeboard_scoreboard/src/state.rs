use indexmap::IndexMap;

use crate::{DisplaySlot, Objective, Team};

/// The objectives and teams one player is supposed to see, together with
/// the platform handles realized for them.
///
/// `O` and `T` are the host's objective and team handle types. A handle is
/// owned by the entry of its entity and dropped with it.
#[derive(Debug)]
pub struct ScoreboardState<O, T> {
    objectives: IndexMap<String, ObjectiveEntry<O>>,
    teams: IndexMap<String, TeamEntry<T>>,
}

#[derive(Debug)]
pub(crate) struct ObjectiveEntry<O> {
    pub(crate) objective: Objective,
    pub(crate) platform: O,
}

#[derive(Debug)]
pub(crate) struct TeamEntry<T> {
    pub(crate) team: Team,
    pub(crate) platform: T,
    pub(crate) registered: bool,
}

impl<O, T> ScoreboardState<O, T> {
    pub fn new() -> Self {
        Self {
            objectives: IndexMap::new(),
            teams: IndexMap::new(),
        }
    }

    /// Returns the registered objective named `name`.
    pub fn objective(&self, name: &str) -> Option<&Objective> {
        self.objectives.get(name).map(|entry| &entry.objective)
    }

    /// Registered objectives in registration order.
    pub fn objectives(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.values().map(|entry| &entry.objective)
    }

    /// The most recently registered objective shown in `slot`.
    pub fn objective_in_slot(&self, slot: DisplaySlot) -> Option<&Objective> {
        self.objectives
            .values()
            .rev()
            .map(|entry| &entry.objective)
            .find(|objective| objective.display_slot == slot)
    }

    /// Returns the team named `name`, registered or not.
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.get(name).map(|entry| &entry.team)
    }

    pub fn team_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.teams.get_mut(name).map(|entry| &mut entry.team)
    }

    /// Teams in creation order, registered or not.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values().map(|entry| &entry.team)
    }

    pub fn is_team_registered(&self, name: &str) -> bool {
        self.teams.get(name).is_some_and(|entry| entry.registered)
    }

    /// Drops every entity and handle. Nothing is sent.
    pub fn clear(&mut self) {
        self.objectives.clear();
        self.teams.clear();
    }

    pub(crate) fn objective_entry_mut(&mut self, name: &str) -> Option<&mut ObjectiveEntry<O>> {
        self.objectives.get_mut(name)
    }

    pub(crate) fn insert_objective(&mut self, objective: Objective, platform: O) {
        self.objectives.insert(
            objective.name().to_owned(),
            ObjectiveEntry {
                objective,
                platform,
            },
        );
    }

    pub(crate) fn remove_objective(&mut self, name: &str) -> Option<ObjectiveEntry<O>> {
        self.objectives.shift_remove(name)
    }

    pub(crate) fn team_entry_mut(&mut self, name: &str) -> Option<&mut TeamEntry<T>> {
        self.teams.get_mut(name)
    }

    pub(crate) fn insert_team(&mut self, team: Team, platform: T) -> &mut Team {
        let entry = self.teams.entry(team.name().to_owned()).or_insert(TeamEntry {
            team,
            platform,
            registered: false,
        });
        &mut entry.team
    }

    pub(crate) fn remove_team(&mut self, name: &str) -> Option<TeamEntry<T>> {
        self.teams.shift_remove(name)
    }
}

impl<O, T> Default for ScoreboardState<O, T> {
    fn default() -> Self {
        Self::new()
    }
}
