use std::fmt;

use thiserror::Error;

/// The kind of entity an error refers to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    Objective,
    Team,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Objective => "objective",
            Self::Team => "team",
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ScoreboardError {
    #[error("{kind} \"{name}\" is already registered")]
    DuplicateEntity { kind: EntityKind, name: String },
    #[error("{kind} \"{name}\" is in a state that does not allow this operation")]
    InconsistentState { kind: EntityKind, name: String },
    #[error("no {kind} named \"{name}\"")]
    UnknownEntity { kind: EntityKind, name: String },
}

impl ScoreboardError {
    pub(crate) fn duplicate(kind: EntityKind, name: &str) -> Self {
        Self::DuplicateEntity {
            kind,
            name: name.to_owned(),
        }
    }

    pub(crate) fn inconsistent(kind: EntityKind, name: &str) -> Self {
        Self::InconsistentState {
            kind,
            name: name.to_owned(),
        }
    }

    pub(crate) fn unknown(kind: EntityKind, name: &str) -> Self {
        Self::UnknownEntity {
            kind,
            name: name.to_owned(),
        }
    }
}
