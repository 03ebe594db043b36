use std::fmt;
use std::str::FromStr;

use crate::error::ContractError;

/// Operations every registry exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    CreateMany,
    Read,
    Update,
    Delete,
    Transfer,
    List,
    FindByField,
    History,
    LatestHistory,
    Exists,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::Create,
        Operation::CreateMany,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
        Operation::Transfer,
        Operation::List,
        Operation::FindByField,
        Operation::History,
        Operation::LatestHistory,
        Operation::Exists,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::CreateMany => "CreateMany",
            Operation::Read => "Read",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::Transfer => "Transfer",
            Operation::List => "List",
            Operation::FindByField => "FindByField",
            Operation::History => "History",
            Operation::LatestHistory => "LatestHistory",
            Operation::Exists => "Exists",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ContractError::UnknownOperation(s.to_owned()))
    }
}
