//! Closed set of dispatchable operations and the allow-list gating them

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Resource handlers a request can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    User,
    Settings,
    Noncompliances,
    Noncompliance,
    Tickets,
    Ticket,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::User,
        Operation::Settings,
        Operation::Noncompliances,
        Operation::Noncompliance,
        Operation::Tickets,
        Operation::Ticket,
    ];

    /// Wire name, as it appears in the route
    pub fn name(self) -> &'static str {
        match self {
            Operation::User => "user",
            Operation::Settings => "settings",
            Operation::Noncompliances => "noncompliances",
            Operation::Noncompliance => "noncompliance",
            Operation::Tickets => "tickets",
            Operation::Ticket => "ticket",
        }
    }

    /// Exact, case-sensitive lookup of a wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations reachable from inbound requests.
///
/// A name that does not resolve through [`AllowList::resolve`] is never
/// dispatched, whatever the payload says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    operations: BTreeSet<Operation>,
}

impl AllowList {
    /// Every operation is reachable
    pub fn all() -> Self {
        Self::from_operations(Operation::ALL)
    }

    pub fn empty() -> Self {
        Self {
            operations: BTreeSet::new(),
        }
    }

    pub fn from_operations(operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            operations: operations.into_iter().collect(),
        }
    }

    pub fn allow(mut self, operation: Operation) -> Self {
        self.operations.insert(operation);
        self
    }

    pub fn deny(mut self, operation: Operation) -> Self {
        self.operations.remove(&operation);
        self
    }

    pub fn contains(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Resolve an inbound name to an allow-listed operation
    pub fn resolve(&self, name: &str) -> Option<Operation> {
        Operation::from_name(name).filter(|op| self.contains(*op))
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.operations.iter().copied()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::all()
    }
}
