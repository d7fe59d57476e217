//! Ticket roles for the parent/child purchase rule.
//!
//! Which ticket types count as "parent" (must be bought for children to be
//! bought) is catalog data, not code. [`TicketRules`] maps ticket ids to a
//! [`TicketRole`] with a default for ids it does not list.

use crate::error::ConfigError;
use crate::types::TicketId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How a ticket type takes part in the parent/child rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketRole {
    /// Buying any child ticket requires at least one of these
    Parent,
    /// Can only be bought together with a parent ticket
    Child,
    /// Not part of the rule
    Independent,
}

impl fmt::Display for TicketRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => write!(f, "parent"),
            Self::Child => write!(f, "child"),
            Self::Independent => write!(f, "independent"),
        }
    }
}

impl FromStr for TicketRole {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            "independent" => Ok(Self::Independent),
            other => Err(ConfigError::UnknownRole(other.to_string())),
        }
    }
}

/// Role table for the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRules {
    roles: BTreeMap<TicketId, TicketRole>,
    default_role: TicketRole,
}

impl TicketRules {
    /// A table where every ticket has `default_role`
    #[must_use]
    pub const fn new(default_role: TicketRole) -> Self {
        Self {
            roles: BTreeMap::new(),
            default_role,
        }
    }

    /// The listed ids are parents and every other ticket is a child
    #[must_use]
    pub fn parent_gated(parents: impl IntoIterator<Item = u32>) -> Self {
        parents
            .into_iter()
            .fold(Self::new(TicketRole::Child), |rules, id| {
                rules.with_role(id, TicketRole::Parent)
            })
    }

    /// Assign a role to one ticket id
    #[must_use]
    pub fn with_role(mut self, id: u32, role: TicketRole) -> Self {
        self.roles.insert(TicketId::new(id), role);
        self
    }

    /// Role of a ticket id
    #[must_use]
    pub fn role_of(&self, id: TicketId) -> TicketRole {
        self.roles.get(&id).copied().unwrap_or(self.default_role)
    }

    /// Role of tickets not listed explicitly
    #[must_use]
    pub const fn default_role(&self) -> TicketRole {
        self.default_role
    }
}

impl Default for TicketRules {
    /// Ticket 1 (adult) is the parent; everything else is a child
    fn default() -> Self {
        Self::parent_gated([1])
    }
}

impl FromStr for TicketRules {
    type Err = ConfigError;

    /// Parse `id:role` pairs separated by commas; `*:role` sets the default
    ///
    /// `"1:parent,*:child"` is the site's rule. Without a `*` entry the
    /// default role is [`TicketRole::Independent`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = Self::new(TicketRole::Independent);

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (id, role) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::MalformedRoleEntry(entry.to_string()))?;
            let role = role.parse::<TicketRole>()?;

            match id.trim() {
                "*" => rules.default_role = role,
                id => {
                    let id = id
                        .parse::<u32>()
                        .map_err(|_| ConfigError::MalformedRoleEntry(entry.to_string()))?;
                    rules.roles.insert(TicketId::new(id), role);
                },
            }
        }

        Ok(rules)
    }
}
