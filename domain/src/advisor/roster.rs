//! Static advisor registry and per-run selection

use super::id::AdvisorId;
use super::spec::AdvisorSpec;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A registry slot: either a usable advisor or a typed "disabled" marker.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterEntry {
    Available(AdvisorSpec),
    Disabled { id: AdvisorId, reason: String },
}

impl RosterEntry {
    pub fn id(&self) -> AdvisorId {
        match self {
            RosterEntry::Available(spec) => spec.id,
            RosterEntry::Disabled { id, .. } => *id,
        }
    }

    pub fn spec(&self) -> Option<&AdvisorSpec> {
        match self {
            RosterEntry::Available(spec) => Some(spec),
            RosterEntry::Disabled { .. } => None,
        }
    }
}

/// All advisors known to this deployment, resolved once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorRoster {
    entries: BTreeMap<AdvisorId, RosterEntry>,
}

impl AdvisorRoster {
    /// Roster with every advisor available at its built-in settings
    pub fn builtin() -> Self {
        Self::from_entries(
            AdvisorId::ALL
                .into_iter()
                .map(|id| RosterEntry::Available(AdvisorSpec::builtin(id))),
        )
    }

    /// Build from explicit entries; advisors not mentioned are disabled.
    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut map: BTreeMap<AdvisorId, RosterEntry> = AdvisorId::ALL
            .into_iter()
            .map(|id| {
                (
                    id,
                    RosterEntry::Disabled {
                        id,
                        reason: "not configured".to_string(),
                    },
                )
            })
            .collect();
        for entry in entries {
            map.insert(entry.id(), entry);
        }
        Self { entries: map }
    }

    pub fn spec(&self, id: AdvisorId) -> Option<&AdvisorSpec> {
        self.entries.get(&id).and_then(RosterEntry::spec)
    }

    /// Resolve a selection against the roster: the enabled, available
    /// advisors in canonical order, regardless of selection order.
    pub fn resolve(&self, selection: &AdvisorSelection) -> Vec<AdvisorSpec> {
        AdvisorId::ALL
            .into_iter()
            .filter(|id| selection.is_enabled(*id))
            .filter_map(|id| self.spec(id).cloned())
            .collect()
    }
}

impl Default for AdvisorRoster {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Which advisors the caller wants for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorSelection {
    enabled: BTreeMap<AdvisorId, bool>,
}

impl AdvisorSelection {
    /// Selection using each advisor's default flag
    pub fn defaults() -> Self {
        Self {
            enabled: AdvisorId::ALL
                .into_iter()
                .map(|id| (id, id.enabled_by_default()))
                .collect(),
        }
    }

    /// Only the listed advisors
    pub fn only(ids: impl IntoIterator<Item = AdvisorId>) -> Self {
        Self {
            enabled: ids.into_iter().map(|id| (id, true)).collect(),
        }
    }

    /// Parse a `{name: enabled}` map as sent by a front end.
    pub fn from_names<'a>(
        names: impl IntoIterator<Item = (&'a str, bool)>,
    ) -> Result<Self, DomainError> {
        let mut enabled = BTreeMap::new();
        for (name, on) in names {
            enabled.insert(name.parse::<AdvisorId>()?, on);
        }
        Ok(Self { enabled })
    }

    pub fn set(&mut self, id: AdvisorId, on: bool) {
        self.enabled.insert(id, on);
    }

    pub fn is_enabled(&self, id: AdvisorId) -> bool {
        self.enabled.get(&id).copied().unwrap_or(false)
    }

    /// Enabled ids in canonical order
    pub fn enabled_ids(&self) -> Vec<AdvisorId> {
        AdvisorId::ALL
            .into_iter()
            .filter(|id| self.is_enabled(*id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled_ids().is_empty()
    }
}
