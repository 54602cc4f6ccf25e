/// Staff directory domain model
use crate::domain::shared::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A staff member reachable through the hotline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    pub phone: String,
}

impl StaffMember {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Ordered list of staff members, keyed by phone number for lookups.
///
/// Loaded once at startup and never mutated afterwards. Phone numbers are
/// unique within a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffDirectory {
    members: Vec<StaffMember>,
}

impl StaffDirectory {
    /// Build a directory, rejecting duplicate phone numbers
    pub fn new(members: Vec<StaffMember>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.phone.as_str()) {
                return Err(DomainError::InvalidConfiguration(format!(
                    "phone number {} is listed more than once",
                    member.phone
                )));
            }
        }

        Ok(Self { members })
    }

    /// Parse a JSON array of `{"name": .., "phone": ..}` entries
    pub fn from_json(json: &str) -> Result<Self> {
        let members: Vec<StaffMember> = serde_json::from_str(json).map_err(|e| {
            DomainError::InvalidConfiguration(format!("staff directory is not valid JSON: {}", e))
        })?;
        Self::new(members)
    }

    /// Name of the staff member owning `phone`, if any
    pub fn owner_of(&self, phone: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|member| member.phone == phone)
            .map(|member| member.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaffMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a StaffDirectory {
    type Item = &'a StaffMember;
    type IntoIter = std::slice::Iter<'a, StaffMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
