//! Team id to display name lookup.
use std::collections::HashMap;

/// Display names for team ids, filled from launch data.
#[derive(Clone, Debug, Default)]
pub struct TeamDirectory {
    names: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `mapping` into the directory, overwriting existing ids.
    pub fn set_mapping(&mut self, mapping: &HashMap<String, String>) {
        for (id, name) in mapping {
            self.names.insert(id.clone(), name.clone());
        }
    }

    pub fn name(&self, team_id: &str) -> Option<&str> {
        self.names.get(team_id).map(String::as_str)
    }

    /// Display name, or the raw id when the team is unknown.
    pub fn name_or_id<'a>(&'a self, team_id: &'a str) -> &'a str {
        self.name(team_id).unwrap_or(team_id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
