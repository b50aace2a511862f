//! Role table held in memory, loaded from configuration.

use crate::domain::RoleLookupError;
use crate::ports::RoleProvider;
use parking_lot::RwLock;
use shared_types::Role;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct StaticRoleProvider {
    roles: RwLock<HashMap<String, Role>>,
}

impl StaticRoleProvider {
    pub fn new(roles: HashMap<String, Role>) -> Self {
        Self {
            roles: RwLock::new(roles),
        }
    }

    pub fn assign(&self, identifier: impl Into<String>, role: Role) {
        self.roles.write().insert(identifier.into(), role);
    }

    pub fn revoke(&self, identifier: &str) -> Option<Role> {
        self.roles.write().remove(identifier)
    }

    pub fn len(&self) -> usize {
        self.roles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.read().is_empty()
    }
}

impl FromIterator<(String, Role)> for StaticRoleProvider {
    fn from_iter<I: IntoIterator<Item = (String, Role)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RoleProvider for StaticRoleProvider {
    fn role_of(&self, identifier: &str) -> Result<Option<Role>, RoleLookupError> {
        Ok(self.roles.read().get(identifier).copied())
    }
}
