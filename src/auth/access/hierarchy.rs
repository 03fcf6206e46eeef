//! Permission tiers

use crate::core::models::Permission;
use std::collections::HashSet;

/// Static permission hierarchy `View < Edit < Create`
///
/// Expansion yields only the tier immediately below the held one and never
/// the held permission itself; exact matches are checked separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionHierarchy;

impl PermissionHierarchy {
    /// Permissions additionally satisfied by holding `permission`
    pub fn expand(permission: Permission) -> HashSet<Permission> {
        match permission {
            Permission::Create => HashSet::from([Permission::Edit]),
            Permission::Edit => HashSet::from([Permission::View]),
            Permission::View => HashSet::new(),
        }
    }

    /// Whether `held` satisfies at least one of `required`
    ///
    /// An empty `required` list is satisfied by anything, including no
    /// permission at all.
    pub fn satisfies(held: Option<Permission>, required: &[Permission]) -> bool {
        if required.is_empty() {
            return true;
        }

        let Some(held) = held else {
            return false;
        };

        if required.contains(&held) {
            return true;
        }

        let expanded = Self::expand(held);
        required.iter().any(|permission| expanded.contains(permission))
    }
}
