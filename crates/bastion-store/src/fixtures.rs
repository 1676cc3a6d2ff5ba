//! # Demo Fixtures
//!
//! Seed data for offline mode and the stub server: three users (two owners,
//! one administrator) and five Azure Bastion hosts covering every
//! non-terminal status plus one confirmed deletion.

use bastion_core::User;
use bastion_state::Resource;

use crate::error::StoreError;
use crate::store::ResourceStore;

const RESOURCES_JSON: &str = include_str!("../fixtures/resources.json");
const USERS_JSON: &str = include_str!("../fixtures/users.json");

/// The demo resources, in display order.
pub fn demo_resources() -> Result<Vec<Resource>, serde_json::Error> {
    serde_json::from_str(RESOURCES_JSON)
}

/// The demo users.
pub fn demo_users() -> Result<Vec<User>, serde_json::Error> {
    serde_json::from_str(USERS_JSON)
}

/// Errors building a seeded store.
#[derive(thiserror::Error, Debug)]
pub enum FixtureError {
    #[error("fixture data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A store seeded with [`demo_resources`].
pub fn demo_store() -> Result<ResourceStore, FixtureError> {
    Ok(ResourceStore::from_resources(demo_resources()?)?)
}

/// Find a demo user by email, ignoring ASCII case.
pub fn find_user_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::Role;

    #[test]
    fn fixtures_parse_and_are_consistent() {
        let resources = demo_resources().unwrap();
        assert_eq!(resources.len(), 5);
        assert!(resources.iter().all(|r| r.is_consistent()));
        assert!(resources.iter().all(|r| r.cost_per_month.cents() == 13870));
    }

    #[test]
    fn users_include_one_admin() {
        let users = demo_users().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users.iter().filter(|u| u.role == Role::Admin).count(), 1);
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let users = demo_users().unwrap();
        let admin = find_user_by_email(&users, "ADMIN@exemple.fr").unwrap();
        assert!(admin.is_admin());
        assert!(find_user_by_email(&users, "nobody@exemple.fr").is_none());
    }
}
