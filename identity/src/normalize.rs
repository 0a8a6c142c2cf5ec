//! Backend profile-shape normalization
//!
//! The hosted backend has served the granted set in two shapes over time:
//! a bare string array and a joined-record array of objects carrying a
//! `permission` field. Normalization accepts both, drops tags outside the
//! catalog, and never fails: malformed data degrades toward lower
//! privilege instead of erroring.

use std::collections::HashSet;

use authz::{Permission, Role};
use serde_json::Value;
use tracing::warn;

use crate::types::Profile;

/// Field names as the backend spells them
pub struct ProfileKeys;

impl ProfileKeys {
    pub const ROLE: &'static str = "role";
    pub const PERMISSIONS: &'static str = "permissions";
    pub const PERMISSION: &'static str = "permission";
}

/// Build a `Profile` from a raw backend profile row.
///
/// A missing or unknown role tag resolves to the plain user role. The
/// granted set comes from [`permissions_from_value`]; a missing field is
/// an empty set.
pub fn profile_from_value(raw: &Value) -> Profile {
    let role = match raw.get(ProfileKeys::ROLE).and_then(Value::as_str) {
        Some(tag) => match tag.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                warn!("Unknown role tag in profile: {}", tag);
                Role::User
            }
        },
        None => {
            warn!("Profile row has no role field");
            Role::User
        }
    };

    let permissions = raw
        .get(ProfileKeys::PERMISSIONS)
        .map(permissions_from_value)
        .unwrap_or_default();

    Profile { role, permissions }
}

/// Extract a granted set from either backend shape.
///
/// Unknown permission tags are dropped here so they never reach the
/// evaluator. Anything that is not an array normalizes to the empty set.
pub fn permissions_from_value(raw: &Value) -> HashSet<Permission> {
    let Some(entries) = raw.as_array() else {
        warn!("Granted set is not an array, treating as empty");
        return HashSet::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(tag) => Some(tag.as_str()),
            Value::Object(fields) => fields.get(ProfileKeys::PERMISSION).and_then(Value::as_str),
            _ => None,
        })
        .filter_map(|tag| match tag.parse::<Permission>() {
            Ok(permission) => Some(permission),
            Err(_) => {
                warn!("Dropping unknown permission tag: {}", tag);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_array_shape() {
        let raw = json!(["view_messages", "reply_messages"]);
        let set = permissions_from_value(&raw);
        assert_eq!(
            set,
            HashSet::from([Permission::ViewMessages, Permission::ReplyMessages])
        );
    }

    #[test]
    fn test_joined_record_shape() {
        let raw = json!([
            { "permission": "edit_content" },
            { "permission": "publish_content" },
        ]);
        let set = permissions_from_value(&raw);
        assert_eq!(
            set,
            HashSet::from([Permission::EditContent, Permission::PublishContent])
        );
    }

    #[test]
    fn test_unknown_tags_are_dropped() {
        let raw = json!(["view_messages", "launch_missiles", 42, { "permission": "fly" }]);
        let set = permissions_from_value(&raw);
        assert_eq!(set, HashSet::from([Permission::ViewMessages]));
    }

    #[test]
    fn test_non_array_shapes_normalize_to_empty() {
        for raw in [json!("view_messages"), json!(7), json!({"a": 1}), json!(null)] {
            assert!(permissions_from_value(&raw).is_empty());
        }
    }

    #[test]
    fn test_profile_row_with_both_fields() {
        let raw = json!({
            "role": "support",
            "permissions": ["view_messages", "reply_messages"],
        });
        let profile = profile_from_value(&raw);
        assert_eq!(profile.role, Role::Support);
        assert!(profile.permissions.contains(&Permission::ReplyMessages));
    }

    #[test]
    fn test_unknown_role_degrades_to_user() {
        let raw = json!({ "role": "superadmin", "permissions": [] });
        assert_eq!(profile_from_value(&raw).role, Role::User);
    }

    #[test]
    fn test_missing_fields_degrade_to_user_with_no_grants() {
        let profile = profile_from_value(&json!({}));
        assert_eq!(profile.role, Role::User);
        assert!(profile.permissions.is_empty());
    }
}
