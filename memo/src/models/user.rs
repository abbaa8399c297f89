use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Resource name, e.g. `users/7`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "displayName")]
    pub nickname: String,
}

impl User {
    /// Numeric id of the user, taken from the resource name when it carries
    /// one and from the `id` field otherwise.
    pub fn resolved_id(&self) -> Option<i64> {
        self.name
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<i64>().ok())
            .filter(|id| *id > 0)
            .or(Some(self.id).filter(|id| *id > 0))
    }

    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_comes_from_resource_name() {
        let user = User {
            name: "users/7".to_string(),
            ..Default::default()
        };
        assert_eq!(user.resolved_id(), Some(7));
    }

    #[test]
    fn falls_back_to_id_field() {
        let user = User {
            name: "users/me".to_string(),
            id: 3,
            ..Default::default()
        };
        assert_eq!(user.resolved_id(), Some(3));
    }

    #[test]
    fn unresolvable_user_has_no_id() {
        assert_eq!(User::default().resolved_id(), None);
    }

    #[test]
    fn display_name_prefers_nickname() {
        let user: User = serde_json::from_value(serde_json::json!({
            "name": "users/1",
            "username": "steven",
            "displayName": "Steven"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "Steven");
    }
}
