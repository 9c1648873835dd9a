use serde::{Deserialize, Serialize};

/// A user account. Part of the data model, but the running server only ever
/// maintains the anonymous record, so nothing creates or authenticates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: u32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_never_serialized() {
        let user = UserAccount { id: 1, username: "tenzin".to_owned(), password: "secret".to_owned() };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, serde_json::json!({"id": 1, "username": "tenzin"}));
    }
}
