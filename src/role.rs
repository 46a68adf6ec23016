use rocket::request::FromParam;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of assignable user roles. Freshly registered users carry
/// [`Role::Unset`] until an admin promotes them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Unset,
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Unset => "unset",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

impl std::default::Default for Role {
    fn default() -> Self {
        Role::Unset
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Path segments only ever name the two assignable roles; anything else is
/// rejected at the boundary instead of reaching the store.
impl<'r> FromParam<'r> for Role {
    type Error = &'r str;

    fn from_param(param: &'r str) -> Result<Self, Self::Error> {
        match param {
            "admin" => Ok(Role::Admin),
            "instructor" => Ok(Role::Instructor),
            _ => Err(param),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_params_are_a_closed_set() {
        assert_eq!(Role::from_param("admin"), Ok(Role::Admin));
        assert_eq!(Role::from_param("instructor"), Ok(Role::Instructor));
        assert!(Role::from_param("unset").is_err());
        assert!(Role::from_param("Admin").is_err());
        assert!(Role::from_param("superuser").is_err());
    }

    #[test]
    fn role_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"instructor\"").unwrap(),
            Role::Instructor
        );
    }

    #[test]
    fn unknown_role_strings_are_unrepresentable() {
        assert!(serde_json::from_str::<Role>("\"moderator\"").is_err());
    }
}
