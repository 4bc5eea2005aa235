use crate::auth::auth::AuthUser;
use crate::model::role::Role;

/// Privilege level a read runs under. Every store call states it explicitly.
#[derive(Debug, Clone)]
pub enum Access {
    /// Internal jobs (cache warm-up). Sees every row.
    ServiceRole,
    /// Request made on behalf of an authenticated user.
    Caller(AuthUser),
}

impl Access {
    /// Driver id rows must be restricted to, if any.
    pub fn driver_scope(&self) -> Option<&str> {
        match self {
            Access::ServiceRole => None,
            Access::Caller(user) => match user.role {
                Role::Driver => Some(user.user_id.as_str()),
                Role::Admin | Role::Accountant | Role::Owner => None,
            },
        }
    }

    /// Label separating cached results of differently scoped callers.
    pub fn cache_scope(&self) -> String {
        match self.driver_scope() {
            Some(driver_id) => format!("driver:{}", driver_id),
            None => "all".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> Access {
        Access::Caller(AuthUser {
            user_id: "u-1".to_string(),
            name: "Ama".to_string(),
            role,
        })
    }

    #[test]
    fn only_drivers_are_scoped() {
        assert_eq!(Access::ServiceRole.driver_scope(), None);
        assert_eq!(caller(Role::Admin).driver_scope(), None);
        assert_eq!(caller(Role::Accountant).driver_scope(), None);
        assert_eq!(caller(Role::Driver).driver_scope(), Some("u-1"));
    }

    #[test]
    fn cache_scope_separates_drivers_from_company_view() {
        assert_eq!(Access::ServiceRole.cache_scope(), "all");
        assert_eq!(caller(Role::Accountant).cache_scope(), "all");
        assert_eq!(caller(Role::Driver).cache_scope(), "driver:u-1");
    }
}
