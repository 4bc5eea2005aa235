use crate::model::role::Role;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

/// Identity attached to the request by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub name: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ErrorUnauthorized("Missing token"))),
        }
    }
}

impl AuthUser {
    pub fn require_admin_or_accountant(&self) -> actix_web::Result<()> {
        if matches!(self.role, Role::Admin | Role::Accountant) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Admin/Accountant only"))
        }
    }

    /// Company dashboard: staff see everything, drivers their own figures.
    pub fn require_dashboard_access(&self) -> actix_web::Result<()> {
        match self.role {
            Role::Driver => Ok(()),
            _ => self.require_admin_or_accountant(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: "u-1".to_string(),
            name: "Ama".to_string(),
            role,
        }
    }

    #[test]
    fn owners_are_kept_off_the_company_dashboard() {
        assert!(user(Role::Admin).require_dashboard_access().is_ok());
        assert!(user(Role::Accountant).require_dashboard_access().is_ok());
        assert!(user(Role::Driver).require_dashboard_access().is_ok());
        assert!(user(Role::Owner).require_dashboard_access().is_err());
    }

    #[test]
    fn staff_check_rejects_drivers() {
        assert!(user(Role::Driver).require_admin_or_accountant().is_err());
    }
}
