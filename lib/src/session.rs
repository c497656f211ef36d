// lib/src/session.rs
//! Sign-in state and the per-portal role gate.
//!
//! Session state lives in five flat keys (`isLoggedIn`, `isDoctor`, `isAdmin`,
//! `userEmail`, `userName`). Those flags can disagree; [`Session::load`]
//! resolves them to a single [`Role`].

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use models::errors::{MedibookResult, ValidationError};
use models::medical::Role;

use crate::storage_engine::keys::{IS_ADMIN, IS_DOCTOR, IS_LOGGED_IN, SESSION_KEYS, TRUE, USER_EMAIL, USER_NAME};
use crate::storage_engine::storage_utils::{read_flag, read_string};
use crate::storage_engine::StorageEngine;

/// Pages the portals navigate between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    DoctorLogin,
    AdminLogin,
    Dashboard,
    DoctorDashboard,
    AdminDashboard,
    Appointments,
    Book(u32),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::DoctorLogin => "/doctor/login".to_string(),
            Route::AdminLogin => "/admin/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::DoctorDashboard => "/doctor/dashboard".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::Appointments => "/appointments".to_string(),
            Route::Book(doctor_id) => format!("/book/{}", doctor_id),
        }
    }

    /// Where a user without access to `role`'s pages is sent.
    pub fn login_for(role: Role) -> Route {
        match role {
            Role::Patient => Route::Login,
            Role::Doctor => Route::DoctorLogin,
            Role::Admin => Route::AdminLogin,
        }
    }

    pub fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Patient => Route::Dashboard,
            Role::Doctor => Route::DoctorDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub role: Role,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session { authenticated: false, role: Role::Patient, email: None, name: None }
    }

    /// Reads the session flags from `engine`.
    ///
    /// `isAdmin` outranks `isDoctor`, which outranks a plain patient login.
    pub fn load(engine: &dyn StorageEngine) -> MedibookResult<Session> {
        let logged_in = read_flag(engine, IS_LOGGED_IN)?;
        let doctor = read_flag(engine, IS_DOCTOR)?;
        let admin = read_flag(engine, IS_ADMIN)?;

        if admin && doctor {
            warn!("Both {} and {} are set, treating session as admin", IS_ADMIN, IS_DOCTOR);
        }
        if (admin || doctor) && !logged_in {
            warn!("Role flag set without {}, treating session as signed out", IS_LOGGED_IN);
        }

        let role = if admin {
            Role::Admin
        } else if doctor {
            Role::Doctor
        } else {
            Role::Patient
        };
        Ok(Session {
            authenticated: logged_in,
            role,
            email: read_string(engine, USER_EMAIL)?,
            name: read_string(engine, USER_NAME)?,
        })
    }

    pub fn has_access(&self, required: Role) -> bool {
        if !self.authenticated {
            return false;
        }
        match required {
            Role::Patient => true,
            Role::Doctor => self.role == Role::Doctor,
            Role::Admin => self.role == Role::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(Session),
    Redirect(Route),
}

/// Decides on every page load whether the current session may see a portal.
#[derive(Debug, Clone)]
pub struct RoleGate {
    engine: Arc<dyn StorageEngine>,
}

impl RoleGate {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        RoleGate { engine }
    }

    pub fn check(&self, required: Role) -> MedibookResult<GateDecision> {
        let session = Session::load(self.engine.as_ref())?;
        if session.has_access(required) {
            Ok(GateDecision::Allow(session))
        } else {
            let route = Route::login_for(required);
            debug!("Session without {} access redirected to {}", required, route);
            Ok(GateDecision::Redirect(route))
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionManager {
    engine: Arc<dyn StorageEngine>,
}

impl SessionManager {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        SessionManager { engine }
    }

    pub fn current(&self) -> MedibookResult<Session> {
        Session::load(self.engine.as_ref())
    }

    /// Marks the user as signed in with `role` and returns the role's dashboard.
    pub fn login(&self, email: &str, name: &str, role: Role) -> MedibookResult<Route> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail(email.to_string()).into());
        }
        // Nothing from a previous login may leak into this one.
        for key in SESSION_KEYS {
            self.engine.remove_item(key)?;
        }

        self.engine.set_item(IS_LOGGED_IN, TRUE)?;
        match role {
            Role::Doctor => self.engine.set_item(IS_DOCTOR, TRUE)?,
            Role::Admin => self.engine.set_item(IS_ADMIN, TRUE)?,
            Role::Patient => {}
        }
        self.engine.set_item(USER_EMAIL, email)?;
        if !name.trim().is_empty() {
            self.engine.set_item(USER_NAME, name.trim())?;
        }
        self.engine.flush()?;
        info!("Signed in {} as {}", email, role);
        Ok(Route::dashboard_for(role))
    }

    pub fn signup(&self, name: &str, email: &str, role: Role) -> MedibookResult<Route> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if email.trim().is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        self.login(email, name, role)
    }

    pub fn logout(&self) -> MedibookResult<Route> {
        let role = self.current()?.role;
        for key in SESSION_KEYS {
            self.engine.remove_item(key)?;
        }
        self.engine.flush()?;
        info!("Signed out");
        Ok(Route::login_for(role))
    }
}
