//! Route table and the authentication guard.

use shared::domain::DepartmentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Departments,
    DepartmentDetails(DepartmentId),
}

impl Route {
    /// Unknown paths fall through to the department list.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/login" => Self::Login,
            "/register" => Self::Register,
            "" => Self::Departments,
            other => other
                .strip_prefix("/department/")
                .and_then(|id| id.parse::<i64>().ok())
                .map(|id| Self::DepartmentDetails(DepartmentId(id)))
                .unwrap_or(Self::Departments),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Departments => "/".into(),
            Self::DepartmentDetails(id) => format!("/department/{id}"),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Departments | Self::DepartmentDetails(_))
    }
}

pub fn guard(route: Route, authenticated: bool) -> Route {
    if route.is_protected() && !authenticated {
        Route::Login
    } else {
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/register"), Route::Register);
        assert_eq!(Route::parse("/"), Route::Departments);
        assert_eq!(
            Route::parse("/department/42"),
            Route::DepartmentDetails(DepartmentId(42))
        );
    }

    #[test]
    fn wildcard_and_malformed_ids_go_home() {
        assert_eq!(Route::parse("/nowhere"), Route::Departments);
        assert_eq!(Route::parse("/department/abc"), Route::Departments);
        assert_eq!(Route::parse("/department/"), Route::Departments);
    }

    #[test]
    fn guard_redirects_only_protected_routes() {
        let details = Route::DepartmentDetails(DepartmentId(7));
        assert_eq!(guard(details, false), Route::Login);
        assert_eq!(guard(details, true), details);
        assert_eq!(guard(Route::Register, false), Route::Register);
        assert_eq!(guard(Route::Departments, false), Route::Login);
    }

    #[test]
    fn paths_round_trip_through_parse() {
        for route in [
            Route::Login,
            Route::Register,
            Route::Departments,
            Route::DepartmentDetails(DepartmentId(3)),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
