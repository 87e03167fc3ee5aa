//! Path routing between the list and detail screens.
//!
//! Two routes exist: `/` renders the user list, `/user/{id}` renders the
//! detail screen for one user.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route matches {0:?}")]
    Unknown(String),
    #[error("invalid user id {0:?}")]
    InvalidId(String),
}

impl Route {
    /// Parse a path. A trailing slash is tolerated; the empty path is the list.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        if normalized.is_empty() {
            return Ok(Route::List);
        }
        match normalized.strip_prefix("/user/") {
            Some(id) if !id.contains('/') => id
                .parse::<u64>()
                .map(Route::Detail)
                .map_err(|_| RouteError::InvalidId(id.to_string())),
            _ => Err(RouteError::Unknown(trimmed.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/user/{id}"),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus the stack of routes navigated away from.
#[derive(Clone, Debug)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self { current: initial, history: Vec::new() }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Push `route`. Returns `false` (and records nothing) when already there.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        self.history.push(self.current);
        self.current = route;
        true
    }

    /// Pop back to the previous route, or to `/` when there is no history.
    /// Returns `false` when that leaves the route unchanged.
    pub fn back(&mut self) -> bool {
        let target = self.history.pop().unwrap_or(Route::List);
        if target == self.current {
            return false;
        }
        self.current = target;
        true
    }
}
