//! Client-side route table.

use std::fmt;

/// A screen address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    List,
    /// `/new`
    NewTask,
    /// `/tasks/{id}`. The segment is kept as typed; the server validates it.
    TaskDetail(String),
}

impl Route {
    /// Matches a path against the route table. Trailing slashes are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::List),
            "/new" => Some(Self::NewTask),
            _ => trimmed
                .strip_prefix("/tasks/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Self::TaskDetail(id.to_string())),
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::NewTask => "/new".to_string(),
            Self::TaskDetail(id) => format!("/tasks/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Some(Route::List))]
    #[case("", Some(Route::List))]
    #[case("/new", Some(Route::NewTask))]
    #[case("/new/", Some(Route::NewTask))]
    #[case("/tasks/12", Some(Route::TaskDetail("12".to_string())))]
    #[case("/tasks/", None)]
    #[case("/tasks/1/edit", None)]
    #[case("/settings", None)]
    fn test_parse(#[case] path: &str, #[case] expected: Option<Route>) {
        assert_eq!(Route::parse(path), expected);
    }

    #[rstest]
    #[case(Route::List)]
    #[case(Route::NewTask)]
    #[case(Route::TaskDetail("7".to_string()))]
    fn test_path_parses_back(#[case] route: Route) {
        assert_eq!(Route::parse(&route.path()), Some(route));
    }
}
