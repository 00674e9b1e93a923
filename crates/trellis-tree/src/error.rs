//! Registration errors.

use std::error::Error;
use std::fmt;

/// Why a route could not be added to the tree.
///
/// The tree is built once during startup, so every variant points at a
/// programming error in the registration sequence. Each variant carries
/// the full route that was being inserted when the conflict surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The route does not begin with `/`.
    MissingLeadingSlash {
        /// The offending route.
        route: String,
    },
    /// The route is already claimed, either directly or through an
    /// overlapping parameter, wildcard or static sibling.
    Duplicate {
        /// The offending route.
        route: String,
    },
    /// A wildcard segment was followed by more path.
    WildcardNotTerminal {
        /// The offending route.
        route: String,
    },
}

impl InsertError {
    /// The route that triggered the error.
    #[must_use]
    pub fn route(&self) -> &str {
        match self {
            Self::MissingLeadingSlash { route }
            | Self::Duplicate { route }
            | Self::WildcardNotTerminal { route } => route,
        }
    }

    pub(crate) fn missing_leading_slash(route: &str) -> Self {
        Self::MissingLeadingSlash {
            route: route.to_string(),
        }
    }

    pub(crate) fn duplicate(route: &str) -> Self {
        Self::Duplicate {
            route: route.to_string(),
        }
    }

    pub(crate) fn wildcard_not_terminal(route: &str) -> Self {
        Self::WildcardNotTerminal {
            route: route.to_string(),
        }
    }
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLeadingSlash { route } => {
                write!(f, "route '{route}' must start with '/'")
            }
            Self::Duplicate { route } => {
                write!(f, "handler for route '{route}' already exists")
            }
            Self::WildcardNotTerminal { route } => {
                write!(
                    f,
                    "wildcard parameter must be the last element of the route '{route}'"
                )
            }
        }
    }
}

impl Error for InsertError {}
