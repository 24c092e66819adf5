//! # Scope Guard
//!
//! Restricts record visibility to the caller's organization.
//!
//! ## Invariants
//! - No silent bypass: only a global admin sees across organizations
//! - Scope is always passed explicitly to the engines, never read from
//!   ambient session state
//! - Cross-organization reads are reported as "not found" so existence
//!   does not leak

use std::fmt;
use std::str::FromStr;

use crate::errors::{RecordError, RecordResult};
use crate::record::{Record, RecordTemplate};

/// Privilege level supplied by the upstream auth layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Privilege {
    #[default]
    Member,
    /// Administrator of the caller's own organization
    Admin,
    /// Administrator of every organization
    GlobalAdmin,
}

impl Privilege {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::Member => "member",
            Privilege::Admin => "admin",
            Privilege::GlobalAdmin => "global-admin",
        }
    }
}

impl FromStr for Privilege {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "member" => Ok(Privilege::Member),
            "admin" => Ok(Privilege::Admin),
            "global-admin" => Ok(Privilege::GlobalAdmin),
            other => Err(RecordError::invalid(format!("unknown caller role: {}", other))),
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of the caller for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    pub user: String,
    pub organization: String,
    pub privilege: Privilege,
}

impl CallerContext {
    pub fn new(
        user: impl Into<String>,
        organization: impl Into<String>,
        privilege: Privilege,
    ) -> Self {
        Self {
            user: user.into(),
            organization: organization.into(),
            privilege,
        }
    }

    pub fn member(user: impl Into<String>, organization: impl Into<String>) -> Self {
        Self::new(user, organization, Privilege::Member)
    }

    pub fn admin(user: impl Into<String>, organization: impl Into<String>) -> Self {
        Self::new(user, organization, Privilege::Admin)
    }

    pub fn global_admin(user: impl Into<String>, organization: impl Into<String>) -> Self {
        Self::new(user, organization, Privilege::GlobalAdmin)
    }

    pub fn is_global_admin(&self) -> bool {
        self.privilege == Privilege::GlobalAdmin
    }

    pub fn is_admin(&self) -> bool {
        self.privilege >= Privilege::Admin
    }
}

/// Effective visibility boundary for one engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every organization
    Global,
    /// A single organization
    Organization(String),
}

impl Scope {
    pub fn organization(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Organization(org) => Some(org),
        }
    }

    /// Filter template enforcing this scope
    pub fn template(&self) -> RecordTemplate {
        match self {
            Scope::Global => RecordTemplate::default(),
            Scope::Organization(org) => RecordTemplate::for_organization(org.clone()),
        }
    }

    /// Whether a record of `organization` is inside this scope
    pub fn permits(&self, organization: &str) -> bool {
        match self {
            Scope::Global => true,
            Scope::Organization(org) => org == organization,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "*"),
            Scope::Organization(org) => write!(f, "{}", org),
        }
    }
}

/// Resolves scopes from caller identity
pub struct ScopeGuard;

impl ScopeGuard {
    /// Organization scope for a paged query.
    ///
    /// A global admin may redirect the query to another organization; for
    /// everyone else the override is ignored.
    pub fn resolve_query_scope(caller: &CallerContext, organization_name: Option<&str>) -> Scope {
        match organization_name.filter(|name| !name.is_empty()) {
            Some(name) if caller.is_global_admin() => Scope::Organization(name.to_string()),
            Some(name) => {
                tracing::warn!(
                    event = "SCOPE_OVERRIDE_IGNORED",
                    user = %caller.user,
                    organization = %caller.organization,
                    requested = %name
                );
                Scope::Organization(caller.organization.clone())
            }
            None => Scope::Organization(caller.organization.clone()),
        }
    }

    /// Everything the caller may see or mutate
    pub fn visibility(caller: &CallerContext) -> Scope {
        if caller.is_global_admin() {
            Scope::Global
        } else {
            Scope::Organization(caller.organization.clone())
        }
    }

    /// Listing the trail is an administrative action
    pub fn require_admin(caller: &CallerContext) -> RecordResult<()> {
        if caller.is_admin() {
            Ok(())
        } else {
            Err(RecordError::Forbidden(
                "administrator privilege required".to_string(),
            ))
        }
    }

    /// Hide records outside the caller's visibility
    pub fn ensure_visible(caller: &CallerContext, record: &Record) -> RecordResult<()> {
        if Self::visibility(caller).permits(&record.organization) {
            Ok(())
        } else {
            Err(RecordError::NotFound(record.id()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_admin_override_honored() {
        let caller = CallerContext::global_admin("root", "built-in");
        let scope = ScopeGuard::resolve_query_scope(&caller, Some("A"));
        assert_eq!(scope, Scope::Organization("A".to_string()));
    }

    #[test]
    fn test_member_override_ignored() {
        let caller = CallerContext::admin("bob", "B");
        let scope = ScopeGuard::resolve_query_scope(&caller, Some("A"));
        assert_eq!(scope, Scope::Organization("B".to_string()));
    }

    #[test]
    fn test_empty_override_uses_own_organization() {
        let caller = CallerContext::global_admin("root", "built-in");
        let scope = ScopeGuard::resolve_query_scope(&caller, Some(""));
        assert_eq!(scope, Scope::Organization("built-in".to_string()));
    }

    #[test]
    fn test_visibility() {
        assert_eq!(
            ScopeGuard::visibility(&CallerContext::global_admin("root", "x")),
            Scope::Global
        );
        assert_eq!(
            ScopeGuard::visibility(&CallerContext::admin("bob", "B")),
            Scope::Organization("B".to_string())
        );
    }

    #[test]
    fn test_require_admin() {
        assert!(ScopeGuard::require_admin(&CallerContext::admin("a", "A")).is_ok());
        assert!(ScopeGuard::require_admin(&CallerContext::global_admin("a", "A")).is_ok());
        assert!(matches!(
            ScopeGuard::require_admin(&CallerContext::member("a", "A")),
            Err(RecordError::Forbidden(_))
        ));
    }

    #[test]
    fn test_foreign_record_reported_not_found() {
        let caller = CallerContext::admin("bob", "B");
        let record = Record::new("alice", "r1", "A");

        let err = ScopeGuard::ensure_visible(&caller, &record).unwrap_err();
        assert_eq!(err, RecordError::NotFound("alice/r1".to_string()));
    }

    #[test]
    fn test_parse_privilege() {
        assert_eq!("global-admin".parse::<Privilege>().unwrap(), Privilege::GlobalAdmin);
        assert_eq!("".parse::<Privilege>().unwrap(), Privilege::Member);
        assert!("root".parse::<Privilege>().is_err());
    }
}
