use shared_models::error::AppError;
use shared_models::user::{Role, User};

/// Outcome of the page-level access decision. Exactly one applies, and the
/// deny variants are checked in a fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Admit,
    DenyUnauthenticated,
    DenyWrongRole,
    DenyPendingApproval,
}

/// Maps (current session, required role) to an access outcome.
///
/// Priority: no session beats everything; a role mismatch beats the
/// pending-approval block; an unapproved doctor is blocked from any
/// admitted page regardless of the required role.
pub fn evaluate(session: Option<&User>, required_role: Option<Role>) -> AccessDecision {
    let user = match session {
        Some(user) => user,
        None => return AccessDecision::DenyUnauthenticated,
    };

    if let Some(required) = required_role {
        if user.role != required {
            return AccessDecision::DenyWrongRole;
        }
    }

    if user.is_pending_doctor() {
        return AccessDecision::DenyPendingApproval;
    }

    AccessDecision::Admit
}

/// Gate used by handlers: admit and hand back the actor, or translate the
/// deny outcome into the HTTP error taxonomy.
pub fn authorize<'a>(
    session: Option<&'a User>,
    required_role: Option<Role>,
) -> Result<&'a User, AppError> {
    match (evaluate(session, required_role), session) {
        (AccessDecision::Admit, Some(user)) => Ok(user),
        (AccessDecision::DenyWrongRole, _) => Err(AppError::Forbidden(
            "This page is not available for your role".to_string(),
        )),
        (AccessDecision::DenyPendingApproval, _) => Err(AppError::Forbidden(
            "Your doctor account is pending admin approval".to_string(),
        )),
        _ => Err(AppError::Auth("Authentication required".to_string())),
    }
}
