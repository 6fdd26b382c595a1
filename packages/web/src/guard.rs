//! Route access checks shared by the guarded layouts.

use api::models::Role;
use ui::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Nobody is signed in; the page redirects to login.
    SignedOut,
    /// Signed in, but the role may not see the page.
    Denied,
    Granted,
}

/// Decide whether the current user may open a page restricted to `roles`.
/// An empty list admits every signed-in user.
pub fn access(auth: &AuthState, roles: &[Role]) -> Access {
    if !auth.is_authenticated() {
        Access::SignedOut
    } else if auth.has_any_role(roles) {
        Access::Granted
    } else {
        Access::Denied
    }
}

pub const ADMIN: &[Role] = &[Role::Admin];
