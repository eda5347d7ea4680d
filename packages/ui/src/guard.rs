use api::RouteAccess;
use dioxus::prelude::*;

use crate::auth::use_auth;

/// Renders `children` only for an authenticated session.
///
/// Nothing is shown while a stored token is still being verified, so a
/// protected page never flashes before the redirect. An unauthenticated
/// session is sent to `redirect`; this also covers a token that expires
/// while the page is open.
#[component]
pub fn ProtectedRoute<R: Routable + PartialEq>(redirect: R, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let access = auth.session().route_access();

    let target = redirect.clone();
    use_effect(move || {
        if auth.session().route_access() == RouteAccess::Denied {
            tracing::debug!("not authenticated, redirecting to login");
            nav.replace(target.clone());
        }
    });

    match access {
        RouteAccess::Granted => rsx! {
            {children}
        },
        RouteAccess::Pending | RouteAccess::Denied => rsx! {},
    }
}
