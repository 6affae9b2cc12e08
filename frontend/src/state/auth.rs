use leptos::*;

use crate::api::types::UserResponse;

/// Per-tab authentication state: the signed-in user and the CSRF token the
/// backend handed out with the session.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub user: RwSignal<Option<UserResponse>>,
    pub csrf_token: RwSignal<Option<String>>,
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_context(AuthContext {
        user: create_rw_signal(None),
        csrf_token: create_rw_signal(None),
    });
    children()
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
