use leptos::*;
use web_sys::HtmlInputElement;

use crate::{
    api::{client, types::MeData, ApiClient},
    state::auth as auth_state,
};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = auth_state::use_auth();
    let (profile, set_profile) = create_signal(None::<MeData>);
    let (status, set_status) = create_signal(None::<String>);
    let (progress, set_progress) = create_signal(None::<u32>);

    // Resolve identity on load. The backend answers from the active session
    // or silently from the remember-me cookie; either way we land here with
    // a user, otherwise we bounce to the login page.
    spawn_local(async move {
        match ApiClient::new().me().await {
            Ok(data) => {
                auth.user.set(Some(data.user.clone()));
                set_profile.set(Some(data));
            }
            Err(_) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            }
        }
    });

    let handle_file_change = move |ev: leptos::ev::Event| {
        let target = event_target::<HtmlInputElement>(&ev);
        let Some(file) = target.files().and_then(|list| list.item(0)) else {
            return;
        };
        set_progress.set(Some(0));
        set_status.set(None);

        spawn_local(async move {
            let csrf_token = match auth.csrf_token.get_untracked() {
                Some(token) => token,
                None => match ApiClient::new().csrf_token().await {
                    Ok(token) => {
                        auth.csrf_token.set(Some(token.clone()));
                        token
                    }
                    Err(err) => {
                        set_progress.set(None);
                        set_status.set(Some(err.to_string()));
                        return;
                    }
                },
            };

            let started = client::upload_with_progress(
                &file,
                &csrf_token,
                move |percent| set_progress.set(Some(percent)),
                move |result| match result {
                    Ok(data) => {
                        set_progress.set(Some(100));
                        set_status.set(Some(format!(
                            "Uploaded {} ({} bytes)",
                            data.file_name, data.size
                        )));
                    }
                    Err(err) => {
                        set_progress.set(None);
                        set_status.set(Some(err.to_string()));
                    }
                },
            );
            if let Err(err) = started {
                set_progress.set(None);
                set_status.set(Some(err.to_string()));
            }
        });
    };

    let handle_logout = move |_| {
        spawn_local(async move {
            let client = ApiClient::new();
            let csrf_token = match auth.csrf_token.get_untracked() {
                Some(token) => Some(token),
                None => client.csrf_token().await.ok(),
            };
            if let Some(token) = csrf_token {
                if let Err(err) = client.logout(&token).await {
                    log::warn!("logout request failed: {err}");
                }
            }
            auth.user.set(None);
            auth.csrf_token.set(None);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        });
    };

    view! {
        <div class="min-h-screen bg-gray-50 py-12 px-4">
            <div class="max-w-2xl mx-auto space-y-8">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-gray-900">{"Dashboard"}</h1>
                    <button
                        on:click=handle_logout
                        class="py-1.5 px-4 rounded-md text-sm font-medium text-gray-700 border border-gray-300 hover:bg-gray-100"
                    >
                        {"Log out"}
                    </button>
                </div>

                {move || {
                    profile
                        .get()
                        .map(|data| {
                            view! {
                                <div class="rounded-lg bg-white shadow p-6 space-y-1">
                                    <p class="text-lg font-medium text-gray-900">
                                        {format!("Welcome back, {}", data.user.full_name)}
                                    </p>
                                    <p class="text-sm text-gray-600">{data.user.email.clone()}</p>
                                    <p class="text-xs text-gray-400">
                                        {format!("Signed in via {}", data.authenticated_via)}
                                    </p>
                                </div>
                            }
                        })
                }}

                <div class="rounded-lg bg-white shadow p-6 space-y-4">
                    <h2 class="text-lg font-medium text-gray-900">{"Upload study material"}</h2>
                    <input
                        type="file"
                        class="block w-full text-sm text-gray-600"
                        on:change=handle_file_change
                    />
                    {move || {
                        progress
                            .get()
                            .map(|percent| {
                                view! {
                                    <div>
                                        <div class="h-2 w-full rounded bg-gray-200">
                                            <div
                                                class="h-2 rounded bg-blue-600"
                                                style=format!("width: {}%", percent)
                                            ></div>
                                        </div>
                                        <p class="mt-1 text-xs text-gray-500">
                                            {format!("{percent}%")}
                                        </p>
                                    </div>
                                }
                            })
                    }}
                    {move || {
                        status
                            .get()
                            .map(|message| {
                                view! { <p class="text-sm text-gray-700">{message}</p> }
                            })
                    }}
                </div>
            </div>
        </div>
    }
}
