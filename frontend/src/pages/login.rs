use leptos::*;
use web_sys::HtmlInputElement;

use crate::{
    api::{types::LoginRequest, ApiClient},
    components::forms::ValidatedInput,
    state::auth as auth_state,
    validation,
};

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let email_error = create_rw_signal(None::<String>);
    let password = create_rw_signal(String::new());
    let remember = create_rw_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let (loading, set_loading) = create_signal(false);
    let auth = auth_state::use_auth();

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get() {
            return;
        }
        let email_value = email.get();
        let password_value = password.get();

        if let Err(message) = validation::validate_email(&email_value) {
            email_error.set(Some(message));
            return;
        }
        if password_value.is_empty() {
            set_error.set(Some("Enter your password".to_string()));
            return;
        }

        set_loading.set(true);
        set_error.set(None);
        let remember_value = remember.get();

        spawn_local(async move {
            let request = LoginRequest {
                email: email_value,
                password: password_value,
                remember: remember_value,
            };
            match ApiClient::new().login(&request).await {
                Ok(data) => {
                    auth.user.set(Some(data.user));
                    auth.csrf_token.set(Some(data.csrf_token));
                    set_loading.set(false);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/dashboard");
                    }
                }
                Err(err) => {
                    set_loading.set(false);
                    set_error.set(Some(err.to_string()));
                }
            }
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                        {"Log in to StudyHub"}
                    </h2>
                    <p class="mt-2 text-center text-sm text-gray-600">
                        {"Your study companion"}
                    </p>
                </div>
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <ValidatedInput
                        id="email"
                        label="Email"
                        input_type="email"
                        placeholder="you@example.com"
                        value=email
                        error=email_error
                        validate=Callback::new(|value: String| validation::validate_email(&value))
                    />
                    <div>
                        <label for="password" class="block text-sm font-medium text-gray-700">
                            {"Password"}
                        </label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            required
                            class="appearance-none block w-full px-3 py-2 rounded-md border border-gray-300 text-sm focus:outline-none focus:ring-2 focus:ring-blue-500"
                            prop:value=password
                            on:input=move |ev| {
                                let target = event_target::<HtmlInputElement>(&ev);
                                password.set(target.value());
                            }
                        />
                    </div>
                    <div class="flex items-center">
                        <input
                            id="remember"
                            name="remember"
                            type="checkbox"
                            class="h-4 w-4 rounded border-gray-300"
                            prop:checked=remember
                            on:change=move |ev| {
                                let target = event_target::<HtmlInputElement>(&ev);
                                remember.set(target.checked());
                            }
                        />
                        <label for="remember" class="ml-2 block text-sm text-gray-700">
                            {"Remember me on this device"}
                        </label>
                    </div>

                    {move || {
                        error
                            .get()
                            .map(|message| {
                                view! { <p class="text-sm text-red-600 text-center">{message}</p> }
                            })
                    }}

                    <button
                        type="submit"
                        disabled=loading
                        class="group relative w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50"
                    >
                        {move || if loading.get() { "Logging in..." } else { "Log in" }}
                    </button>

                    <p class="text-center text-sm text-gray-600">
                        {"New here? "}
                        <a href="/register" class="text-blue-600 hover:underline">{"Create an account"}</a>
                    </p>
                </form>
            </div>
        </div>
    }
}
