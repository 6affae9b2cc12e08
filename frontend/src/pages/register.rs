use leptos::*;

use crate::{
    api::{types::RegisterRequest, ApiClient},
    components::forms::ValidatedInput,
    validation,
};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let full_name = create_rw_signal(String::new());
    let full_name_error = create_rw_signal(None::<String>);
    let email = create_rw_signal(String::new());
    let email_error = create_rw_signal(None::<String>);
    let phone = create_rw_signal(String::new());
    let phone_error = create_rw_signal(None::<String>);
    let password = create_rw_signal(String::new());
    let password_error = create_rw_signal(None::<String>);
    let (error, set_error) = create_signal(None::<String>);
    let (loading, set_loading) = create_signal(false);

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get() {
            return;
        }

        let mut valid = true;
        if let Err(message) = validation::validate_name(&full_name.get()) {
            full_name_error.set(Some(message));
            valid = false;
        }
        if let Err(message) = validation::validate_email(&email.get()) {
            email_error.set(Some(message));
            valid = false;
        }
        // Phone stays optional; only a non-empty value is checked.
        let phone_value = phone.get();
        if !phone_value.is_empty() {
            if let Err(message) = validation::validate_phone(&phone_value) {
                phone_error.set(Some(message));
                valid = false;
            }
        }
        if let Err(message) = validation::validate_password(&password.get()) {
            password_error.set(Some(message));
            valid = false;
        }
        if !valid {
            return;
        }

        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let request = RegisterRequest {
                full_name: full_name.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
                phone: Some(phone.get_untracked()).filter(|p| !p.is_empty()),
            };
            match ApiClient::new().register(&request).await {
                Ok(_) => {
                    set_loading.set(false);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/login");
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
                <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                    {"Create your StudyHub account"}
                </h2>
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <ValidatedInput
                        id="full_name"
                        label="Full name"
                        placeholder="Ada Lovelace"
                        value=full_name
                        error=full_name_error
                        validate=Callback::new(|value: String| validation::validate_name(&value))
                    />
                    <ValidatedInput
                        id="email"
                        label="Email"
                        input_type="email"
                        placeholder="you@example.com"
                        value=email
                        error=email_error
                        validate=Callback::new(|value: String| validation::validate_email(&value))
                    />
                    <ValidatedInput
                        id="phone"
                        label="Phone (optional)"
                        input_type="tel"
                        placeholder="+1 (555) 867-5309"
                        value=phone
                        error=phone_error
                        validate=Callback::new(|value: String| {
                            if value.is_empty() {
                                Ok(())
                            } else {
                                validation::validate_phone(&value)
                            }
                        })
                    />
                    <ValidatedInput
                        id="password"
                        label="Password"
                        input_type="password"
                        value=password
                        error=password_error
                        validate=Callback::new(|value: String| validation::validate_password(&value))
                    />

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
                        {move || if loading.get() { "Creating account..." } else { "Sign up" }}
                    </button>

                    <p class="text-center text-sm text-gray-600">
                        {"Already registered? "}
                        <a href="/login" class="text-blue-600 hover:underline">{"Log in"}</a>
                    </p>
                </form>
            </div>
        </div>
    }
}
