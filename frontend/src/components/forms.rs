use leptos::*;

/// Picks the input's CSS state class from its validation result. Kept as a
/// plain function so the styling contract is testable off-screen.
fn input_state_class(has_error: bool, has_value: bool) -> &'static str {
    if has_error {
        "invalid border-red-500 focus:ring-red-500"
    } else if has_value {
        "valid border-green-500 focus:ring-green-500"
    } else {
        "border-gray-300 focus:ring-blue-500"
    }
}

/// Text input that re-validates on every input event, toggling the
/// valid/invalid state class and an adjacent error message.
#[component]
pub fn ValidatedInput(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
    value: RwSignal<String>,
    error: RwSignal<Option<String>>,
    #[prop(into)] validate: Callback<String, Result<(), String>>,
) -> impl IntoView {
    let on_input = move |ev: leptos::ev::Event| {
        let next = event_target_value(&ev);
        value.set(next.clone());
        match validate.call(next) {
            Ok(()) => error.set(None),
            Err(message) => error.set(Some(message)),
        }
    };

    let input_class = move || {
        format!(
            "appearance-none block w-full px-3 py-2 rounded-md border text-sm \
             focus:outline-none focus:ring-2 {}",
            input_state_class(error.get().is_some(), !value.get().is_empty())
        )
    };

    view! {
        <div>
            <label for=id class="block text-sm font-medium text-gray-700">{label}</label>
            <input
                id=id
                name=id
                type=input_type
                placeholder=placeholder
                class=input_class
                prop:value=value
                on:input=on_input
            />
            {move || {
                error
                    .get()
                    .map(|message| view! { <p class="mt-1 text-sm text-red-600">{message}</p> })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_class_tracks_validation_result() {
        assert!(input_state_class(true, true).contains("invalid"));
        assert!(input_state_class(true, false).contains("invalid"));
        assert!(input_state_class(false, true).contains("valid"));
        assert!(!input_state_class(false, false).contains("valid"));
        assert!(!input_state_class(false, false).contains("invalid"));
    }
}
