use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4">
            <div class="max-w-md w-full text-center space-y-6">
                <h1 class="text-4xl font-extrabold text-gray-900">{"StudyHub"}</h1>
                <p class="text-gray-600">{"Your study companion. Sign in to pick up where you left off."}</p>
                <div class="flex justify-center gap-4">
                    <a
                        href="/login"
                        class="py-2 px-6 rounded-md text-white bg-blue-600 hover:bg-blue-700 text-sm font-medium"
                    >
                        {"Log in"}
                    </a>
                    <a
                        href="/register"
                        class="py-2 px-6 rounded-md text-blue-700 border border-blue-600 hover:bg-blue-50 text-sm font-medium"
                    >
                        {"Create account"}
                    </a>
                </div>
            </div>
        </div>
    }
}
