use leptos::*;
use leptos_router::*;

mod api;
mod components;
mod pages;
mod state;
mod validation;

use pages::{
    dashboard::DashboardPage, home::HomePage, login::LoginPage, register::RegisterPage,
};

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Starting StudyHub frontend");

    mount_to_body(|| {
        view! {
            <state::auth::AuthProvider>
                <Router>
                    <Routes>
                        <Route path="/" view=HomePage/>
                        <Route path="/login" view=LoginPage/>
                        <Route path="/register" view=RegisterPage/>
                        <Route path="/dashboard" view=DashboardPage/>
                    </Routes>
                </Router>
            </state::auth::AuthProvider>
        }
    });
}
