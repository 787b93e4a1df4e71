use crate::web::router::Link;
use leptos::prelude::*;
use parkhub::AppRoute;

/// 顶部导航栏中出现的路由
const NAV_ROUTES: [(AppRoute, &str); 5] = [
    (AppRoute::Dashboard, "Dashboard"),
    (AppRoute::Parking, "Parking"),
    (AppRoute::Tickets, "Tickets"),
    (AppRoute::Inbox, "Inbox"),
    (AppRoute::Settings, "Settings"),
];

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <div class="navbar bg-base-100 shadow-sm px-4">
            <div class="flex-1">
                <Link to=AppRoute::Home.to_path() class="btn btn-ghost text-xl">
                    "The Parking Hub"
                </Link>
            </div>
            <ul class="menu menu-horizontal px-1 gap-1">
                {NAV_ROUTES
                    .iter()
                    .map(|(route, label)| {
                        view! {
                            <li>
                                <Link to=route.to_path()>{*label}</Link>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

/// 带导航栏的页面骨架
#[component]
pub fn PageShell(
    #[prop(into)] heading: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <main class="container mx-auto p-6">
                <h1 class="text-3xl font-bold mb-6">{heading}</h1>
                {children()}
            </main>
        </div>
    }
}
