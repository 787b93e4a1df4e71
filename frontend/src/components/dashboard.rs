use crate::auth::use_auth;
use crate::components::layout::PageShell;
use crate::web::router::Link;
use leptos::prelude::*;
use parkhub::AppRoute;

/// 控制面板上的快捷入口
const SHORTCUTS: [(AppRoute, &str, &str); 4] = [
    (AppRoute::Parking, "Parking", "Check vehicles in and out by section."),
    (AppRoute::Tickets, "Tickets", "Daily, monthly and reserved tickets."),
    (AppRoute::Inbox, "Inbox", "Notifications from management."),
    (AppRoute::Settings, "Settings", "Residence, vehicles and billing."),
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    // 能进入此页面说明守卫已放行，此处只做展示
    let (badge_class, session_label) = if auth.is_authenticated() {
        ("badge badge-success mb-6", "Session active")
    } else {
        ("badge badge-ghost mb-6", "Session unknown")
    };

    view! {
        <PageShell heading="Dashboard">
            <div class=badge_class>{session_label}</div>
            <div class="grid gap-4 md:grid-cols-2">
                {SHORTCUTS
                    .iter()
                    .map(|(route, title, description)| {
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h2 class="card-title">{*title}</h2>
                                    <p class="text-base-content/70">{*description}</p>
                                    <div class="card-actions justify-end">
                                        <Link to=route.to_path() class="btn btn-primary btn-sm">
                                            "Open"
                                        </Link>
                                    </div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </PageShell>
    }
}
