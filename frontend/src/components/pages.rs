use crate::components::layout::PageShell;
use crate::web::router::Link;
use leptos::prelude::*;
use parkhub::AppRoute;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-5xl font-bold">"The Parking Hub"</h1>
                    <p class="py-6 text-base-content/70">
                        "Tickets, residences, vehicles and billing for your building's parking."
                    </p>
                    <div class="flex gap-2 justify-center">
                        <Link to=AppRoute::Dashboard.to_path() class="btn btn-primary">
                            "Go to dashboard"
                        </Link>
                        <Link to=AppRoute::SignIn.to_path() class="btn btn-ghost">
                            "Sign in"
                        </Link>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ParkingPage() -> impl IntoView {
    view! {
        <PageShell heading="Parking">
            <p class="text-base-content/70">"Sections and slot occupancy."</p>
        </PageShell>
    }
}

#[component]
pub fn InboxPage() -> impl IntoView {
    view! {
        <PageShell heading="Inbox">
            <p class="text-base-content/70">"No new notifications."</p>
        </PageShell>
    }
}

#[component]
pub fn TicketsPage() -> impl IntoView {
    view! {
        <PageShell heading="Tickets">
            <p class="text-base-content/70">"Your tickets will appear here."</p>
        </PageShell>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <PageShell heading="Settings">
            <p class="text-base-content/70">"Profile, residence and vehicles."</p>
        </PageShell>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link to=AppRoute::Home.to_path() class="btn btn-link mt-4">
                    "Back to home"
                </Link>
            </div>
        </div>
    }
}
