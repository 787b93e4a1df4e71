use crate::auth::use_auth;
use crate::components::layout::PageShell;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use parkhub::AppRoute;

/// 登录页
///
/// 由守卫重定向而来时，`redirect` 参数保存了原始路径；
/// 会话恢复后（例如在其他标签页登录）可以直接继续前往。
#[component]
pub fn SignInPage() -> impl IntoView {
    let router = use_router();
    let redirect_param = use_auth().redirect_param();
    let redirect = Memo::new(move |_| {
        router
            .current_location()
            .get()
            .query(&redirect_param)
    });

    let on_continue = move |_| {
        let target = redirect
            .get_untracked()
            .unwrap_or_else(|| AppRoute::Dashboard.to_path().to_string());
        router.navigate(&target);
    };

    view! {
        <PageShell heading="Sign In">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <div class="card-body">
                    <Show when=move || redirect.get().is_some()>
                        <div role="alert" class="alert alert-warning text-sm py-2">
                            <span>
                                "Please sign in to continue to "
                                <code>{move || redirect.get().unwrap_or_default()}</code>
                            </span>
                        </div>
                    </Show>
                    <p class="text-base-content/70">
                        "Your session has expired or you are not signed in."
                    </p>
                    <div class="card-actions justify-between items-center mt-4">
                        <Link to=AppRoute::SignUp.to_path() class="link link-primary">
                            "Create an account"
                        </Link>
                        <button class="btn btn-primary" on:click=on_continue>
                            "Continue"
                        </button>
                    </div>
                </div>
            </div>
        </PageShell>
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    view! {
        <PageShell heading="Sign Up">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <div class="card-body">
                    <p class="text-base-content/70">
                        "Registration is handled by your building administrator."
                    </p>
                    <div class="card-actions justify-end mt-4">
                        <Link to=AppRoute::SignIn.to_path() class="btn btn-outline">
                            "Back to sign in"
                        </Link>
                    </div>
                </div>
            </div>
        </PageShell>
    }
}
