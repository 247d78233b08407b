use leptos::prelude::*;

use crate::session::use_auth;
use crate::web::router::use_router;

/// 首页
#[component]
pub fn HomePage() -> impl IntoView {
    let auth_state = use_auth().state;
    let router = use_router();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-lg">
                    <h1 class="text-5xl font-bold">"HomePulse"</h1>
                    <p class="py-6 text-base-content/70">
                        "按 Zipcode / Metro 查看房价走势与增长率排行，或与 AI 助手讨论市场数据。"
                    </p>
                    <div class="flex gap-4 justify-center">
                        <button
                            class="btn btn-primary"
                            on:click=move |_| router.navigate("/dataByZip")
                        >
                            "市场数据"
                        </button>
                        <button
                            class="btn btn-outline"
                            on:click=move |_| router.navigate("/chat")
                        >
                            "AI 助手"
                        </button>
                        <Show when=move || !auth_state.get().is_authenticated>
                            <button
                                class="btn btn-ghost"
                                on:click=move |_| router.navigate("/login")
                            >
                                "登录"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
