use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::notify::use_notify;
use crate::request::ApiContext;
use crate::session::{login, use_auth};
use crate::web::route::login_return_target;
use crate::web::router::use_router;

/// 登录页
///
/// 登录成功后的回跳由路由服务监听认证状态完成
/// （redirect 参数在 Login 路由中携带）。
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api_ctx = expect_context::<ApiContext>();
    let notify = use_notify();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    // 已认证用户直接打开登录页时按回跳参数离开，只在挂载时检查一次。
    // 登录成功后的跳转统一由路由服务的认证监听完成，本组件不订阅认证信号。
    if auth.state.get_untracked().is_authenticated {
        let route = router.current_route().get_untracked();
        router.navigate(&login_return_target(&route));
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            notify.error("Error", "请填写邮箱和密码");
            return;
        }

        set_is_submitting.set(true);
        let auth = auth.clone();
        let api_ctx = api_ctx.clone();
        spawn_local(async move {
            if let Err(err) = login(&auth, &api_ctx, email.get(), password.get()).await {
                notify.api_error(&err);
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"HomePulse"</h1>
                    <p class="text-base-content/70">"登录后查看市场数据"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                } else {
                                    "登录".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
