//! HomePulse 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与认证守卫规则（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `request`: 请求封装（URL 解析 / token 注入 / 信封处理）
//! - `session`: 认证状态管理
//! - `notify`: 通知收口（请求层错误的展示端）
//! - `api`: 领域接口声明
//! - `components`: UI 组件层

use std::sync::Arc;

use leptos::prelude::*;

pub mod api;
pub mod config;
pub mod notify;
pub mod request;
pub mod session;
pub mod utils;
pub mod web;

mod components;

use components::chat::ChatPage;
use components::home::HomePage;
use components::login::LoginPage;
use components::market::{MarketPage, MarketView};

use notify::{NotificationArea, NotifyContext};
use request::{ApiContext, LocalSession};
use session::AuthContext;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login { .. } => view! { <LoginPage /> }.into_any(),
        AppRoute::Chat => view! { <ChatPage /> }.into_any(),
        AppRoute::DataByZip => view! { <MarketPage view=MarketView::ByZip /> }.into_any(),
        AppRoute::DataByMetro => view! { <MarketPage view=MarketView::ByMetro /> }.into_any(),
        AppRoute::PageMarket => view! { <MarketPage view=MarketView::Overview /> }.into_any(),
        AppRoute::About => view! {
            <div class="container mx-auto p-6">
                <h1 class="text-2xl font-bold">"关于 HomePulse"</h1>
                <p class="mt-4 text-base-content/70">
                    "基于公开市场数据的房价走势与排行工具。"
                </p>
            </div>
        }
        .into_any(),
        AppRoute::Survey => view! {
            <div class="container mx-auto p-6">
                <h1 class="text-2xl font-bold">"市场问卷"</h1>
            </div>
        }
        .into_any(),
        AppRoute::DataByPowerbi => view! {
            <div class="container mx-auto p-6">
                <h1 class="text-2xl font-bold">"PowerBI 报表"</h1>
            </div>
        }
        .into_any(),
        AppRoute::ConditionReportForm => view! {
            <div class="container mx-auto p-6">
                <h1 class="text-2xl font-bold">"市场报告申请"</h1>
            </div>
        }
        .into_any(),
        AppRoute::User(id) => {
            let label = match id {
                Some(id) => format!("用户 ID: {}", id),
                None => "当前用户".to_string(),
            };
            view! {
                <div class="container mx-auto p-6">
                    <h1 class="text-2xl font-bold">"用户中心"</h1>
                    <p class="mt-2 text-base-content/70">{label}</p>
                </div>
            }
            .into_any()
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 通知上下文：请求层错误在展示层收口
    let notify_ctx = NotifyContext::new();
    provide_context(notify_ctx);

    // 2. 认证上下文：token 持久化统一经过 LocalSession
    let auth_ctx = AuthContext::new(Arc::new(LocalSession));
    provide_context(auth_ctx.clone());

    // 3. 请求上下文：会话过期时只重置认证状态，
    //    跳转登录页由路由服务的状态监听完成
    let expired_auth = auth_ctx.clone();
    let api_ctx = ApiContext::new(config::base_url())
        .on_session_expired(move || expired_auth.reset());
    provide_context(api_ctx);

    // 4. 获取认证状态信号，用于注入路由服务（解耦）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <NotificationArea />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
