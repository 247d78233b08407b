//! 路由服务
//!
//! History API 的所有读写都集中在本模块。导航流程固定为
//! 守卫 -> 写入历史 -> 更新路由信号，三个入口（编程式导航、
//! popstate、认证状态变化）共用同一段守卫逻辑 [`guard`]。
//!
//! 认证守卫只是一层 UX 重定向，不构成安全边界；
//! 真正的访问控制由后端的会话过期返回（1002）兜底。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, is_protected, login_redirect, login_return_target};

/// 历史写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavMode {
    /// 产生一条新的历史记录
    Push,
    /// 原地替换（重定向、初始守卫、popstate 修正）
    Replace,
}

/// 守卫结果：实际应落地的路径
///
/// 未认证访问受保护路径时返回登录页地址（重定向一律用 Replace，
/// 避免后退按钮陷入重定向循环），否则原样放行。
fn guard(path: &str, is_auth: bool) -> (String, NavMode, bool) {
    if !is_auth && is_protected(path) {
        (login_redirect(path), NavMode::Replace, true)
    } else {
        (path.to_string(), NavMode::Push, false)
    }
}

/// 当前浏览器地址（path + query）
fn current_path() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    match location.search() {
        Ok(search) if !search.is_empty() => format!("{}{}", path, search),
        _ => path,
    }
}

/// 写入浏览器历史
fn write_history(path: &str, mode: NavMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        NavMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        NavMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
    if let Err(e) = result {
        log::warn!("[Router] history write failed: {:?}", e);
    }
}

/// 路由器服务
///
/// 当前路由以信号暴露给界面；认证状态以 `Signal<bool>` 注入，
/// 路由层不依赖认证模块的具体类型。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 编程式导航，带认证守卫
    pub fn navigate(&self, path: &str) {
        self.apply(path, NavMode::Push);
    }

    /// 执行守卫并落地到历史与路由信号
    fn apply(&self, path: &str, requested: NavMode) {
        let (target, guard_mode, redirected) = guard(path, self.is_authenticated.get_untracked());
        if redirected {
            log::info!("[Router] access denied: {} -> login", path);
        }
        let mode = if redirected { guard_mode } else { requested };
        write_history(&target, mode);
        self.set_route.set(AppRoute::from_path(&target));
    }

    /// 监听浏览器前进 / 后退
    ///
    /// popstate 到达的地址同样过守卫：后退回到受保护页面
    /// 且会话已失效时，原地修正到登录页。
    fn listen_popstate(&self) {
        let service = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            service.apply(&current_path(), NavMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }
        // 监听器与应用同生命周期，泄漏闭包保持其存活
        closure.forget();
    }

    /// 认证状态变化时的自动跳转
    ///
    /// 登录成功且停留在登录页：跳到 redirect 参数指向的页面（缺省首页）。
    /// 登出（含会话过期）且停留在受保护页面：跳到登录页并携带回跳参数。
    fn watch_auth(&self) {
        let service = *self;
        Effect::new(move |_| {
            let is_auth = service.is_authenticated.get();
            let route = service.current_route.get_untracked();

            if is_auth {
                if let AppRoute::Login { .. } = route {
                    let target = login_return_target(&route);
                    log::info!("[Router] logged in, returning to {}", target);
                    service.apply(&target, NavMode::Push);
                }
            } else if route.requires_auth() {
                log::info!("[Router] logged out on protected page, redirecting");
                service.apply(&route.to_path(), NavMode::Replace);
            }
        });
    }
}

/// 创建路由服务并注册到 Context
///
/// 初始 URL 也要过一次守卫：直接打开受保护地址时立即修正到登录页。
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.apply(&current_path(), NavMode::Replace);
    router.listen_popstate();
    router.watch_auth();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 路由器根组件，应挂在 App 根部
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口：按当前路由渲染对应视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}
