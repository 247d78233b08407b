//! 会话模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//! token 的持久化统一走 [`SessionStore`]，信号只是它的响应式镜像。

use std::sync::Arc;

use leptos::prelude::*;

use homepulse_shared::LoginRequest;

use crate::api;
use crate::request::{ApiContext, ApiResult, SessionStore};

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 是否已认证
    pub is_authenticated: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
    /// token 持久化入口
    store: Arc<dyn SessionStore + Send + Sync>,
}

impl AuthContext {
    /// 创建新的认证上下文
    ///
    /// 初始状态从持久化存储中恢复：token 存在即视为已认证。
    pub fn new(store: Arc<dyn SessionStore + Send + Sync>) -> Self {
        let (state, set_state) = signal(AuthState {
            is_authenticated: store.token().is_some(),
        });
        Self {
            state,
            set_state,
            store,
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    /// 保存 token 并置为已认证
    pub fn establish(&self, token: &str) {
        self.store.save_token(token);
        self.set_state.update(|state| state.is_authenticated = true);
    }

    /// 清除 token 并置为未认证
    ///
    /// 导航由路由服务的认证状态监听自动处理。
    pub fn reset(&self) {
        self.store.reset_token();
        self.set_state
            .update(|state| state.is_authenticated = false);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录并保存会话
///
/// # Arguments
/// * `auth` - 认证上下文
/// * `api_ctx` - 请求上下文
/// * `email` / `password` - 登录凭据
pub async fn login(
    auth: &AuthContext,
    api_ctx: &ApiContext,
    email: String,
    password: String,
) -> ApiResult<()> {
    let data = api::user::login(api_ctx, &LoginRequest { email, password }).await?;
    auth.establish(&data.token);
    Ok(())
}

/// 注销并清除会话
pub async fn logout(auth: &AuthContext, api_ctx: &ApiContext) {
    // 后端登出失败不阻塞本地清理
    if let Err(err) = api::user::logout(api_ctx).await {
        log::warn!("[Session] logout request failed: {}", err);
    }
    auth.reset();
}
