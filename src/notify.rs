//! 通知模块
//!
//! 请求层只返回错误值，是否提示、如何提示由这里决定（展示层收口）。
//! 信号驱动的非阻塞通知列表，由 App 根部的 [`NotificationArea`] 渲染。

use leptos::prelude::*;

use crate::request::ApiError;

/// 单条通知
#[derive(Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
}

/// 通知上下文
#[derive(Clone, Copy)]
pub struct NotifyContext {
    items: ReadSignal<Vec<Notification>>,
    set_items: WriteSignal<Vec<Notification>>,
    next_id: StoredValue<u32>,
}

impl NotifyContext {
    pub fn new() -> Self {
        let (items, set_items) = signal(Vec::new());
        Self {
            items,
            set_items,
            next_id: StoredValue::new(0),
        }
    }

    /// 推送一条错误通知
    pub fn error(&self, title: &str, message: &str) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        let notification = Notification {
            id,
            title: title.to_string(),
            message: message.to_string(),
        };
        self.set_items.update(|items| items.push(notification));
    }

    /// 将请求层错误转为一条用户可见的通知
    ///
    /// 会话过期不提示：路由层会直接跳转登录页。
    pub fn api_error(&self, err: &ApiError) {
        if matches!(err, ApiError::SessionExpired) {
            return;
        }
        self.error("Error", &err.message());
    }

    /// 关闭指定通知
    pub fn dismiss(&self, id: u32) {
        self.set_items.update(|items| items.retain(|n| n.id != id));
    }
}

impl Default for NotifyContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取通知上下文
pub fn use_notify() -> NotifyContext {
    use_context::<NotifyContext>().expect("NotifyContext should be provided")
}

/// 通知渲染区域，挂在 App 根部
#[component]
pub fn NotificationArea() -> impl IntoView {
    let notify = use_notify();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || notify.items.get()
                key=|n| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div role="alert" class="alert alert-error shadow-lg">
                            <div>
                                <span class="font-bold">{n.title.clone()}</span>
                                <span class="ml-2">{n.message.clone()}</span>
                            </div>
                            <button class="btn btn-ghost btn-xs" on:click=move |_| notify.dismiss(id)>
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
