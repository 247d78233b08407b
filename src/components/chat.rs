use leptos::prelude::*;
use leptos::task::spawn_local;

use homepulse_shared::{ChatMessage, ChatRequest, ChatRole};

use crate::api::chatbot;
use crate::notify::use_notify;
use crate::request::{ApiContext, ApiError};

/// AI 聊天页
///
/// 回复走流式接口：拿到原始响应后由本组件消费。
/// 当前实现一次性读完响应体，增量渲染留待后续接入。
#[component]
pub fn ChatPage() -> impl IntoView {
    let api_ctx = expect_context::<ApiContext>();
    let notify = use_notify();

    let (session_id, set_session_id) = signal(Option::<String>::None);
    let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
    let (draft, set_draft) = signal(String::new());
    let (is_sending, set_is_sending) = signal(false);

    // 进入页面时检查聊天服务状态并创建会话
    {
        let api_ctx = api_ctx.clone();
        Effect::new(move |_| {
            let api_ctx = api_ctx.clone();
            spawn_local(async move {
                match chatbot::check_auth(&api_ctx).await {
                    Ok(status) if !status.authenticated => {
                        notify.error("Error", "聊天服务暂不可用");
                        return;
                    }
                    Err(err) => {
                        notify.api_error(&err);
                        return;
                    }
                    Ok(_) => {}
                }

                match chatbot::get_new_session(&api_ctx).await {
                    Ok(session) => set_session_id.set(Some(session.session_id)),
                    Err(err) => notify.api_error(&err),
                }
            });
        });
    }

    let on_send = {
        let api_ctx = api_ctx.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let text = draft.get();
            let Some(session) = session_id.get() else {
                notify.error("Error", "会话尚未就绪");
                return;
            };
            if text.trim().is_empty() || is_sending.get() {
                return;
            }

            set_messages.update(|list| {
                list.push(ChatMessage {
                    role: ChatRole::User,
                    content: text.clone(),
                })
            });
            set_draft.set(String::new());
            set_is_sending.set(true);

            let api_ctx = api_ctx.clone();
            spawn_local(async move {
                let request = ChatRequest {
                    session_id: session,
                    message: text,
                };
                let reply = match chatbot::stream_chat(&api_ctx, &request).await {
                    Ok(response) => response
                        .text()
                        .await
                        .map_err(|e| ApiError::Network(e.to_string())),
                    Err(err) => Err(err),
                };
                match reply {
                    Ok(content) => set_messages.update(|list| {
                        list.push(ChatMessage {
                            role: ChatRole::Assistant,
                            content,
                        })
                    }),
                    Err(err) => notify.api_error(&err),
                }
                set_is_sending.set(false);
            });
        }
    };

    view! {
        <div class="container mx-auto p-6 max-w-2xl flex flex-col min-h-screen">
            <h1 class="text-2xl font-bold mb-4">"AI 助手"</h1>

            <div class="flex-1 space-y-2 overflow-y-auto">
                <For
                    each={move || messages.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(i, _)| *i
                    children=move |(_, message): (usize, ChatMessage)| {
                        let bubble = match message.role {
                            ChatRole::User => "chat chat-end",
                            ChatRole::Assistant => "chat chat-start",
                        };
                        view! {
                            <div class=bubble>
                                <div class="chat-bubble">{message.content.clone()}</div>
                            </div>
                        }
                    }
                />
            </div>

            <form class="flex gap-2 mt-4" on:submit=on_send>
                <input
                    type="text"
                    class="input input-bordered flex-1"
                    placeholder="问问市场行情..."
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    prop:value=draft
                />
                <button class="btn btn-primary" disabled=move || is_sending.get()>
                    {move || if is_sending.get() { "发送中..." } else { "发送" }}
                </button>
            </form>
        </div>
    }
}
