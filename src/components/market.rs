use leptos::prelude::*;
use leptos::task::spawn_local;

use homepulse_shared::{RankQuery, RankRow, StateRecord};

use crate::api::charts;
use crate::notify::use_notify;
use crate::request::ApiContext;
use crate::utils::{data_page, extract_all_states, format_fixed_rate, number_formatter, to_thousands};

/// 市场数据的查看维度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketView {
    ByZip,
    ByMetro,
    Overview,
}

impl MarketView {
    fn title(&self) -> &'static str {
        match self {
            MarketView::ByZip => "按 Zipcode 查看",
            MarketView::ByMetro => "按 Metro 查看",
            MarketView::Overview => "市场综合",
        }
    }
}

const PAGE_SIZE: usize = 10;

/// 市场数据页
///
/// 加载州列表与排行数据，分页展示。排行按增长率由后端排序。
#[component]
pub fn MarketPage(
    /// 查看维度
    view: MarketView,
) -> impl IntoView {
    let api_ctx = expect_context::<ApiContext>();
    let notify = use_notify();

    let (states, set_states) = signal(Vec::<StateRecord>::new());
    let (rows, set_rows) = signal(Vec::<RankRow>::new());
    let (selected_state, set_selected_state) = signal(Option::<i64>::None);
    let (page, set_page) = signal(1usize);
    let (loading, set_loading) = signal(true);

    // 初始加载：州列表 + 默认排行
    {
        let api_ctx = api_ctx.clone();
        Effect::new(move |_| {
            let api_ctx = api_ctx.clone();
            spawn_local(async move {
                match charts::get_states_list(&api_ctx).await {
                    // 后端可能返回重复的州记录，入列前去重
                    Ok(list) => set_states.set(extract_all_states(&list)),
                    Err(err) => notify.api_error(&err),
                }

                let query = RankQuery::default();
                match charts::zipcode_rank(&api_ctx, &query).await {
                    Ok(list) => set_rows.set(list),
                    Err(err) => notify.api_error(&err),
                }
                set_loading.set(false);
            });
        });
    }

    // 切换州时重新拉取增长率排行
    let reload_rank = {
        let api_ctx = api_ctx.clone();
        move |state_id: Option<i64>| {
            let api_ctx = api_ctx.clone();
            set_selected_state.set(state_id);
            set_page.set(1);
            set_loading.set(true);
            spawn_local(async move {
                let query = RankQuery {
                    state_id,
                    ..Default::default()
                };
                match charts::growth_rate(&api_ctx, &query).await {
                    Ok(list) => set_rows.set(list),
                    Err(err) => notify.api_error(&err),
                }
                set_loading.set(false);
            });
        }
    };

    let current_rows = move || data_page(&rows.get(), page.get(), PAGE_SIZE);
    let page_count = move || rows.get().len().div_ceil(PAGE_SIZE).max(1);

    view! {
        <div class="container mx-auto p-6">
            <h1 class="text-2xl font-bold mb-4">{view.title()}</h1>

            <div class="flex gap-2 flex-wrap mb-4">
                <button
                    class=move || if selected_state.get().is_none() { "btn btn-sm btn-primary" } else { "btn btn-sm" }
                    on:click={
                        let reload_rank = reload_rank.clone();
                        move |_| reload_rank(None)
                    }
                >
                    "All"
                </button>
                <For
                    each=move || states.get()
                    key=|s| s.state_id
                    children={
                        let reload_rank = reload_rank.clone();
                        move |state: StateRecord| {
                            let id = state.state_id;
                            let reload_rank = reload_rank.clone();
                            view! {
                                <button
                                    class=move || if selected_state.get() == Some(id) { "btn btn-sm btn-primary" } else { "btn btn-sm" }
                                    on:click=move |_| reload_rank(Some(id))
                                >
                                    {state.state_name.clone()}
                                </button>
                            }
                        }
                    }
                />
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
            >
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Zipcode"</th>
                            <th>"中位房价"</th>
                            <th>"增长率 (%)"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=current_rows
                            key=|row| row.zipcode.clone()
                            children=move |row: RankRow| {
                                view! {
                                    <tr>
                                        <td>{row.zipcode.clone()}</td>
                                        <td title=to_thousands(row.median_price)>
                                            {number_formatter(row.median_price)}
                                        </td>
                                        <td>{format_fixed_rate(row.growth_rate)}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <div class="join mt-4">
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || page.get() <= 1
                        on:click=move |_| set_page.update(|p| *p -= 1)
                    >
                        "«"
                    </button>
                    <button class="join-item btn btn-sm">
                        {move || format!("{} / {}", page.get(), page_count())}
                    </button>
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || page.get() >= page_count()
                        on:click=move |_| set_page.update(|p| *p += 1)
                    >
                        "»"
                    </button>
                </div>
            </Show>
        </div>
    }
}
