//! Toast Host Component
//!
//! Renders transient notices from the app context and clears each one
//! after a short delay.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{AppContext, NoticeKind};

const TOAST_VISIBLE_MS: u32 = 4000;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="toast-host">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    spawn_local(async move {
                        TimeoutFuture::new(TOAST_VISIBLE_MS).await;
                        ctx.dismiss(id);
                    });
                    let kind_class = match notice.kind {
                        NoticeKind::Info => "toast info",
                        NoticeKind::Error => "toast error",
                    };
                    view! {
                        <div class=kind_class>
                            <div class="toast-title">{notice.title.clone()}</div>
                            <div class="toast-body">{notice.body.clone()}</div>
                            <button class="toast-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
