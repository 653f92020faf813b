use crate::store::{Action, StoreContext, View};
use yew::prelude::*;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let navigate = {
        let store = store.clone();
        Callback::from(move |view: View| store.dispatch(Action::Navigate(view)))
    };

    let on_new = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::NewConversation))
    };

    let on_open = {
        let store = store.clone();
        Callback::from(move |id: String| store.dispatch(Action::OpenConversation(id)))
    };

    let nav_item = |label: &'static str, view: View| {
        let is_active = store.view == view;
        let navigate = navigate.clone();
        html! {
            <div
                class={classes!("nav-item", if is_active { "active" } else { "" })}
                onclick={move |_| navigate.emit(view.clone())}
            >
                {label}
            </div>
        }
    };

    let active_id = store.persisted.then(|| store.conversation.id.clone());

    html! {
        <div class="sidebar">
            <header>
                <div class="sidebar-header-content">
                    <h1 class="app-title">{"Chat Playground"}</h1>
                </div>
                <div class="sidebar-toolbar">
                    <button class="icon-btn" onclick={on_new} title="New Chat">
                        <svg viewBox="0 0 24 24"><path d="M19 13h-6v6h-2v-6H5v-2h6V5h2v6h6v2z"></path></svg>
                    </button>
                </div>
            </header>

            <div class="section-label">{"Navigation"}</div>
            <nav class="nav-list">
                {nav_item("Home", View::Home)}
                {nav_item("All Chats", View::Conversations)}
                {nav_item("Settings", View::Settings)}
            </nav>

            <div class="section-label">{"Saved Chats"}</div>
            <div class="chat-list">
                if store.summaries.is_empty() {
                    <div class="sidebar-empty-state">{"No saved chats yet."}</div>
                }
                { for store.summaries.iter().map(|summary| {
                    let id = summary.id.clone();
                    let on_open = on_open.clone();
                    let is_active = active_id.as_deref() == Some(summary.id.as_str());
                    html! {
                        <div
                            class={classes!("chat-item", if is_active { "active" } else { "" })}
                            onclick={move |_| on_open.emit(id.clone())}
                        >
                            <div class="chat-name">{&summary.name}</div>
                        </div>
                    }
                })}
            </div>

            <div class="sidebar-footer">
                {"Chat Playground v0.1.0"}
            </div>
        </div>
    }
}
