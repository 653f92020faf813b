use crate::store::{Action, StoreContext};
use yew::prelude::*;

#[function_component(ConversationList)]
pub fn conversation_list() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let on_open = {
        let store = store.clone();
        Callback::from(move |id: String| store.dispatch(Action::OpenConversation(id)))
    };

    let on_rename = {
        let store = store.clone();
        Callback::from(move |(id, current): (String, String)| {
            let name = web_sys::window()
                .and_then(|w| w.prompt_with_message_and_default("Rename chat", &current).ok())
                .flatten();
            if let Some(name) = name {
                store.dispatch(Action::RenameSaved { id, name });
            }
        })
    };

    let on_delete = {
        let store = store.clone();
        Callback::from(move |id: String| {
            let confirmed = web_sys::window()
                .and_then(|w| {
                    w.confirm_with_message(
                        "Are you sure you want to delete this chat? This action cannot be undone.",
                    )
                    .ok()
                })
                == Some(true);
            if confirmed {
                store.dispatch(Action::DeleteConversation(id));
            }
        })
    };

    let on_new = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::NewConversation))
    };

    html! {
        <div class="page">
            <h1 class="page-title">{"Saved Chats"}</h1>
            <p class="page-subtitle">{"Access your previously saved conversations"}</p>

            if let Some(notice) = &store.notice {
                <div class="notice">{notice}</div>
            }

            if store.summaries.is_empty() {
                <div class="empty-state">
                    <p>{"No saved chats found"}</p>
                    <button class="btn btn-primary" onclick={on_new}>{"Start a New Chat"}</button>
                </div>
            } else {
                <div class="saved-list">
                    { for store.summaries.iter().map(|summary| {
                        let open_id = summary.id.clone();
                        let rename_args = (summary.id.clone(), summary.name.clone());
                        let delete_id = summary.id.clone();
                        let on_open = on_open.clone();
                        let on_rename = on_rename.clone();
                        let on_delete = on_delete.clone();
                        html! {
                            <div class="saved-item">
                                <div class="saved-info">
                                    <div class="saved-name">{&summary.name}</div>
                                    <div class="saved-date">
                                        {summary.created_at.format("%Y-%m-%d %H:%M").to_string()}
                                    </div>
                                </div>
                                <div class="saved-actions">
                                    <button class="btn btn-secondary btn-sm" onclick={move |_| on_open.emit(open_id.clone())}>
                                        {"Open"}
                                    </button>
                                    <button class="btn btn-secondary btn-sm" onclick={move |_| on_rename.emit(rename_args.clone())}>
                                        {"Rename"}
                                    </button>
                                    <button class="btn btn-danger btn-sm" onclick={move |_| on_delete.emit(delete_id.clone())}>
                                        {"Delete"}
                                    </button>
                                </div>
                            </div>
                        }
                    })}
                </div>
            }
        </div>
    }
}
