use crate::store::{Action, StoreContext, View};
use yew::prelude::*;

#[function_component(Home)]
pub fn home() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let card = |title: &'static str, body: &'static str, button: &'static str, action: Callback<MouseEvent>| {
        html! {
            <div class="card">
                <h2 class="card-title">{title}</h2>
                <p class="card-body">{body}</p>
                <button class="btn btn-primary" onclick={action}>{button}</button>
            </div>
        }
    };

    let on_new = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::NewConversation))
    };
    let on_saved = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::Navigate(View::Conversations)))
    };
    let on_settings = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::Navigate(View::Settings)))
    };

    html! {
        <div class="page">
            <h1 class="page-title">{"AI Chat Playground"}</h1>
            <p class="page-subtitle">
                {"Compare responses from different AI models with customizable settings"}
            </p>
            <div class="card-grid">
                {card(
                    "New Chat",
                    "Send one message to two models at once and compare their answers side by side.",
                    "Start New Chat",
                    on_new,
                )}
                {card(
                    "Saved Chats",
                    "Reopen, rename or delete the comparisons you have saved.",
                    "View Saved Chats",
                    on_saved,
                )}
                {card(
                    "Settings",
                    "Set the API key and endpoint used for every completion.",
                    "Open Settings",
                    on_settings,
                )}
            </div>
        </div>
    }
}
