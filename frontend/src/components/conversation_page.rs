use super::bot_settings::BotSettings;
use super::comparison_view::ComparisonView;
use crate::store::{Action, StoreContext};
use shared::models::{BotSlot, GenerationSettings};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Chat,
    Settings,
}

#[function_component(ConversationPage)]
pub fn conversation_page() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let tab = use_state(|| Tab::Chat);

    let on_name_input = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            store.dispatch(Action::RenameConversation(input.value()));
        })
    };

    let on_settings = |slot: BotSlot| {
        let store = store.clone();
        Callback::from(move |settings: GenerationSettings| {
            store.dispatch(Action::UpdateSettings { slot, settings })
        })
    };

    let on_dismiss = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::SetNotice(None)))
    };

    let select = |target: Tab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };

    let conversation = &store.conversation;

    html! {
        <div class="page conversation-page">
            <div class="conversation-header">
                <input type="text" class="form-input chat-name"
                    value={conversation.name.clone()}
                    oninput={on_name_input}
                    placeholder="Chat name"
                />
                if !store.persisted {
                    <span class="badge">{"Unsaved"}</span>
                }
            </div>

            if let Some(notice) = &store.notice {
                <div class="notice">
                    <span>{notice}</span>
                    <button class="action-btn" onclick={on_dismiss}>{"×"}</button>
                </div>
            }

            <div class="tabs">
                <button class={classes!("tab", if *tab == Tab::Chat { "active" } else { "" })} onclick={select(Tab::Chat)}>
                    {"Chat"}
                </button>
                <button class={classes!("tab", if *tab == Tab::Settings { "active" } else { "" })} onclick={select(Tab::Settings)}>
                    {"Bot Settings"}
                </button>
            </div>

            {
                match *tab {
                    Tab::Chat => html! { <ComparisonView /> },
                    Tab::Settings => html! {
                        <div class="bot-settings-grid">
                            { for BotSlot::ALL.into_iter().map(|slot| html! {
                                <BotSettings
                                    slot={slot}
                                    settings={conversation.settings(slot).clone()}
                                    on_change={on_settings(slot)}
                                />
                            })}
                        </div>
                    },
                }
            }
        </div>
    }
}
