use crate::api::GatewayClient;
use crate::store::{Action, StoreContext};
use shared::dispatch::{DispatchError, dispatch_turn};
use shared::models::{BotSlot, Message, Rating};
use shared::transcript::{self, Layout};
use std::time::Duration;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlTextAreaElement};
use yew::platform::time::sleep;
use yew::prelude::*;

const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Properties, PartialEq)]
pub struct MessageCardProps {
    pub message: Message,
}

/// One message with its sender, model and actions. Bot replies can be
/// rated; every message can be copied.
#[function_component(MessageCard)]
pub fn message_card(props: &MessageCardProps) -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let copied = use_state(|| false);
    let message = &props.message;

    let on_copy = {
        let text = message.text.clone();
        let copied = copied.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let promise = window.navigator().clipboard().write_text(&text);
            let copied = copied.clone();
            yew::platform::spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => {
                        copied.set(true);
                        sleep(COPIED_FEEDBACK).await;
                        copied.set(false);
                    }
                    Err(e) => tracing::error!("Failed to copy message: {:?}", e),
                }
            });
        })
    };

    let rate = |rating: Rating| {
        let store = store.clone();
        let message_id = message.id;
        Callback::from(move |_: MouseEvent| store.dispatch(Action::Rate { message_id, rating }))
    };

    let class = match message.sender.slot() {
        None => "message-user",
        Some(BotSlot::A) => "message-bot-a",
        Some(BotSlot::B) => "message-bot-b",
    };

    html! {
        <div class={classes!("message-card", class, if message.is_failure() { "message-failed" } else { "" })}>
            <div class="message-header">
                <span class="message-sender">{message.sender.label()}</span>
                if let Some(model_id) = &message.model_id {
                    <span class="message-model">{model_id}</span>
                }
            </div>
            <div class="message-text">{&message.text}</div>
            <div class="message-actions">
                <button class="action-btn" title="Copy to clipboard" onclick={on_copy}>
                    { if *copied { "Copied" } else { "Copy" } }
                </button>
                if !message.is_user() {
                    <button
                        class={classes!("action-btn", if message.rating == Some(Rating::Up) { "active" } else { "" })}
                        title="Good response"
                        onclick={rate(Rating::Up)}
                    >
                        {"👍"}
                    </button>
                    <button
                        class={classes!("action-btn", if message.rating == Some(Rating::Down) { "active" } else { "" })}
                        title="Bad response"
                        onclick={rate(Rating::Down)}
                    >
                        {"👎"}
                    </button>
                }
            </div>
        </div>
    }
}

#[function_component(ComparisonView)]
pub fn comparison_view() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let input_ref = use_node_ref();
    let container_ref = use_node_ref();

    // Auto-scroll on message change
    {
        let container_ref = container_ref.clone();
        let messages_len = store.conversation.messages.len();
        use_effect_with(messages_len, move |_| {
            if let Some(div) = container_ref.cast::<Element>() {
                div.set_scroll_top(div.scroll_height());
            }
            || {}
        });
    }

    let on_send = {
        let store = store.clone();
        let input_ref = input_ref.clone();

        Callback::from(move |_: ()| {
            let Some(input) = input_ref.cast::<HtmlTextAreaElement>() else {
                return;
            };
            let text = input.value();
            if text.trim().is_empty() || store.is_sending {
                return;
            }

            let client = GatewayClient::new(store.credentials.clone());
            let bot_a = store.conversation.settings(BotSlot::A).clone();
            let bot_b = store.conversation.settings(BotSlot::B).clone();
            let session = store.session;

            store.dispatch(Action::SetNotice(None));
            store.dispatch(Action::SetSending {
                session,
                value: true,
            });

            let store = store.clone();
            yew::platform::spawn_local(async move {
                match dispatch_turn(&client, &text, &bot_a, &bot_b).await {
                    Ok(turn) => {
                        if input.value() == text {
                            input.set_value("");
                        }
                        store.dispatch(Action::AppendTurn { session, turn });
                    }
                    Err(DispatchError::MissingCredential) => {
                        store.dispatch(Action::SetNotice(Some(
                            "Please set your API key in Settings before sending a message."
                                .to_string(),
                        )));
                    }
                    Err(DispatchError::EmptyMessage) => {}
                }
                store.dispatch(Action::SetSending {
                    session,
                    value: false,
                });
            });
        })
    };

    let on_keydown = {
        let on_send = on_send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                on_send.emit(());
            }
        })
    };

    let on_click_send = {
        let on_send = on_send.clone();
        Callback::from(move |_: MouseEvent| on_send.emit(()))
    };

    let on_save = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::SaveConversation))
    };

    let set_layout = |layout: Layout| {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::SetLayout(layout)))
    };

    let messages = &store.conversation.messages;
    let model_a = &store.conversation.settings(BotSlot::A).model_id;
    let model_b = &store.conversation.settings(BotSlot::B).model_id;

    let body = if messages.is_empty() {
        html! {
            <div class="empty-state">
                <p>{"Send a message to compare responses from both bots."}</p>
            </div>
        }
    } else {
        match store.layout {
            Layout::SideBySide => html! {
                <div class="comparison-grid">
                    <div class="column-header">{"You"}</div>
                    <div class="column-header">{format!("{} ({})", BotSlot::A, model_a)}</div>
                    <div class="column-header">{format!("{} ({})", BotSlot::B, model_b)}</div>
                    { for transcript::side_by_side(messages).into_iter().map(|row| html! {
                        <div class="comparison-row" key={row.user.id.to_string()}>
                            <MessageCard message={row.user.clone()} />
                            { cell(row.bot_a) }
                            { cell(row.bot_b) }
                        </div>
                    })}
                </div>
            },
            Layout::Sequential => html! {
                <div class="sequential-list">
                    { for transcript::sequential(messages).map(|m| html! {
                        <MessageCard key={m.id.to_string()} message={m.clone()} />
                    })}
                </div>
            },
        }
    };

    html! {
        <div class="comparison">
            <div class="tabs">
                <button
                    class={classes!("tab", if store.layout == Layout::SideBySide { "active" } else { "" })}
                    onclick={set_layout(Layout::SideBySide)}
                >
                    {"Side by Side"}
                </button>
                <button
                    class={classes!("tab", if store.layout == Layout::Sequential { "active" } else { "" })}
                    onclick={set_layout(Layout::Sequential)}
                >
                    {"Sequential"}
                </button>
            </div>

            <div class="comparison-body" ref={container_ref}>
                { body }
                if store.is_sending {
                    <div class="sending-indicator">{"Waiting for both bots..."}</div>
                }
            </div>

            <div class="input-area">
                <textarea
                    ref={input_ref}
                    class="chat-input"
                    placeholder="Type your message here..."
                    rows="3"
                    disabled={store.is_sending}
                    onkeydown={on_keydown}
                />
                <div class="input-actions">
                    <button class="btn btn-primary" onclick={on_click_send} disabled={store.is_sending}>
                        { if store.is_sending { "Sending..." } else { "Send" } }
                    </button>
                    <button class="btn btn-secondary" onclick={on_save}>{"Save Chat"}</button>
                </div>
            </div>
        </div>
    }
}

fn cell(reply: Option<&Message>) -> Html {
    match reply {
        Some(message) => html! { <MessageCard message={message.clone()} /> },
        None => html! { <div class="message-card message-missing" /> },
    }
}
