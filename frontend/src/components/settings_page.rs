use crate::store::{Action, StoreContext};
use yew::prelude::*;

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    // Local copy so typing does not write storage on every keystroke
    let local_state = use_state(|| store.credentials.clone());
    let saved = use_state(|| false);

    let on_submit = {
        let store = store.clone();
        let local_state = local_state.clone();
        let saved = saved.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            store.dispatch(Action::UpdateCredentials((*local_state).clone()));
            saved.set(true);
        })
    };

    let on_api_key_input = {
        let local_state = local_state.clone();
        let saved = saved.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.api_key = input.value();
            local_state.set(s);
            saved.set(false);
        })
    };

    let on_base_url_input = {
        let local_state = local_state.clone();
        let saved = saved.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            s.base_url = input.value();
            local_state.set(s);
            saved.set(false);
        })
    };

    html! {
        <div class="page">
            <h1 class="page-title">{"Settings"}</h1>
            <div class="card settings-card">
                <h2 class="card-title">{"API Configuration"}</h2>
                <p class="card-body">{"Configure the OpenAI-compatible endpoint used by both bots"}</p>

                <div class="form-group">
                    <label class="form-label">{"OpenAI API Key"}</label>
                    <input type="password" class="form-input"
                        value={local_state.api_key.clone()}
                        oninput={on_api_key_input}
                        placeholder="Enter your OpenAI API key"
                    />
                    <div class="form-hint">{"Your API key is stored in this browser only."}</div>
                </div>

                <div class="form-group">
                    <label class="form-label">{"OpenAI API URL"}</label>
                    <input type="text" class="form-input"
                        value={local_state.base_url.clone()}
                        oninput={on_base_url_input}
                        placeholder={shared::models::DEFAULT_BASE_URL}
                    />
                    <div class="form-hint">{"Custom API endpoint for OpenAI or compatible services."}</div>
                </div>

                <div class="form-actions">
                    if *saved {
                        <span class="form-status">{"Settings saved"}</span>
                    }
                    <button class="btn btn-primary" onclick={on_submit}>{"Save Settings"}</button>
                </div>
            </div>
        </div>
    }
}
