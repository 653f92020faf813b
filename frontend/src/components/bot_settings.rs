use shared::models::{
    BotSlot, GenerationSettings, TEMPERATURE_RANGE, TOP_K_RANGE, TOP_P_RANGE,
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BotSettingsProps {
    pub slot: BotSlot,
    pub settings: GenerationSettings,
    pub on_change: Callback<GenerationSettings>,
}

/// Form over one slot's generation parameters. Every edit emits the full,
/// updated settings value.
#[function_component(BotSettings)]
pub fn bot_settings(props: &BotSettingsProps) -> Html {
    let field_id = format!("{}-model-id", props.slot.label().replace(' ', "-").to_lowercase());

    let update = |apply: fn(&mut GenerationSettings, &str)| {
        let settings = props.settings.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = settings.clone();
            apply(&mut next, &input.value());
            on_change.emit(next);
        })
    };

    let on_model = update(|s, v| s.model_id = v.to_string());
    let on_temperature = update(|s, v| {
        if let Ok(val) = v.parse() {
            s.temperature = val;
        }
    });
    let on_top_k = update(|s, v| {
        if let Ok(val) = v.parse() {
            s.top_k = val;
        }
    });
    let on_top_p = update(|s, v| {
        if let Ok(val) = v.parse() {
            s.top_p = val;
        }
    });

    let settings = &props.settings;

    html! {
        <div class="bot-settings">
            <h3 class="bot-settings-title">{format!("{} Settings", props.slot)}</h3>

            <div class="form-group">
                <label class="form-label" for={field_id.clone()}>{"Model ID"}</label>
                <input id={field_id} type="text" class="form-input"
                    value={settings.model_id.clone()}
                    oninput={on_model}
                    placeholder="e.g., gpt-3.5-turbo, gpt-4, etc."
                />
            </div>

            <div class="form-group">
                <label class="form-label">{format!("Temperature: {:.1}", settings.temperature)}</label>
                <input type="range" class="form-range"
                    min={TEMPERATURE_RANGE.0.to_string()} max={TEMPERATURE_RANGE.1.to_string()} step="0.1"
                    value={settings.temperature.to_string()}
                    oninput={on_temperature}
                />
                <div class="form-hint">
                    {"Controls randomness: lower values are more deterministic, higher values more creative."}
                </div>
            </div>

            <div class="form-group">
                <label class="form-label">{format!("Top-K: {}", settings.top_k)}</label>
                <input type="range" class="form-range"
                    min={TOP_K_RANGE.0.to_string()} max={TOP_K_RANGE.1.to_string()} step="1"
                    value={settings.top_k.to_string()}
                    oninput={on_top_k}
                />
                <div class="form-hint">
                    {"Saved with the chat only. OpenAI-compatible endpoints do not accept Top-K."}
                </div>
            </div>

            <div class="form-group">
                <label class="form-label">{format!("Top-P: {:.1}", settings.top_p)}</label>
                <input type="range" class="form-range"
                    min={TOP_P_RANGE.0.to_string()} max={TOP_P_RANGE.1.to_string()} step="0.1"
                    value={settings.top_p.to_string()}
                    oninput={on_top_p}
                />
                <div class="form-hint">
                    {"Nucleus sampling: only consider tokens with combined probability P."}
                </div>
            </div>
        </div>
    }
}
