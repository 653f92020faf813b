use serde::{Deserialize, Serialize};

use super::BotSlot;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL_A: &str = "gpt-3.5-turbo";
pub const DEFAULT_MODEL_B: &str = "gpt-4";

pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 1.0);
pub const TOP_K_RANGE: (u32, u32) = (1, 100);
pub const TOP_P_RANGE: (f32, f32) = (0.1, 1.0);

/// Sampling parameters for one bot slot.
///
/// `top_k` is kept so saved conversations round-trip, but OpenAI-compatible
/// endpoints have no such parameter and the gateway does not forward it.
///
/// Missing fields deserialize to the shared defaults with an empty model id,
/// which `normalized` and the gateway each resolve to a concrete model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub model_id: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 50,
            top_p: 0.9,
            model_id: String::new(),
        }
    }
}

impl GenerationSettings {
    pub fn for_slot(slot: BotSlot) -> Self {
        let model_id = match slot {
            BotSlot::A => DEFAULT_MODEL_A,
            BotSlot::B => DEFAULT_MODEL_B,
        };
        Self {
            model_id: model_id.to_string(),
            ..Self::default()
        }
    }

    /// Pull every field back into its allowed range and fill an empty model id
    /// with the slot default.
    pub fn normalized(mut self, slot: BotSlot) -> Self {
        self.temperature = clamp_f32(self.temperature, TEMPERATURE_RANGE, 0.7);
        self.top_k = self.top_k.clamp(TOP_K_RANGE.0, TOP_K_RANGE.1);
        self.top_p = clamp_f32(self.top_p, TOP_P_RANGE, 0.9);
        if self.model_id.trim().is_empty() {
            self.model_id = Self::for_slot(slot).model_id;
        }
        self
    }
}

fn clamp_f32(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Process-wide credentials for the remote completion API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub base_url: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
