use super::Verb;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Open key/value parameters attached to a node. The graph never interprets them.
pub type Params = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayParams {
    pub media: String,
    #[serde(flatten)]
    pub extra: Params,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayDtmfParams {
    pub digits: String,
    #[serde(flatten)]
    pub extra: Params,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SayParams {
    pub text: String,
    #[serde(flatten)]
    pub extra: Params,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialParams {
    pub target: String,
    #[serde(flatten)]
    pub extra: Params,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatherParams {
    #[serde(default, alias = "maxDigits", alias = "numDigits")]
    pub max_digits: Option<u32>,
    #[serde(default)]
    pub timeout: Option<f64>,
    #[serde(flatten)]
    pub extra: Params,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "maxDuration")]
    pub max_duration: Option<f64>,
    #[serde(flatten)]
    pub extra: Params,
}

/// A verb-aware view over a node's parameters.
///
/// Shapes that are known for a verb are decoded into typed structs; anything that
/// does not fit (or verbs without a known shape) stays as the raw map in `Open`.
#[derive(Debug, Clone, PartialEq)]
pub enum VerbParams {
    Play(PlayParams),
    PlayDtmf(PlayDtmfParams),
    Say(SayParams),
    Dial(DialParams),
    Gather(GatherParams),
    Record(RecordParams),
    Open(Params),
}

impl VerbParams {
    pub fn interpret(verb: Verb, params: &Params) -> Self {
        let typed = match verb {
            Verb::Play => decode(params).map(VerbParams::Play),
            Verb::PlayDtmf => decode(params).map(VerbParams::PlayDtmf),
            Verb::Say => decode(params).map(VerbParams::Say),
            Verb::Dial => decode(params).map(VerbParams::Dial),
            Verb::Gather => decode(params).map(VerbParams::Gather),
            Verb::Record => decode(params).map(VerbParams::Record),
            Verb::Accept | Verb::Hangup | Verb::Mute | Verb::Unmute => None,
        };
        typed.unwrap_or_else(|| VerbParams::Open(params.clone()))
    }

    /// The single most descriptive parameter, used in one-line summaries.
    pub fn headline(&self) -> Option<String> {
        match self {
            VerbParams::Play(p) => Some(p.media.clone()),
            VerbParams::PlayDtmf(p) => Some(p.digits.clone()),
            VerbParams::Say(p) => Some(format!("\"{}\"", p.text)),
            VerbParams::Dial(p) => Some(p.target.clone()),
            VerbParams::Gather(p) => p.max_digits.map(|d| format!("{} digits", d)),
            VerbParams::Record(p) => p.name.clone(),
            VerbParams::Open(_) => None,
        }
    }
}

fn decode<T: DeserializeOwned>(params: &Params) -> Option<T> {
    serde_json::from_value(Value::Object(params.clone())).ok()
}
