use std::time::Duration;

use chatgpt::config::ChatGPTEngine;
use thiserror::Error;

use crate::quiz::parser::ChoiceStyle;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Gpt35Turbo,
    Gpt4,
    Gpt4Extended,
}

impl Engine {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "gpt-3.5-turbo" => Some(Engine::Gpt35Turbo),
            "gpt-4" => Some(Engine::Gpt4),
            "gpt-4-32k" => Some(Engine::Gpt4Extended),
            _ => None,
        }
    }
}

impl From<Engine> for ChatGPTEngine {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::Gpt35Turbo => ChatGPTEngine::Gpt35Turbo,
            Engine::Gpt4 => ChatGPTEngine::Gpt4,
            Engine::Gpt4Extended => ChatGPTEngine::Custom("gpt-4-32k"),
        }
    }
}

/// Model access settings. The Telegram token is read by teloxide itself (`TELOXIDE_TOKEN`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub engine: Engine,
    pub timeout: Duration,
    pub temperature: f32,
    pub choice_style: ChoiceStyle,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("CHATGPT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("CHATGPT_API_KEY"))?;

        let engine = match lookup("CHATGPT_ENGINE") {
            Some(name) => Engine::parse(name.trim()).ok_or(ConfigError::Invalid {
                key: "CHATGPT_ENGINE",
                value: name,
            })?,
            None => Engine::Gpt35Turbo,
        };

        let timeout = match lookup("CHATGPT_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    key: "CHATGPT_TIMEOUT_SECS",
                    value: secs,
                })?,
            None => Duration::from_secs(15),
        };

        let temperature = match lookup("CHATGPT_TEMPERATURE") {
            Some(value) => match value.trim().parse::<f32>() {
                Ok(t) if (0.0..=2.0).contains(&t) => t,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "CHATGPT_TEMPERATURE",
                        value,
                    })
                }
            },
            None => 0.7,
        };

        let choice_style = match lookup("QUIZ_STRIP_CHOICE_MARKERS").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => ChoiceStyle::Verbatim,
            Some("1") | Some("true") => ChoiceStyle::StripMarkers,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "QUIZ_STRIP_CHOICE_MARKERS",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            api_key,
            engine,
            timeout,
            temperature,
            choice_style,
        })
    }
}
