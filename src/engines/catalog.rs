//! Built-in engine table.

use super::{Engine, Model, ModelsByModality, OptionSpec, Options};

fn spec(min: f64, max: f64, default: f64, step: f64) -> OptionSpec {
    OptionSpec {
        min,
        max,
        default,
        step,
    }
}

fn options(entries: &[(&str, OptionSpec)]) -> Options {
    entries
        .iter()
        .map(|(name, spec)| (name.to_string(), *spec))
        .collect()
}

pub(super) fn openai() -> Engine {
    Engine {
        name: "OpenAI".to_string(),
        models: ModelsByModality {
            text: vec![
                Model {
                    id: "gpt-3.5-turbo".to_string(),
                    options: options(&[
                        ("max_tokens", spec(50.0, 4096.0, 500.0, 1.0)),
                        ("temperature", spec(0.0, 1.0, 0.5, 0.01)),
                        ("top_p", spec(0.0, 1.0, 1.0, 0.01)),
                        ("frequency_penalty", spec(0.0, 1.0, 1.0, 0.01)),
                        ("presence_penalty", spec(0.0, 1.0, 1.0, 0.01)),
                    ]),
                },
                Model {
                    id: "gpt-3.5-turbo-instruct".to_string(),
                    options: options(&[
                        ("max_tokens", spec(50.0, 4096.0, 200.0, 1.0)),
                        ("temperature", spec(0.0, 1.0, 0.5, 0.01)),
                        ("top_p", spec(0.0, 1.0, 1.0, 0.01)),
                        ("frequency_penalty", spec(0.0, 1.0, 0.0, 0.01)),
                        ("presence_penalty", spec(0.0, 1.0, 0.0, 0.01)),
                    ]),
                },
            ],
            image: Vec::new(),
            json: Vec::new(),
        },
    }
}

pub(super) fn google() -> Engine {
    Engine {
        name: "Google Gemini".to_string(),
        models: ModelsByModality {
            text: vec![Model {
                id: "gemini-1.5-pro".to_string(),
                options: options(&[
                    ("max_tokens", spec(50.0, 1_000_000.0, 900_000.0, 1.0)),
                    ("temperature", spec(0.0, 1.0, 0.7, 0.01)),
                    ("top_p", spec(0.0, 1.0, 0.4, 0.01)),
                    ("top_k", spec(0.0, 64.0, 32.0, 1.0)),
                ]),
            }],
            image: Vec::new(),
            json: Vec::new(),
        },
    }
}

pub(super) fn together() -> Engine {
    Engine {
        name: "Together AI".to_string(),
        models: ModelsByModality::default(),
    }
}
