//! Turns failures surfaced by the controller into messages for the terminal.

use std::error::Error as StdError;

use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Unreachable,
    Rejected,
    Malformed,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    status: Option<StatusCode>,
    message: String,
}

impl UiError {
    pub fn from_error(err: &anyhow::Error) -> Self {
        let transport = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<reqwest::Error>());
        let status = transport.and_then(reqwest::Error::status);

        let category = match transport {
            Some(e) if e.is_connect() || e.is_timeout() => UiErrorCategory::Unreachable,
            Some(e) if e.is_status() => UiErrorCategory::Rejected,
            Some(e) if e.is_decode() || e.is_body() => UiErrorCategory::Malformed,
            _ if err.chain().any(is_json_error) => UiErrorCategory::Malformed,
            _ => UiErrorCategory::Unknown,
        };

        let message = match category {
            UiErrorCategory::Unreachable => {
                "Todo store unreachable; check the API URL/network and retry.".to_string()
            }
            UiErrorCategory::Rejected => match status {
                Some(status) => format!("Todo store rejected the request ({status}): {err}"),
                None => format!("Todo store rejected the request: {err}"),
            },
            UiErrorCategory::Malformed => {
                format!("Todo store sent a response that is not a todo: {err}")
            }
            UiErrorCategory::Unknown => format!("Todo API error: {err:#}"),
        };

        Self {
            category,
            status,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn is_json_error(cause: &(dyn StdError + 'static)) -> bool {
    cause.downcast_ref::<serde_json::Error>().is_some()
}
