// api/envelope.rs - The {status, data|message} response wrapper
//
// Every skills API response is an envelope:
//   read  -> {"status": "success", "data": ...}
//   write -> {"status": "success", "message": "... already in progress"}
//   error -> {"status": "error",   "message": "..."}
//
// Writes are accepted and processed asynchronously, so a write envelope
// only says the work was queued. Whether it happened is checked later by
// polling a read (see api::poll).

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::matching::{any_element_contains, contains};
use crate::error::{E2eError, Result};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// A write the API accepts for asynchronous processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillAction {
    Create,
    Update,
    UpdateName,
    UpdateDescription,
    UpdateLogo,
    UpdateTags,
    Delete,
}

impl SkillAction {
    /// `message` of the envelope returned when the write is accepted
    pub fn accepted_message(self) -> &'static str {
        match self {
            SkillAction::Create => "creating skill already in progress",
            SkillAction::Update => "updating skill already in progress",
            SkillAction::UpdateName => "updating skill name already in progress",
            SkillAction::UpdateDescription => "updating skill description already in progress",
            SkillAction::UpdateLogo => "updating skill logo already in progress",
            SkillAction::UpdateTags => "updating skill tags already in progress",
            SkillAction::Delete => "deleting skill already in progress",
        }
    }

    /// HTTP status returned when the write is accepted
    pub fn accepted_status(self) -> StatusCode {
        match self {
            SkillAction::Create => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }
}

/// Status and parsed JSON body of one API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn envelope<T: DeserializeOwned>(&self) -> Result<Envelope<T>> {
        serde_json::from_value(self.body.clone()).map_err(|source| E2eError::InvalidBody {
            url: self.url.clone(),
            source,
        })
    }

    /// 2xx, `status == "success"` and `data` contains `expected`
    pub fn expect_data(&self, expected: &Value) -> Result<()> {
        self.expect_success_envelope()?;
        let data = self.data()?;
        if !contains(data, expected) {
            return Err(self.mismatch(format!("data does not contain {expected}")));
        }
        Ok(())
    }

    /// 2xx, `status == "success"` and `data` is an array with an element containing `expected`
    pub fn expect_data_item(&self, expected: &Value) -> Result<()> {
        self.expect_success_envelope()?;
        let data = self.data()?;
        if !data.is_array() {
            return Err(self.mismatch("data is not an array".to_string()));
        }
        if !any_element_contains(data, expected) {
            return Err(self.mismatch(format!("no element of data contains {expected}")));
        }
        Ok(())
    }

    /// The write was accepted: 2xx, `status == "success"` and the
    /// in-progress message for `action`
    pub fn expect_accepted(&self, action: SkillAction) -> Result<()> {
        self.expect_success_envelope()?;
        self.expect_message(action.accepted_message())
    }

    /// An error envelope with the given HTTP status and, optionally, message
    pub fn expect_error(&self, status: StatusCode, message: Option<&str>) -> Result<()> {
        if self.status != status {
            return Err(self.mismatch(format!("expected HTTP {status}")));
        }
        if self.body.get("status").and_then(Value::as_str) != Some(STATUS_ERROR) {
            return Err(self.mismatch(format!("expected status \"{STATUS_ERROR}\"")));
        }
        match message {
            Some(message) => self.expect_message(message),
            None => Ok(()),
        }
    }

    fn expect_success_envelope(&self) -> Result<()> {
        if !self.is_success() {
            return Err(self.mismatch("expected a 2xx status".to_string()));
        }
        if self.body.get("status").and_then(Value::as_str) != Some(STATUS_SUCCESS) {
            return Err(self.mismatch(format!("expected status \"{STATUS_SUCCESS}\"")));
        }
        Ok(())
    }

    fn expect_message(&self, message: &str) -> Result<()> {
        match self.body.get("message").and_then(Value::as_str) {
            Some(actual) if actual == message => Ok(()),
            _ => Err(self.mismatch(format!("expected message \"{message}\""))),
        }
    }

    fn data(&self) -> Result<&Value> {
        self.body
            .get("data")
            .ok_or_else(|| self.mismatch("envelope has no data".to_string()))
    }

    fn mismatch(&self, what: String) -> E2eError {
        E2eError::Mismatch(format!(
            "{what} (HTTP {} from {}: {})",
            self.status, self.url, self.body
        ))
    }
}
