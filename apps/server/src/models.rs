//! Request and query payloads for the update pipeline
//!
//! Both structures are request-scoped: built fresh per inbound request and
//! discarded once the response is sent.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Inbound body of `PUT /edit/{id}`.
///
/// Only `description` is used; any other keys are accepted and ignored.
/// The value may be any JSON value, it is forwarded verbatim.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub description: Value,
}

impl UpdateRequest {
    /// Parse and validate a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let mut fields: Map<String, Value> =
            serde_json::from_slice(body).map_err(|e| Error::InvalidPayload(e.to_string()))?;

        let description = fields
            .remove("description")
            .ok_or(Error::MissingField("description"))?;

        Ok(Self { description })
    }
}

/// Parameterized statement forwarded to the query service as
/// `{"sql": ..., "args": [...]}`.
///
/// The statement template and its positional arguments are only ever built
/// together by a constructor, so the `$n` placeholders cannot drift from the
/// argument order.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEnvelope {
    sql: &'static str,
    args: Vec<Value>,
}

const UPDATE_DESCRIPTION_SQL: &str =
    "UPDATE medical_records SET description = $1 WHERE id = $2";

impl QueryEnvelope {
    /// Envelope updating the description of a single patient record.
    ///
    /// `patient_id` is bound as `$2` exactly as it appeared in the URL path;
    /// the query service is responsible for matching it against the store.
    pub fn update_description(description: Value, patient_id: &str) -> Self {
        Self {
            sql: UPDATE_DESCRIPTION_SQL,
            args: vec![description, Value::String(patient_id.to_owned())],
        }
    }

    pub fn sql(&self) -> &str {
        self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}
