//! Background language-intelligence worker protocol.
//!
//! The worker answers completion, hover, and structural (barline) queries
//! over raw text, independently of the position indexer. Requests and
//! responses travel as JSON envelopes matched by id; responses with an id
//! that is no longer in flight are dropped, the same staleness discipline
//! the render coordinator applies to generations.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub id: u64,
    pub method: String,
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub id: u64,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A matched response, tagged with the method of the request it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerReply {
    pub method: String,
    pub outcome: Result<Value, String>,
}

/// Mints request ids and matches responses back to their requests.
pub struct WorkerClient {
    next_id: u64,
    in_flight: Vec<(u64, String)>,
}

impl WorkerClient {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            in_flight: Vec::new(),
        }
    }

    /// Build a request envelope for `method`, recording it as in flight.
    pub fn request(&mut self, method: &str, params: Value) -> WorkerRequest {
        self.next_id += 1;
        self.in_flight.push((self.next_id, method.to_string()));
        WorkerRequest {
            id: self.next_id,
            method: method.to_string(),
            params,
        }
    }

    pub fn completion_request(&mut self, line: usize, column: usize) -> WorkerRequest {
        self.request("completion", json!({ "line": line, "column": column }))
    }

    pub fn hover_request(&mut self, line: usize, column: usize) -> WorkerRequest {
        self.request("hover", json!({ "line": line, "column": column }))
    }

    pub fn barlines_request(&mut self, text: &str) -> WorkerRequest {
        self.request("barlines", json!({ "text": text }))
    }

    /// Match a response to its request. Returns `None` (dropping the
    /// response) when the id is unknown or was already answered.
    pub fn accept(&mut self, response: WorkerResponse) -> Option<WorkerReply> {
        let idx = self.in_flight.iter().position(|(id, _)| *id == response.id);
        let Some(idx) = idx else {
            warn!("worker response with unknown id {} dropped", response.id);
            return None;
        };
        let (_, method) = self.in_flight.remove(idx);

        let outcome = match (response.result, response.error) {
            (_, Some(error)) => Err(error),
            (Some(result), None) => Ok(result),
            (None, None) => Ok(Value::Null),
        };
        Some(WorkerReply { method, outcome })
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl Default for WorkerClient {
    fn default() -> Self {
        Self::new()
    }
}
