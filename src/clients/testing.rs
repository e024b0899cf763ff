//! Scripted transport used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::clients::{ApiError, BoxFuture, HttpMethod, Transport};

/// A request captured by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub params: Option<Map<String, Value>>,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|p| p.get(key))
    }
}

#[derive(Debug, Default)]
struct FakeTransportState {
    responses: VecDeque<Result<Value, ApiError>>,
    calls: Vec<RecordedCall>,
}

/// Replays queued responses in order and records every call.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, body: Value) -> &Self {
        self.state.lock().unwrap().responses.push_back(Ok(body));
        self
    }

    pub fn push_error(&self, error: ApiError) -> &Self {
        self.state.lock().unwrap().responses.push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no request was recorded")
    }
}

impl Transport for FakeTransport {
    fn request<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        params: Option<Map<String, Value>>,
    ) -> BoxFuture<'a, Result<Value, ApiError>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall {
                method,
                path: path.to_string(),
                params,
            });
            state.responses.pop_front().unwrap_or_else(|| {
                Err(ApiError::Network {
                    message: format!("no scripted response for {method} {path}"),
                })
            })
        })
    }

    fn request_count(&self) -> u64 {
        self.state.lock().unwrap().calls.len() as u64
    }
}
