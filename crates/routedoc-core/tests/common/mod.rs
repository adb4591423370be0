//! Common test utilities for routedoc-core integration tests.

use routedoc_core::{HttpMethod, RouteBinder};
use schemars::JsonSchema;

/// Router that records every binding instead of serving it.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    /// Base prefix reported to registration.
    pub base: String,
    /// `(method, relative path, endpoint)` per bind call, in order.
    pub bound: Vec<(HttpMethod, String, &'static str)>,
}

impl RecordingRouter {
    /// A router mounted at `base`.
    pub fn at(base: &str) -> Self {
        Self {
            base: base.to_string(),
            bound: Vec::new(),
        }
    }
}

impl RouteBinder for RecordingRouter {
    type Endpoint = &'static str;

    fn base_path(&self) -> &str {
        &self.base
    }

    fn bind(&mut self, method: HttpMethod, path: &str, endpoint: Self::Endpoint) {
        self.bound.push((method, path.to_string(), endpoint));
    }
}

#[derive(Debug, JsonSchema)]
#[allow(dead_code)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Debug, JsonSchema)]
#[allow(dead_code)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub address: Option<Address>,
}

#[derive(Debug, JsonSchema)]
#[allow(dead_code)]
pub struct CreateUser {
    pub name: String,
}
