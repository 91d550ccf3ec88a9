//! HTTP handlers

pub mod explain;
pub mod health;
pub mod predict;

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Request body shared by the predict and explain routes: one client's
/// feature map, keyed by dummy-encoded column name.
#[derive(Debug, Deserialize)]
pub struct ClientData {
    pub features: HashMap<String, Value>,
}
