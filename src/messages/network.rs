//! Network messages - communication between App and Network layers

use crate::models::ResponseEnvelope;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute one GET probe against a fully built URL
    ExecuteProbe { id: u64, url: String },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Transport-level success, any HTTP status
    Success {
        id: u64,
        envelope: ResponseEnvelope,
        time_ms: u64,
    },
    /// Transport failure, or a declared-JSON body that would not parse
    Error {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the probe ID the response belongs to
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}
