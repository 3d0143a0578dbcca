//! IPC Message Types
//!
//! JSON-serializable messages between a second launch and the running app.

use serde::{Deserialize, Serialize};

use crate::host::{HostRequest, WindowLabel};

/// Request types sent from client to server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IpcRequest {
    /// Make a window visible
    #[serde(rename = "show_window")]
    ShowWindow { seq_id: u64, label: WindowLabel },

    /// Make a window visible and focus it
    #[serde(rename = "reveal_window")]
    RevealWindow { seq_id: u64, label: WindowLabel },

    /// Ask whether the app is alive
    #[serde(rename = "status_request")]
    StatusRequest { seq_id: u64 },
}

impl IpcRequest {
    pub fn from_host(seq_id: u64, request: HostRequest) -> Self {
        match request {
            HostRequest::ShowWindow(label) => IpcRequest::ShowWindow { seq_id, label },
            HostRequest::RevealAndFocus(label) => IpcRequest::RevealWindow { seq_id, label },
        }
    }

    pub fn seq_id(&self) -> u64 {
        match self {
            IpcRequest::ShowWindow { seq_id, .. }
            | IpcRequest::RevealWindow { seq_id, .. }
            | IpcRequest::StatusRequest { seq_id } => *seq_id,
        }
    }

    /// The window request carried, if any
    pub fn host_request(&self) -> Option<HostRequest> {
        match self {
            IpcRequest::ShowWindow { label, .. } => Some(HostRequest::ShowWindow(*label)),
            IpcRequest::RevealWindow { label, .. } => Some(HostRequest::RevealAndFocus(*label)),
            IpcRequest::StatusRequest { .. } => None,
        }
    }
}

/// Response types sent from server to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IpcResponse {
    /// Acknowledgment of a window request
    #[serde(rename = "ack")]
    Ack {
        seq_id: u64,
        success: bool,
        message: Option<String>,
    },

    /// Status response
    #[serde(rename = "status_response")]
    StatusResponse { seq_id: u64, version: String },
}

impl IpcResponse {
    pub fn seq_id(&self) -> u64 {
        match self {
            IpcResponse::Ack { seq_id, .. } | IpcResponse::StatusResponse { seq_id, .. } => *seq_id,
        }
    }
}
