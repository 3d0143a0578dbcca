//! IPC Client
//!
//! Used by a second launch to reach the running instance.

use anyhow::{bail, Result};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::{socket_path, IpcRequest, IpcResponse};
use crate::host::HostRequest;

static NEXT_SEQ_ID: AtomicU64 = AtomicU64::new(1);

fn next_seq_id() -> u64 {
    NEXT_SEQ_ID.fetch_add(1, Ordering::SeqCst)
}

pub struct IpcClient {
    path: PathBuf,
    timeout: Duration,
}

impl Default for IpcClient {
    fn default() -> Self {
        Self::new(socket_path())
    }
}

impl IpcClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if another instance is listening
    pub fn is_server_running(&self) -> bool {
        if !self.path.exists() {
            return false;
        }

        UnixStream::connect(&self.path).is_ok()
    }

    /// Forward a window request. Returns whether the server accepted it.
    pub fn send_host_request(&self, request: HostRequest) -> Result<bool> {
        let seq_id = next_seq_id();
        let response = self.round_trip(&IpcRequest::from_host(seq_id, request))?;

        match response {
            IpcResponse::Ack {
                success, message, ..
            } => {
                if let Some(message) = message {
                    debug!("📨 IPC ack: {}", message);
                }
                Ok(success)
            }
            other => {
                warn!("Unexpected IPC response type: {:?}", other);
                Ok(false)
            }
        }
    }

    /// Version string of the running instance
    pub fn status(&self) -> Result<Option<String>> {
        let seq_id = next_seq_id();
        match self.round_trip(&IpcRequest::StatusRequest { seq_id })? {
            IpcResponse::StatusResponse { version, .. } => Ok(Some(version)),
            _ => Ok(None),
        }
    }

    fn round_trip(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut stream = UnixStream::connect(&self.path)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        let request_json = serde_json::to_string(request)? + "\n";
        stream.write_all(request_json.as_bytes())?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line)?;

        let response: IpcResponse = serde_json::from_str(line.trim())?;
        debug!("📨 IPC response: {:?}", response);

        if response.seq_id() != request.seq_id() {
            bail!(
                "IPC sequence ID mismatch: expected {}, got {}",
                request.seq_id(),
                response.seq_id()
            );
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_socket_means_not_running() {
        let dir = tempfile::tempdir().unwrap();
        let client = IpcClient::new(dir.path().join("absent.sock"));
        assert!(!client.is_server_running());
        assert!(client.status().is_err());
    }

    #[test]
    fn test_seq_ids_increase() {
        let a = next_seq_id();
        let b = next_seq_id();
        assert!(b > a);
    }
}
