//! IPC Server
//!
//! Unix socket server run by the first instance. Window requests are handed
//! to a callback that forwards them into the GUI.

use anyhow::{anyhow, Result};
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{socket_path, IpcRequest, IpcResponse};
use crate::audit;
use crate::host::HostRequest;

/// Largest accepted request line
const MAX_REQUEST_BYTES: u64 = 4096;

/// Minimum spacing between two handled requests
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Shared state handed to each client thread
struct Shared<F> {
    callback: F,
    last_request: Mutex<Option<Instant>>,
    audit_log: Option<PathBuf>,
}

/// IPC Server for the running instance
pub struct IpcServer {
    path: PathBuf,
    audit_log: Option<PathBuf>,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl IpcServer {
    /// Create a server bound to `path` once started
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            audit_log: Some(audit::default_log_path()),
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Write audited requests somewhere else, or nowhere
    pub fn with_audit_log(mut self, path: Option<PathBuf>) -> Self {
        self.audit_log = path;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start listening. `callback` returns whether the request was accepted.
    pub fn start<F>(&mut self, callback: F) -> Result<()>
    where
        F: Fn(HostRequest) -> bool + Send + Sync + 'static,
    {
        // Clean up stale socket
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }

        let listener = UnixListener::bind(&self.path)?;

        // User only: rw-------
        if let Ok(metadata) = fs::metadata(&self.path) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            if let Err(e) = fs::set_permissions(&self.path, perms) {
                warn!("⚠️ Failed to set strict IPC socket permissions: {}", e);
            } else {
                debug!("🔒 IPC socket permissions set to 0600");
            }
        }

        listener.set_nonblocking(true)?;

        self.running.store(true, Ordering::SeqCst);
        let running = self.running.clone();
        let shared = Arc::new(Shared {
            callback,
            last_request: Mutex::new(None),
            audit_log: self.audit_log.clone(),
        });
        let path = self.path.clone();

        info!("🔌 IPC server listening on {:?}", path);

        let handle = thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let shared = shared.clone();
                        thread::spawn(move || {
                            if let Err(e) = handle_client(stream, &shared) {
                                warn!("IPC client error: {}", e);
                            }
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(50));
                    }
                    Err(e) => {
                        warn!("IPC accept error: {}", e);
                    }
                }
            }

            let _ = fs::remove_file(&path);
            info!("🔌 IPC server stopped");
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Stop the server and remove the socket
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for IpcServer {
    fn default() -> Self {
        Self::new(socket_path())
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle a single client connection
fn handle_client<F>(mut stream: UnixStream, shared: &Shared<F>) -> Result<()>
where
    F: Fn(HostRequest) -> bool,
{
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;

    let mut reader = BufReader::new(stream.try_clone()?).take(MAX_REQUEST_BYTES);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    // Liveness checks connect and hang up without a request
    if line.trim().is_empty() {
        return Ok(());
    }

    let request: IpcRequest = serde_json::from_str(line.trim())?;
    debug!("📨 IPC request: {:?}", request);

    let response = if !admit(shared)? {
        warn!("⚠️ IPC rate limit triggered - rejecting request");
        IpcResponse::Ack {
            seq_id: request.seq_id(),
            success: false,
            message: Some("rate limited".to_string()),
        }
    } else {
        respond(&request, shared)
    };

    let response_json = serde_json::to_string(&response)? + "\n";
    stream.write_all(response_json.as_bytes())?;

    Ok(())
}

fn admit<F>(shared: &Shared<F>) -> Result<bool> {
    let mut last = shared
        .last_request
        .lock()
        .map_err(|e| anyhow!("IPC rate limiter poisoned: {}", e))?;
    let now = Instant::now();
    if let Some(previous) = *last {
        if now.duration_since(previous) < MIN_REQUEST_INTERVAL {
            return Ok(false);
        }
    }
    *last = Some(now);
    Ok(true)
}

fn respond<F>(request: &IpcRequest, shared: &Shared<F>) -> IpcResponse
where
    F: Fn(HostRequest) -> bool,
{
    let seq_id = request.seq_id();

    let Some(host_request) = request.host_request() else {
        return IpcResponse::StatusResponse {
            seq_id,
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
    };

    info!("📡 IPC window request: {:?}", host_request);
    if let Some(log_path) = &shared.audit_log {
        if let Err(e) = audit::log_to(log_path, &format!("IPC window request: {:?}", host_request)) {
            warn!("Failed to write audit log: {}", e);
        }
    }

    let accepted = (shared.callback)(host_request);
    IpcResponse::Ack {
        seq_id,
        success: accepted,
        message: Some(if accepted {
            format!("Forwarded: {}", host_request.label())
        } else {
            "GUI not ready".to_string()
        }),
    }
}
