use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use deskpet::host::HostRequest;
use deskpet::ipc::IpcServer;
use tempfile::TempDir;

/// An in-process IPC server on a private socket
pub struct TestContext {
    pub temp_dir: TempDir,
    pub socket_path: PathBuf,
    pub audit_log: PathBuf,
    pub received: Arc<Mutex<Vec<HostRequest>>>,
    pub server: IpcServer,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_acceptance(true)
    }

    /// `accept` is what the GUI side reports back for every request
    pub fn with_acceptance(accept: bool) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let socket_path = temp_dir.path().join("deskpet-test.sock");
        let audit_log = temp_dir.path().join("audit.log");
        let received = Arc::new(Mutex::new(Vec::new()));

        let sink = received.clone();
        let mut server =
            IpcServer::new(&socket_path).with_audit_log(Some(audit_log.clone()));
        server
            .start(move |request| {
                sink.lock().unwrap().push(request);
                accept
            })
            .expect("Failed to start IPC server");

        // Wait for the socket to appear
        for _ in 0..50 {
            if socket_path.exists() {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }

        Self {
            temp_dir,
            socket_path,
            audit_log,
            received,
            server,
        }
    }

    /// Send one raw request line and read one response line
    pub fn raw_request(&self, line: &str) -> String {
        let mut stream = UnixStream::connect(&self.socket_path).expect("Failed to connect");
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        stream.write_all(line.as_bytes()).unwrap();
        stream.write_all(b"\n").unwrap();

        let mut response = String::new();
        BufReader::new(stream).read_line(&mut response).unwrap();
        response
    }

    /// Keep clear of the server's rate limit between requests
    pub fn pause(&self) {
        thread::sleep(Duration::from_millis(150));
    }
}
