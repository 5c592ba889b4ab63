//! Client for the host's session-data endpoint.
//!
//! OpenCode exposes a JSON-line IPC socket to plugins: one request per
//! connection, newline-terminated JSON both ways. A single failed attempt
//! yields a [`LookupError`]; the router's fail-open policy decides what to
//! do with it. No retries.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::env;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::time::Duration;

use notify_core::{LookupError, Session, SessionSource};

const SOCKET_ENV: &str = "OPENCODE_IPC_SOCKET";
const SOCKET_NAME: &str = "ipc.sock";
const READ_TIMEOUT_MS: u64 = 600;
const WRITE_TIMEOUT_MS: u64 = 600;
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

#[derive(Serialize)]
struct Request<'a> {
    method: &'static str,
    id: String,
    params: Params<'a>,
}

#[derive(Serialize)]
struct Params<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct Response {
    ok: bool,
    #[serde(default)]
    data: Option<Session>,
    #[serde(default)]
    error: Option<ErrorInfo>,
}

#[derive(Deserialize)]
struct ErrorInfo {
    code: String,
    message: String,
}

pub struct OpencodeClient {
    socket_path: Option<PathBuf>,
}

impl OpencodeClient {
    /// Resolves the host socket from `$OPENCODE_IPC_SOCKET`, falling back to
    /// the per-user default location.
    pub fn from_env() -> Self {
        let socket_path = env::var(SOCKET_ENV).map(PathBuf::from).ok().or_else(|| {
            dirs::home_dir().map(|h| h.join(".config").join("opencode").join(SOCKET_NAME))
        });
        Self { socket_path }
    }

    fn request(&self, session_id: &str) -> Result<Response, LookupError> {
        let socket = self
            .socket_path
            .as_ref()
            .ok_or_else(|| LookupError::Connection("Home directory not found".to_string()))?;

        let mut stream = UnixStream::connect(socket)
            .map_err(|e| LookupError::Connection(format!("Failed to connect: {}", e)))?;
        let _ = stream.set_read_timeout(Some(Duration::from_millis(READ_TIMEOUT_MS)));
        let _ = stream.set_write_timeout(Some(Duration::from_millis(WRITE_TIMEOUT_MS)));

        let request = Request {
            method: "session.get",
            id: make_request_id(),
            params: Params { id: session_id },
        };
        serde_json::to_writer(&mut stream, &request)
            .map_err(|e| LookupError::Connection(format!("Failed to write request: {}", e)))?;
        stream
            .write_all(b"\n")
            .map_err(|e| LookupError::Connection(format!("Failed to flush request: {}", e)))?;
        stream.flush().ok();

        read_response(&mut stream)
    }
}

impl SessionSource for OpencodeClient {
    fn get(&self, session_id: &str) -> Result<Session, LookupError> {
        let response = self.request(session_id)?;

        if !response.ok {
            return Err(match response.error {
                Some(err) if err.code == "not_found" => LookupError::NotFound(err.message),
                Some(err) => LookupError::Connection(format!("{}: {}", err.code, err.message)),
                None => LookupError::Connection("Unknown host error".to_string()),
            });
        }

        response
            .data
            .ok_or_else(|| LookupError::Malformed("Response missing session data".to_string()))
    }
}

fn read_response(stream: &mut UnixStream) -> Result<Response, LookupError> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buffer.extend_from_slice(&chunk[..n]);
                if buffer.len() > MAX_RESPONSE_BYTES {
                    return Err(LookupError::Malformed(
                        "Response exceeded maximum size".to_string(),
                    ));
                }
                if chunk[..n].contains(&b'\n') {
                    break;
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                return Err(LookupError::Connection(
                    "Timed out waiting for host response".to_string(),
                ));
            }
            Err(err) => {
                return Err(LookupError::Connection(format!(
                    "Failed to read response: {}",
                    err
                )));
            }
        }
    }

    let newline_index = buffer.iter().position(|b| *b == b'\n');
    let response_bytes = match newline_index {
        Some(index) => &buffer[..index],
        None => buffer.as_slice(),
    };

    if response_bytes.is_empty() {
        return Err(LookupError::Connection("Host response was empty".to_string()));
    }

    serde_json::from_slice(response_bytes)
        .map_err(|e| LookupError::Malformed(format!("Failed to parse response JSON: {}", e)))
}

fn make_request_id() -> String {
    format!(
        "req-{}-{}",
        Utc::now().timestamp_millis(),
        std::process::id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::net::UnixListener;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    struct EnvGuard {
        key: &'static str,
        prior: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let prior = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self { key, prior }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.prior {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    fn read_request_line(stream: &mut UnixStream) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    buffer.extend_from_slice(&chunk[..n]);
                    if buffer.contains(&b'\n') {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        buffer
    }

    fn serve_once(listener: UnixListener, reply: &'static str) -> std::thread::JoinHandle<Vec<u8>> {
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request_line(&mut stream);
            let mut payload = reply.as_bytes().to_vec();
            payload.push(b'\n');
            let _ = stream.write_all(&payload);
            request
        })
    }

    #[test]
    fn get_parses_session_from_host_reply() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("ipc.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();
        let server = serve_once(
            listener,
            r#"{"ok":true,"data":{"id":"ses_1","parentID":"ses_root","title":"Subtask"}}"#,
        );

        let _env = EnvGuard::set(SOCKET_ENV, socket_path.to_str().unwrap());
        let client = OpencodeClient::from_env();
        let session = client.get("ses_1").expect("lookup should succeed");

        assert_eq!(session.parent_id.as_deref(), Some("ses_root"));
        assert_eq!(session.title.as_deref(), Some("Subtask"));

        let request = server.join().unwrap();
        let request: serde_json::Value =
            serde_json::from_slice(request.split(|b| *b == b'\n').next().unwrap()).unwrap();
        assert_eq!(request["method"], "session.get");
        assert_eq!(request["params"]["id"], "ses_1");
    }

    #[test]
    fn host_error_reply_maps_to_lookup_error() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("ipc.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();
        let server = serve_once(
            listener,
            r#"{"ok":false,"error":{"code":"not_found","message":"ses_9"}}"#,
        );

        let _env = EnvGuard::set(SOCKET_ENV, socket_path.to_str().unwrap());
        let client = OpencodeClient::from_env();
        let err = client.get("ses_9").expect_err("lookup should fail");

        assert!(matches!(err, LookupError::NotFound(_)));
        server.join().unwrap();
    }

    #[test]
    fn missing_socket_is_a_connection_error() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("nowhere.sock");

        let _env = EnvGuard::set(SOCKET_ENV, socket_path.to_str().unwrap());
        let client = OpencodeClient::from_env();
        let err = client.get("ses_1").expect_err("no socket to connect to");

        assert!(matches!(err, LookupError::Connection(_)));
    }
}
