//! Async client for communicating with the database worker process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{oneshot, Mutex};

use super::error::{WorkerError, WorkerResult};
use super::protocol::{RequestEnvelope, ResponseEnvelope};
use crate::config::Settings;

/// Default timeout for requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Async client for the database worker.
///
/// The client spawns the worker as a child process and communicates via
/// NDJSON (newline-delimited JSON) over stdin/stdout. Each request has a
/// unique ID for correlation with responses, enabling concurrent requests.
///
/// # Example
///
/// ```ignore
/// use schemer::worker::{WorkerClient, protocol::*};
///
/// let client = WorkerClient::spawn("./schemer-worker").await?;
///
/// let response: ListTablesResponse = client.request(
///     methods::LIST_TABLES,
///     ListTablesParams { ... }
/// ).await?;
/// ```
pub struct WorkerClient {
    /// Writer for sending requests to worker stdin.
    stdin: Arc<Mutex<BufWriter<ChildStdin>>>,

    /// Map of pending request IDs to response channels.
    pending: Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>>,

    /// Handle to the worker child process.
    _child: Child,

    /// Handle to the background reader task.
    _reader_task: tokio::task::JoinHandle<()>,

    /// Request timeout duration.
    timeout: Duration,
}

impl WorkerClient {
    /// Spawn a new worker process.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker process cannot be spawned.
    pub async fn spawn<P: AsRef<Path>>(worker_path: P) -> WorkerResult<Self> {
        Self::spawn_with_args_and_timeout(
            worker_path,
            &[],
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .await
    }

    /// Spawn a worker using settings configuration.
    ///
    /// Resolves the worker binary from the configured path, falling back to
    /// common locations and PATH. Pool settings from the configuration are
    /// passed to the worker.
    pub async fn spawn_with_settings(settings: &Settings) -> WorkerResult<Self> {
        let worker_path = Self::resolve_worker_path(settings)?;
        let pool_args = settings.worker.pool.to_worker_args();

        Self::spawn_with_args(&worker_path, &pool_args).await
    }

    /// Resolve the worker binary path from settings.
    fn resolve_worker_path(settings: &Settings) -> WorkerResult<PathBuf> {
        if let Some(path) = settings.worker_path() {
            return Ok(path);
        }

        // Search common locations
        let candidates = [
            "schemer-worker",
            "./schemer-worker",
            "./worker/schemer-worker",
        ];

        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }

        // Try PATH
        if let Ok(output) = std::process::Command::new("which")
            .arg("schemer-worker")
            .output()
        {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Ok(PathBuf::from(path));
                }
            }
        }

        Err(WorkerError::SpawnFailed(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Worker binary not found. Set worker.path in schemer.toml",
        )))
    }

    /// Spawn a worker with command-line arguments (for pool settings).
    pub async fn spawn_with_args<P: AsRef<Path>>(
        worker_path: P,
        args: &[String],
    ) -> WorkerResult<Self> {
        Self::spawn_with_args_and_timeout(
            worker_path,
            args,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .await
    }

    /// Spawn a worker with arguments and custom timeout.
    pub async fn spawn_with_args_and_timeout<P: AsRef<Path>>(
        worker_path: P,
        args: &[String],
        timeout: Duration,
    ) -> WorkerResult<Self> {
        let mut child = Command::new(worker_path.as_ref())
            .args(args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(WorkerError::SpawnFailed)?;

        let stdin = child.stdin.take().expect("stdin not captured");
        let stdout = child.stdout.take().expect("stdout not captured");

        let stdin = Arc::new(Mutex::new(BufWriter::new(stdin)));
        let pending: Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>> =
            Arc::new(Mutex::new(HashMap::new()));

        // Spawn background reader task
        let reader_task = Self::spawn_reader_task(stdout, pending.clone());

        Ok(Self {
            stdin,
            pending,
            _child: child,
            _reader_task: reader_task,
            timeout,
        })
    }

    /// Spawn the background task that reads responses from the worker.
    fn spawn_reader_task(
        stdout: ChildStdout,
        pending: Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        // EOF - worker exited
                        break;
                    }
                    Ok(_) => {
                        // Try to parse as response envelope
                        match serde_json::from_str::<ResponseEnvelope>(&line) {
                            Ok(resp) => {
                                let mut pending = pending.lock().await;
                                if let Some(tx) = pending.remove(&resp.id) {
                                    // Send response to waiting caller
                                    let _ = tx.send(resp);
                                }
                            }
                            Err(e) => {
                                // Log parse error but continue
                                eprintln!("worker: failed to parse response: {}", e);
                            }
                        }
                    }
                    Err(e) => {
                        // Read error - log and break
                        eprintln!("worker: read error: {}", e);
                        break;
                    }
                }
            }

            // Worker exited - notify all pending requests with error responses
            let mut pending = pending.lock().await;
            for (id, tx) in pending.drain() {
                let error_response = ResponseEnvelope {
                    id,
                    success: false,
                    result: None,
                    error: Some(super::protocol::ErrorInfo {
                        code: "WORKER_EXITED".to_string(),
                        message: "Worker process exited unexpectedly".to_string(),
                    }),
                };
                let _ = tx.send(error_response);
            }
        })
    }

    /// Send a request to the worker and wait for a response.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Serialization fails
    /// - Writing to the worker fails
    /// - The request times out
    /// - The worker returns an error response
    /// - Deserialization of the response fails
    pub async fn request<P, R>(&self, method: &str, params: P) -> WorkerResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = uuid::Uuid::new_v4().to_string();

        let request = RequestEnvelope {
            id: id.clone(),
            method: method.to_string(),
            params: serde_json::to_value(params).map_err(WorkerError::SerializeFailed)?,
        };

        // Register response channel
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            pending.insert(id.clone(), tx);
        }

        // Send request
        {
            let mut stdin = self.stdin.lock().await;
            let line =
                serde_json::to_string(&request).map_err(WorkerError::SerializeFailed)? + "\n";
            stdin
                .write_all(line.as_bytes())
                .await
                .map_err(WorkerError::WriteFailed)?;
            stdin.flush().await.map_err(WorkerError::WriteFailed)?;
        }

        // Wait for response with timeout
        let response = match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(_)) => {
                // Channel closed - worker exited
                return Err(WorkerError::ChannelClosed);
            }
            Err(_) => {
                // Timeout - clean up pending request to prevent memory leak
                let mut pending = self.pending.lock().await;
                pending.remove(&id);
                return Err(WorkerError::Timeout(self.timeout.as_secs()));
            }
        };

        // Process response
        if response.success {
            let result = response.result.unwrap_or(serde_json::Value::Null);
            serde_json::from_value(result).map_err(WorkerError::DeserializeFailed)
        } else {
            let error = response.error.unwrap_or_else(|| super::protocol::ErrorInfo {
                code: "UNKNOWN".to_string(),
                message: "Unknown error".to_string(),
            });
            Err(Self::classify_error(&error.code, &error.message))
        }
    }

    /// Classify a worker error into a more specific error type.
    fn classify_error(code: &str, message: &str) -> WorkerError {
        match code {
            "DRIVER_NOT_FOUND" => WorkerError::DriverNotFound(message.to_string()),
            "CONNECTION_FAILED" => WorkerError::ConnectionFailed(message.to_string()),
            "INVALID_REQUEST" => WorkerError::InvalidRequest(message.to_string()),
            "METHOD_NOT_FOUND" => WorkerError::MethodNotFound(message.to_string()),
            "UNSUPPORTED_METADATA" => WorkerError::UnsupportedMetadata(message.to_string()),
            _ => WorkerError::remote(code, message),
        }
    }

    /// Check if the worker is still running.
    ///
    /// Returns `true` if the worker process appears to be running,
    /// `false` if the reader task has finished (indicating worker exit).
    pub fn is_alive(&self) -> bool {
        !self._reader_task.is_finished()
    }

    /// Get the current request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the request timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}
