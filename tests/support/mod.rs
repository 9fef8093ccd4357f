//! Shared test doubles: a loopback HTTP stub forge and recording fakes.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use kickoff::bootstrap::{BootstrapEvent, Reporter};
use kickoff::credential::Credential;
use kickoff::forge::{
    CreatedIssue, ForgeClient, ForgeConnector, IssueTicket, RemoteRepository,
    RepositoryDescriptor,
};
use kickoff::git::VersionControl;
use kickoff::{RemoteError, StepOutcome};

// ============================================================================
// Loopback stub forge (one request per connection, no keep-alive)
// ============================================================================

const MAX_HEADER_SIZE: usize = 32 * 1024;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Answers requests from a script, in order, and records what it saw.
pub struct StubForge {
    pub url: String,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl StubForge {
    pub fn start(script: Vec<HttpResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let mut script: VecDeque<HttpResponse> = script.into();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Some(request) = read_request(&mut stream) else {
                    continue;
                };
                seen.lock().unwrap().push(request);
                let response = script
                    .pop_front()
                    .unwrap_or_else(|| HttpResponse::new(500, "unscripted request"));
                write_response(&mut stream, &response);
            }
        });

        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &mut impl Read) -> Option<HttpRequest> {
    let mut header_buf = Vec::with_capacity(4096);
    let mut byte = [0u8; 1];
    loop {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {
                header_buf.push(byte[0]);
                if header_buf.len() > MAX_HEADER_SIZE {
                    return None;
                }
                if header_buf.ends_with(b"\r\n\r\n") {
                    break;
                }
            }
        }
    }

    let mut parsed_headers = [httparse::EMPTY_HEADER; 64];
    let mut req = httparse::Request::new(&mut parsed_headers);
    match req.parse(&header_buf) {
        Ok(httparse::Status::Complete(_)) => {}
        _ => return None,
    }

    let method = req.method.unwrap_or("").to_string();
    let path = req.path.unwrap_or("/").to_string();
    let headers: Vec<(String, String)> = req
        .headers
        .iter()
        .map(|h| {
            (
                h.name.to_string(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let content_length = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; content_length];
    stream.read_exact(&mut body).ok()?;

    Some(HttpRequest {
        method,
        path,
        headers,
        body,
    })
}

fn write_response(stream: &mut impl Write, response: &HttpResponse) {
    let head = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
    let _ = stream.flush();
}

// ============================================================================
// Recording fakes
// ============================================================================

/// In-memory forge with scripted answers. Every call is recorded.
pub struct FakeForge {
    pub exists: RefCell<Result<bool, u16>>,
    pub create: RefCell<Result<String, (u16, String)>>,
    /// Status per issue call, in order; 201 means success
    pub issue_statuses: RefCell<VecDeque<u16>>,
    /// Login returned by owner discovery, or the status it fails with
    pub user: RefCell<Result<String, u16>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeForge {
    pub fn new() -> Self {
        Self {
            exists: RefCell::new(Ok(false)),
            create: RefCell::new(Ok("https://example.com/owner/demo-repo.git".to_string())),
            issue_statuses: RefCell::new(VecDeque::from(vec![201, 201])),
            user: RefCell::new(Ok("owner".to_string())),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn existing() -> Self {
        let forge = Self::new();
        *forge.exists.borrow_mut() = Ok(true);
        forge
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl ForgeClient for FakeForge {
    fn repo_exists(&self, owner: &str, name: &str) -> Result<bool, RemoteError> {
        self.calls
            .borrow_mut()
            .push(format!("GET /repos/{}/{}", owner, name));
        self.exists
            .borrow()
            .clone()
            .map_err(|status| RemoteError::Status {
                operation: "existence check",
                status,
                body: String::new(),
            })
    }

    fn create_repo(
        &self,
        descriptor: &RepositoryDescriptor,
    ) -> Result<RemoteRepository, RemoteError> {
        self.calls
            .borrow_mut()
            .push(format!("POST /user/repos {}", descriptor.name));
        match self.create.borrow().clone() {
            Ok(clone_url) => Ok(RemoteRepository {
                clone_url,
                html_url: None,
            }),
            Err((status, body)) => Err(RemoteError::Status {
                operation: "create repository",
                status,
                body,
            }),
        }
    }

    fn create_issue(
        &self,
        owner: &str,
        name: &str,
        ticket: &IssueTicket,
    ) -> Result<CreatedIssue, RemoteError> {
        self.calls.borrow_mut().push(format!(
            "POST /repos/{}/{}/issues {}",
            owner, name, ticket.title
        ));
        let status = self.issue_statuses.borrow_mut().pop_front().unwrap_or(201);
        if status == 201 {
            Ok(CreatedIssue {
                number: Some(self.count("POST /repos/") as i64),
                html_url: None,
            })
        } else {
            Err(RemoteError::Status {
                operation: "create issue",
                status,
                body: "{\"message\":\"Not Found\"}".to_string(),
            })
        }
    }

    fn current_user(&self) -> Result<String, RemoteError> {
        self.calls.borrow_mut().push("GET /user".to_string());
        self.user
            .borrow()
            .clone()
            .map_err(|status| RemoteError::Status {
                operation: "current user lookup",
                status,
                body: "{\"message\":\"Bad credentials\"}".to_string(),
            })
    }
}

impl ForgeConnector for FakeForge {
    fn connect(&self, _credential: &Credential) -> kickoff::Result<Box<dyn ForgeClient + '_>> {
        Ok(Box::new(self))
    }
}

/// Version control that records steps and fails the one named in `fail_on`.
#[derive(Default)]
pub struct RecordingGit {
    pub calls: RefCell<Vec<String>>,
    pub fail_on: Option<&'static str>,
}

impl RecordingGit {
    pub fn failing_on(step: &'static str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_on: Some(step),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn step(&self, name: &'static str, call: String) -> StepOutcome {
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(name) {
            StepOutcome::failed(format!("exit code 1: {} failed", name))
        } else {
            StepOutcome::ok(name)
        }
    }
}

impl VersionControl for RecordingGit {
    fn init(&self, dir: &Path) -> StepOutcome {
        self.step("init", format!("init {}", dir.display()))
    }

    fn stage_all(&self, _dir: &Path) -> StepOutcome {
        self.step("add", "add .".to_string())
    }

    fn commit(&self, _dir: &Path, message: &str) -> StepOutcome {
        self.step("commit", format!("commit {}", message))
    }

    fn add_remote(&self, _dir: &Path, url: &str) -> StepOutcome {
        self.step("remote", format!("remote add origin {}", url))
    }

    fn push(&self, _dir: &Path, branch: &str) -> StepOutcome {
        self.step("push", format!("push {}", branch))
    }
}

/// Collects every event.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<BootstrapEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<BootstrapEvent> {
        self.events.borrow().clone()
    }

    pub fn failures(&self) -> Vec<BootstrapEvent> {
        self.events()
            .into_iter()
            .filter(|e| !e.outcome.succeeded)
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &BootstrapEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Every file under `dir`, relative, sorted. `.git` is skipped.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.file_name().is_some_and(|n| n == ".git") {
                continue;
            }
            if path.is_dir() {
                for nested in list_files(&path) {
                    files.push(path.strip_prefix(dir).unwrap().join(nested));
                }
            } else {
                files.push(path.strip_prefix(dir).unwrap().to_path_buf());
            }
        }
    }
    files.sort();
    files
}
