// tests/common/mod.rs
//! A tiny fake of the GitHub REST API served from a background thread.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
pub struct FakeResponse {
    pub status: u16,
    pub body: String,
    pub link: Option<String>,
}

impl FakeResponse {
    pub fn ok(body: &str) -> Self {
        FakeResponse {
            status: 200,
            body: body.to_string(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: String) -> Self {
        self.link = Some(link);
        self
    }

    pub fn error(status: u16, message: &str) -> Self {
        FakeResponse {
            status,
            body: format!(r#"{{"message":"{}"}}"#, message),
            link: None,
        }
    }
}

/// A recorded request: the request target and its headers (lowercased names)
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub target: String,
    pub headers: HashMap<String, String>,
}

pub struct FakeGitHub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeGitHub {
    /// Start serving; `routes` receives the base URL so Link headers can point back
    pub fn start<F>(routes: F) -> Self
    where
        F: FnOnce(&str) -> Vec<(String, FakeResponse)>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<String, FakeResponse> = routes(&base_url).into_iter().collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &routes, &recorded);
            }
        });

        FakeGitHub { base_url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path_prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.target.split('?').next() == Some(path_prefix))
            .count()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, FakeResponse>,
    recorded: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("")
        .to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    recorded.lock().unwrap().push(RecordedRequest {
        target: target.clone(),
        headers,
    });

    let response = routes
        .get(&target)
        .cloned()
        .unwrap_or_else(|| FakeResponse::error(404, "Not Found"));

    let mut head = format!(
        "HTTP/1.1 {} FAKE\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        response.body.len()
    );
    if let Some(link) = &response.link {
        head.push_str(&format!("Link: {}\r\n", link));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
    let _ = stream.flush();
}

/// JSON body of a branches page
pub fn branches_json(names: &[&str]) -> String {
    let entries: Vec<String> = names
        .iter()
        .map(|n| format!(r#"{{"name":"{}","protected":false}}"#, n))
        .collect();
    format!("[{}]", entries.join(","))
}

/// JSON body of a repository lookup
pub fn repo_json(default_branch: &str) -> String {
    format!(r#"{{"name":"widgets","default_branch":"{}"}}"#, default_branch)
}
