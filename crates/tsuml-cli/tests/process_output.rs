//! Process-level output tests
//!
//! Spawn the built `tsuml` binary and check exactly what reaches stdout
//! and stderr.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};

const DOG: &str = r#"{ "files": [{ "classes": [{
    "symbol": "Dog",
    "properties": [{ "symbol": "name" }],
    "methods": [{ "symbol": "bark", "modifiers": ["private"] }],
    "extends": { "identifier": "Animal" }
}] }] }"#;

/// Run the CLI with `args`, feeding `stdin` and silencing logs
fn run_cli(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tsuml"))
        .args(args)
        .env("TSUML_LOG_LEVEL", "off")
        .env_remove("RUST_LOG")
        .env("NO_PROXY", "127.0.0.1,localhost")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tsuml");

    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(stdin.as_bytes())
        .expect("write stdin");

    child.wait_with_output().expect("wait for tsuml")
}

/// Answer one HTTP request with `reply`, returning the request body
fn serve_once(reply: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            let n = socket.read(&mut chunk).unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length: usize = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|v| v.trim().parse().unwrap())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).unwrap();
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            reply.len(),
            reply
        );
        socket.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&buf[header_end..]).to_string()
    });

    (base, handle)
}

#[test]
fn test_mermaid_from_stdin_to_stdout() {
    let output = run_cli(&["generate", "--input", "-"], DOG);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "classDiagram\nclass Dog {\n\t+name\n\t-bark()\n}\nAnimal <|-- Dog\n"
    );
}

#[test]
fn test_mermaid_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("decls.json");
    let output_path = dir.path().join("diagram.mmd");
    std::fs::write(&input, DOG).unwrap();

    let output = run_cli(
        &[
            "generate",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ],
        "",
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = std::fs::read_to_string(&output_path).unwrap();
    assert!(written.starts_with("classDiagram\nclass Dog {\n"));
}

#[test]
fn test_strict_mode_fails_on_unresolved_member() {
    let input = r#"{ "files": [{ "classes": [{ "symbol": "A", "properties": [{}] }] }] }"#;

    let output = run_cli(&["generate", "--strict"], input);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unresolved property symbol in 'A'"));

    let lenient = run_cli(&["generate"], input);
    assert!(lenient.status.success());
    assert_eq!(
        String::from_utf8_lossy(&lenient.stdout),
        "classDiagram\nclass A {\n}\n"
    );
}

#[test]
fn test_invalid_json_exits_with_error() {
    let output = run_cli(&["generate"], "{ not json");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
}

#[test]
fn test_unknown_engine_is_rejected() {
    let output = run_cli(&["generate", "--type", "plantuml"], "");
    assert!(!output.status.success());
}

#[test]
fn test_engines_json_lists_builtins() {
    let output = run_cli(&["engines", "--json"], "");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["engines"], serde_json::json!(["mermaid", "yuml"]));
    assert_eq!(report["default"], "mermaid");
}

#[test]
fn test_yuml_url_printed_to_stdout() {
    let (base, server) = serve_once("abc.png");
    let input = r#"{ "files": [{ "classes": [{
        "symbol": "Cat",
        "properties": [{ "symbol": "age" }],
        "methods": [{ "symbol": "meow" }]
    }] }] }"#;

    let output = run_cli(
        &["generate", "--type", "yuml", "--yuml-url", &base, "--no-open"],
        input,
    );

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("{base}/diagram/plain/class/abc.svg\n")
    );
    let request_body = server.join().unwrap();
    assert!(request_body.contains("%5BCat%7Cage%3B%7Cmeow%28%29%3B%5D"));
}

#[test]
fn test_yuml_url_written_to_output_file() {
    let (base, server) = serve_once("abc.png");
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("diagram.url");

    let output = run_cli(
        &[
            "generate",
            "--type",
            "yuml",
            "--yuml-url",
            &base,
            "--no-open",
            "-o",
            output_path.to_str().unwrap(),
        ],
        DOG,
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        format!("{base}/diagram/plain/class/abc.svg\n")
    );
    server.join().unwrap();
}
