//! Integration tests for the html-normalizer CLI.
//!
//! These tests verify the CLI works correctly with various options and edge cases.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_html-normalizer"))
}

#[test]
fn test_basic_stdin() {
    cli()
        .write_stdin("<h1>Title</h1><p>Content</p>")
        .assert()
        .success()
        .stdout("<h2>Title</h2><p>Content\n</p>");
}

#[test]
fn test_file_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.html");
    fs::write(&input_path, "<p>Test content</p>").unwrap();

    cli()
        .arg(input_path.to_str().unwrap())
        .assert()
        .success()
        .stdout("<p>Test content\n</p>");
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output.html");

    cli()
        .arg("-o")
        .arg(output_path.to_str().unwrap())
        .write_stdin("<ul><li>Output test</li></ul>")
        .assert()
        .success()
        .stdout("");

    let output = fs::read_to_string(&output_path).unwrap();
    assert_eq!(output, "<p>Output test\n</p>");
}

#[test]
fn test_dash_reads_stdin() {
    cli()
        .arg("-")
        .write_stdin("<p>Dash test</p>")
        .assert()
        .success()
        .stdout("<p>Dash test\n</p>");
}

#[test]
fn test_body_document_from_stdin() {
    cli()
        .write_stdin("<html><head><title>T</title></head><body><h3>Hi</h3><ul><li>a</li><li>b</li></ul></body></html>")
        .assert()
        .success()
        .stdout("<body><h2>Hi</h2><p>a\n</p><p>b\n</p></body>");
}

#[test]
fn test_nested_lists() {
    let html = r"
        <ul>
            <li>Item 1
                <ul>
                    <li>Nested 1</li>
                    <li>Nested 2</li>
                </ul>
            </li>
            <li>Item 2</li>
        </ul>
    ";

    let assert = cli().write_stdin(html).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let item_1 = stdout.find("<p>Item 1\n</p>").unwrap();
    let nested_1 = stdout.find("<p>Nested 1\n</p>").unwrap();
    let nested_2 = stdout.find("<p>Nested 2\n</p>").unwrap();
    let item_2 = stdout.find("<p>Item 2\n</p>").unwrap();
    assert!(item_1 < nested_1 && nested_1 < nested_2 && nested_2 < item_2);
    assert!(!stdout.contains("<ul"));
}

#[test]
fn test_url_fetches_html() {
    let body = "<ul><li>Remote</li></ul>";
    let (url, handle) = serve_once(body, Some("text/html; charset=utf-8"));

    cli().arg("--url").arg(&url).assert().success().stdout("<p>Remote\n</p>");

    handle.join().unwrap();
}

#[test]
fn test_url_conflicts_with_file_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.html");
    fs::write(&input_path, "<p>Conflicting input</p>").unwrap();

    cli()
        .arg(input_path.to_str().unwrap())
        .arg("--url")
        .arg("http://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_url_custom_user_agent() {
    let body = "<p>UA</p>";
    let ua = "Custom-UA/1.0";
    let (url, handle, req_rx) = serve_once_with_capture(body, Some("text/html; charset=utf-8"));

    cli()
        .arg("--url")
        .arg(&url)
        .arg("--user-agent")
        .arg(ua)
        .assert()
        .success()
        .stdout("<p>UA\n</p>");

    let req = req_rx.recv_timeout(Duration::from_secs(1)).unwrap();
    let req_lower = req.to_ascii_lowercase();
    assert!(req_lower.contains(&format!("user-agent: {}", ua.to_ascii_lowercase())));

    handle.join().unwrap();
}

#[test]
fn test_url_default_user_agent() {
    let (url, handle, req_rx) = serve_once_with_capture("<p>x</p>", Some("text/html"));

    cli().arg("--url").arg(&url).assert().success();

    let req = req_rx.recv_timeout(Duration::from_secs(1)).unwrap();
    assert!(req.to_ascii_lowercase().contains("user-agent: html-normalizer/"));

    handle.join().unwrap();
}

#[test]
fn test_url_handles_quirky_markup() {
    let html = "<head><title>Old School</title></head><font><center><h1>Old School Site</h1><p>Welcome!</p>";
    let (url, handle) = serve_once(html, Some("text/html"));

    cli()
        .arg("--url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicate::str::contains("<h2>Old School Site</h2>"))
        .stdout(predicate::str::contains("Welcome!\n</p>"));

    handle.join().unwrap();
}

#[test]
fn test_url_handles_windows_1252_charset() {
    let body = b"<html><body><p>Se\xf1or \x97 legacy charset</p></body></html>".to_vec();
    let (url, handle, _) = serve_once_bytes(body, Some("text/html; charset=windows-1252"));

    cli()
        .arg("--url")
        .arg(&url)
        .assert()
        .success()
        .stdout("<body><p>Señor \u{2014} legacy charset\n</p></body>");

    handle.join().unwrap();
}

#[test]
fn test_url_unknown_server_charset_falls_back_to_sniffing() {
    let body = b"<meta charset=\"windows-1252\"><body><p>Se\xf1or</p></body>".to_vec();
    let (url, handle, _) = serve_once_bytes(body, Some("text/html; charset=x-bogus"));

    cli()
        .arg("--url")
        .arg(&url)
        .assert()
        .success()
        .stdout("<body><p>Señor\n</p></body>")
        .stderr(predicate::str::contains("Unknown encoding").not());

    handle.join().unwrap();
}

#[test]
fn test_url_explicit_encoding_still_validated() {
    let (url, handle, _) = serve_once_bytes(b"<p>x</p>".to_vec(), Some("text/html"));

    cli()
        .arg("--url")
        .arg(&url)
        .arg("--encoding")
        .arg("x-bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding: x-bogus"));

    handle.join().unwrap();
}

#[test]
fn test_url_connection_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    cli()
        .arg("--url")
        .arg(format!("http://{addr}"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error fetching URL"));
}

#[test]
fn test_heading_level_option() {
    cli()
        .arg("--heading-level")
        .arg("3")
        .write_stdin("<h1>A</h1><h6>B</h6>")
        .assert()
        .success()
        .stdout("<h3>A</h3><h3>B</h3>");
}

#[test]
fn test_heading_level_validation_min() {
    cli()
        .arg("--heading-level")
        .arg("0")
        .write_stdin("<p>Test</p>")
        .assert()
        .failure();
}

#[test]
fn test_heading_level_validation_max() {
    cli()
        .arg("--heading-level")
        .arg("7")
        .write_stdin("<p>Test</p>")
        .assert()
        .failure();
}

#[test]
fn test_flatten_ordered_lists() {
    cli()
        .arg("--flatten-ordered-lists")
        .write_stdin("<ol><li>one</li><li>two</li></ol>")
        .assert()
        .success()
        .stdout("<p>one\n</p><p>two\n</p>");
}

#[test]
fn test_ordered_lists_kept_by_default() {
    cli()
        .write_stdin("<ol><li>one</li></ol>")
        .assert()
        .success()
        .stdout("<ol><li>one</li></ol>");
}

#[test]
fn test_no_paragraph_breaks() {
    cli()
        .arg("--no-paragraph-breaks")
        .write_stdin("<p>x</p><ul><li>y</li></ul>")
        .assert()
        .success()
        .stdout("<p>x</p><p>y</p>");
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("options.json");
    fs::write(&config_path, r#"{"heading_level": "h4", "flatten_ordered_lists": true}"#).unwrap();

    cli()
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .write_stdin("<h1>A</h1><ol><li>x</li></ol>")
        .assert()
        .success()
        .stdout("<h4>A</h4><p>x\n</p>");
}

#[test]
fn test_flags_override_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("options.json");
    fs::write(&config_path, r#"{"heading_level": "h4"}"#).unwrap();

    cli()
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .arg("--heading-level")
        .arg("1")
        .write_stdin("<h3>A</h3>")
        .assert()
        .success()
        .stdout("<h1>A</h1>");
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("options.json");
    fs::write(&config_path, r#"{"heading_level": "h9"}"#).unwrap();

    cli()
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .write_stdin("<p>Test</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_debug_flag() {
    cli()
        .arg("--debug")
        .write_stdin("<p>Test</p>")
        .assert()
        .success()
        .stdout("<p>Test\n</p>")
        .stderr(predicate::str::contains("normalized document"));
}

#[test]
fn test_encoding_utf8() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("test.html");
    fs::write(&input_path, "<p>Test UTF-8: 你好</p>").unwrap();

    cli()
        .arg("--encoding")
        .arg("utf-8")
        .arg(input_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("你好"));
}

#[test]
fn test_encoding_latin1_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("latin1.html");
    fs::write(&input_path, b"<p>caf\xe9</p>").unwrap();

    cli()
        .arg("--encoding")
        .arg("latin1")
        .arg(input_path.to_str().unwrap())
        .assert()
        .success()
        .stdout("<p>café\n</p>");
}

#[test]
fn test_encoding_invalid() {
    cli()
        .arg("--encoding")
        .arg("invalid-encoding")
        .write_stdin("<p>Test</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding"));
}

#[test]
fn test_nonexistent_file() {
    cli()
        .arg("/nonexistent/file.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn test_invalid_html() {
    cli().write_stdin("<p>Unclosed paragraph<p>Another").assert().success();
}

#[test]
fn test_empty_input() {
    cli().write_stdin("").assert().success().stdout("");
}

#[test]
fn test_version_flag() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn test_generate_completion_bash() {
    cli()
        .arg("--generate-completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_html-normalizer()"));
}

#[test]
fn test_generate_completion_zsh() {
    cli()
        .arg("--generate-completion")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef html-normalizer"));
}

#[test]
fn test_generate_man() {
    cli()
        .arg("--generate-man")
        .assert()
        .success()
        .stdout(predicate::str::contains(".TH"));
}

fn serve_once(body: &'static str, content_type: Option<&'static str>) -> (String, thread::JoinHandle<()>) {
    let (url, handle, _rx) = serve_once_with_capture(body, content_type);
    (url, handle)
}

fn serve_once_with_capture(
    body: &'static str,
    content_type: Option<&'static str>,
) -> (String, thread::JoinHandle<()>, mpsc::Receiver<String>) {
    serve_once_bytes(body.as_bytes().to_vec(), content_type)
}

fn serve_once_bytes(
    body: Vec<u8>,
    content_type: Option<&'static str>,
) -> (String, thread::JoinHandle<()>, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel::<String>();

    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buffer = [0u8; 1024];
            let _ = stream.read(&mut buffer);
            let _ = tx.send(String::from_utf8_lossy(&buffer).to_string());

            let ct_header = content_type
                .map(|ct| format!("Content-Type: {ct}\r\n"))
                .unwrap_or_default();
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n{ct_header}\r\n",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(&body);
        }
    });

    (format!("http://{}", addr), handle, rx)
}
