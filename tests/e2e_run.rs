
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Method;
use url::Url;

use reqvolley::args::RunMode;
use reqvolley::request::RequestSpec;
use reqvolley::shutdown::StopSignal;
use reqvolley::transport::HttpTransport;
use reqvolley::ui::LiveDisplay;
use reqvolley::worker::{Worker, WorkerExit};

use support_server::{refused_address, spawn_http_server};

/// Threshold high enough that no live-server request counts as slow.
const NEVER_SLOW: Duration = Duration::from_secs(3600);

#[derive(Clone, Default)]
struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    fn contents(&self) -> Result<String, String> {
        let buf = self
            .inner
            .lock()
            .map_err(|_poisoned| "buffer lock poisoned".to_owned())?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        let mut buf = self
            .inner
            .lock()
            .map_err(|_poisoned| std::io::Error::other("buffer lock poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn captured_display(thread_count: usize) -> (LiveDisplay, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let display = LiveDisplay::with_backend(Box::new(buffer.clone()), Some((120, 30)), thread_count);
    (display, buffer)
}

fn get_spec(base: &str, path: &str) -> Result<RequestSpec, String> {
    let url = Url::parse(&format!("{}{}", base, path))
        .map_err(|err| format!("parse URL failed: {}", err))?;
    Ok(RequestSpec {
        method: Method::GET,
        url,
        headers: Vec::new(),
        body: None,
    })
}

fn run_worker(
    specs: &[RequestSpec],
    mode: RunMode,
    slow_threshold: Duration,
    display: &LiveDisplay,
) -> Result<WorkerExit, String> {
    let transport =
        HttpTransport::new("").map_err(|err| format!("build transport failed: {}", err))?;
    let mut worker = Worker::new(
        0,
        mode,
        specs,
        transport,
        StopSignal::new(),
        slow_threshold,
        display,
    );
    worker.run().map_err(|err| format!("run failed: {}", err))
}

#[test]
fn e2e_worker_replays_against_live_server() -> Result<(), String> {
    let (base, _server) = spawn_http_server()?;
    let specs = vec![get_spec(&base, "/")?];
    let (display, buffer) = captured_display(1);

    let exit = run_worker(&specs, RunMode::Repetitions(2), NEVER_SLOW, &display)?;

    if exit != WorkerExit::Completed {
        return Err("Expected a completed run.".to_owned());
    }
    let painted = buffer.contents()?;
    if !painted.contains("S:2") || !painted.contains("R:2") {
        return Err(format!("Expected 2 sent, 2 succeeded in: {}", painted));
    }
    Ok(())
}

#[test]
fn e2e_zero_threshold_logs_status_and_body_length() -> Result<(), String> {
    let (base, _server) = spawn_http_server()?;
    let specs = vec![get_spec(&base, "/")?];
    let (display, buffer) = captured_display(1);

    run_worker(&specs, RunMode::Repetitions(1), Duration::ZERO, &display)?;

    let painted = buffer.contents()?;
    // The body "load ok" is 7 bytes; only success bodies are measured.
    if !painted.contains("200") || !painted.contains("Len:7") {
        return Err(format!("Expected a 200/Len:7 log row in: {}", painted));
    }
    if !painted.contains("Elapsed:00:") {
        return Err(format!("Expected a formatted elapsed time in: {}", painted));
    }
    Ok(())
}

#[test]
fn e2e_non_success_counts_failed_without_reading_body() -> Result<(), String> {
    let (base, _server) = spawn_http_server()?;
    let specs = vec![get_spec(&base, "/missing")?];
    let (display, buffer) = captured_display(1);

    let exit = run_worker(&specs, RunMode::Repetitions(1), Duration::ZERO, &display)?;

    if exit != WorkerExit::Completed {
        return Err("Request-level failures must not end the run.".to_owned());
    }
    let painted = buffer.contents()?;
    if !painted.contains("F:1") {
        return Err(format!("Expected one failed outcome in: {}", painted));
    }
    if !painted.contains("404") || !painted.contains("Len:0") {
        return Err(format!("Expected a 404/Len:0 log row in: {}", painted));
    }
    Ok(())
}

#[test]
fn e2e_connection_refused_is_a_failed_outcome() -> Result<(), String> {
    let base = refused_address()?;
    let specs = vec![get_spec(&base, "/")?];
    let (display, buffer) = captured_display(1);

    let exit = run_worker(&specs, RunMode::Repetitions(1), Duration::ZERO, &display)?;

    if exit != WorkerExit::Completed {
        return Err("Transport failures must not end the run.".to_owned());
    }
    let painted = buffer.contents()?;
    if !painted.contains("F:1") || !painted.contains("-1") || !painted.contains("Len:0") {
        return Err(format!("Expected a -1/Len:0 failed row in: {}", painted));
    }
    Ok(())
}
