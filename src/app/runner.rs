use crate::args::RunConfig;
use crate::error::AppResult;
use crate::request::RequestSpec;
use crate::shutdown::{StopSignal, spawn_cancel_watcher};
use crate::transport::HttpTransport;
use crate::ui::{LiveDisplay, TerminalSession};
use crate::worker::Worker;

/// Execute the whole run: take over the terminal, fan out one worker
/// thread per configured ordinal, wait for all of them, and append the
/// final log row. Cancellation is a normal completion, not an error.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, a worker's transport
/// cannot be built, or a display repaint fails.
pub fn execute_run(
    config: &RunConfig,
    requests: &[RequestSpec],
    authorization: &str,
    authorization_display: &str,
) -> AppResult<()> {
    let session = TerminalSession::begin()?;

    let display = LiveDisplay::new(config.thread_count);
    display.set_title(&title_line(config, requests.len(), authorization_display))?;
    display.set_bottom("Press Ctrl+C to exit")?;

    let stop = StopSignal::new();
    let watcher = spawn_cancel_watcher(stop.clone());

    let result = run_workers(config, requests, authorization, &display, &stop);

    // Unblock the watcher even after a clean run; raising the flag once the
    // workers have finished has no further effect.
    stop.raise();
    drop(watcher.join());

    result?;
    display.append_log("All done".to_owned())?;

    tracing::debug!("Run finished; restoring terminal");
    drop(session);
    Ok(())
}

fn run_workers(
    config: &RunConfig,
    requests: &[RequestSpec],
    authorization: &str,
    display: &LiveDisplay,
    stop: &StopSignal,
) -> AppResult<()> {
    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(config.thread_count);

        for index in 0..config.thread_count {
            let stop = stop.clone();
            handles.push(scope.spawn(move || {
                // The transport client is allocated inside the worker's own
                // thread and released with it on every exit path.
                let transport = HttpTransport::new(authorization)?;
                let mut worker = Worker::new(
                    index,
                    config.mode,
                    requests,
                    transport,
                    stop,
                    config.slow_threshold,
                    display,
                );
                worker.run()
            }));
        }

        for handle in handles {
            match handle.join() {
                Ok(result) => {
                    // Cancelled and Completed are both normal exits.
                    let _exit = result?;
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(())
    })
}

fn title_line(config: &RunConfig, request_count: usize, authorization_display: &str) -> String {
    format!(
        "Threads: {:<2} Requests: {:<2} Mode: {:<20} LongReqThreshold: {}ms Authorization: {}",
        config.thread_count,
        request_count,
        config.mode.describe(),
        config.slow_threshold.as_millis(),
        authorization_display,
    )
}
