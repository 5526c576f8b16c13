use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Multi-threaded HTTP load generator that replays request files with a live terminal dashboard."
)]
pub struct CliArgs {
    /// Number of worker threads to spawn
    #[arg(long, short = 't', default_value_t = 1)]
    pub threads: usize,

    /// Long request detection threshold in milliseconds
    #[arg(long = "threshold", short = 'r', default_value_t = 1000)]
    pub threshold_ms: u64,

    /// Number of times the request list is replayed by each thread
    #[arg(long, short = 'n', conflicts_with = "duration")]
    pub count: Option<u32>,

    /// Duration of the run in seconds
    #[arg(long, short = 'd')]
    pub duration: Option<u64>,

    /// File containing the Authorization header value, applied to every request
    #[arg(long = "auth", short = 'a')]
    pub auth_file: Option<PathBuf>,

    /// Enable verbose diagnostic logging (written to stderr)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Request files, replayed in the given order
    #[arg(required = true, value_name = "REQUEST_FILE")]
    pub request_files: Vec<PathBuf>,
}
