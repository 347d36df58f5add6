mod app;
mod effects;
mod logging;
mod notify;
mod render;

use std::path::PathBuf;

use clap::Parser;
use validator_core::SubmissionConfig;

#[derive(Debug, Parser)]
#[command(
    name = "validator_app",
    version,
    about = "Submit a mailing list for server-side validation and fetch the result"
)]
struct Cli {
    /// Input file (.xlsx, .xls or .csv).
    file: PathBuf,

    /// Validation server base URL.
    #[arg(long, default_value = "http://localhost:5000")]
    server: String,

    /// Per-address SMTP timeout passed to the server, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u32,

    /// Skip SMTP mailbox checks on the server.
    #[arg(long)]
    no_smtp: bool,

    /// Use the lenient validation mode instead of strict.
    #[arg(long)]
    lenient: bool,

    /// Cap the number of records the server will process.
    #[arg(long)]
    max_emails: Option<u32>,

    /// Directory the result file is saved into.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Do not fetch the result automatically on completion.
    #[arg(long)]
    no_download: bool,

    /// Also write logs to ./validator.log.
    #[arg(long)]
    log_file: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(if cli.log_file {
        logging::LogDestination::Both
    } else {
        logging::LogDestination::Terminal
    });

    app::run(app::RunOptions {
        file: cli.file,
        server: cli.server,
        config: SubmissionConfig {
            timeout_secs: cli.timeout,
            check_smtp: !cli.no_smtp,
            strict_mode: !cli.lenient,
            max_emails: cli.max_emails,
        },
        output_dir: cli.output_dir,
        auto_download: !cli.no_download,
    })
}
