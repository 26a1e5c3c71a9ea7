use clap::{Parser, Subcommand};
use oci_firewall_export::config::ExportConfig;
use oci_firewall_export::menu::{self, InputState, Mode};
use oci_firewall_export::oci::ProcessExecutor;
use oci_firewall_export::processing::run_converter;
use oci_firewall_export::{export_policy, logging, summary_lines};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "oci-firewall-export",
    version,
    about = "Export an OCI network firewall policy to JSON"
)]
struct Cli {
    #[arg(long, global = true, help = "OCI CLI binary [env: OCI_CLI_BIN]")]
    oci_bin: Option<String>,
    #[arg(long, global = true, help = "Directory for listing and output files [env: FW_EXPORT_DIR]")]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Concurrent detail fetches per category [env: FW_EXPORT_WORKERS]")]
    workers: Option<usize>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the policy objects to *_output.json files
    Export {
        #[arg(long, help = "Network firewall policy OCID (prompted for when absent)")]
        policy_id: Option<String>,
    },
    /// Convert the exported JSON files with the external converter
    Convert,
}

impl Cli {
    fn apply(&self, mut config: ExportConfig) -> ExportConfig {
        if let Some(oci_bin) = &self.oci_bin {
            config.oci_bin = oci_bin.clone();
        }
        if let Some(dir) = &self.dir {
            config.output_dir = dir.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers.max(1);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    logging::init()?;
    log::info!("#Start main()");

    let cli = Cli::parse();
    let config = cli.apply(ExportConfig::from_env());
    let executor = Arc::new(ProcessExecutor);
    let mut input = io::stdin().lock();
    let mut out = io::stdout();

    let (mode, policy_flag) = match cli.command {
        Some(Commands::Export { policy_id }) => (Mode::Export, policy_id),
        Some(Commands::Convert) => (Mode::Convert, None),
        None => match menu::select_mode(&mut input, &mut out)? {
            Some(mode) => (mode, None),
            None => return Ok(()),
        },
    };

    match mode {
        Mode::Export => {
            let state = match policy_flag {
                Some(raw) => menu::accept_policy_id(&raw, &mut out)?,
                None => menu::prompt_policy_id(&mut input, &mut out)?,
            };
            let InputState::Validated(policy_id) = state else {
                return Ok(());
            };
            let summary = export_policy(config, policy_id, executor).await?;
            for line in summary_lines(&summary) {
                writeln!(out, "{line}")?;
            }
        }
        Mode::Convert => {
            writeln!(out, "Calling converter: {}", config.convert_cmd)?;
            let output = run_converter(&config, executor).await?;
            write!(out, "{}", output.stdout)?;
            if !output.success {
                eprint!("{}", output.stderr);
            }
        }
    }

    log::info!("#End main()");
    Ok(())
}
