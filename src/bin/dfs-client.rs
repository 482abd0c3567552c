use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use dfs_client::{ClientConfig, DfsClient, FilePayload, UploadOutcome};

#[derive(Parser, Debug)]
#[clap(name = "dfs-client")]
#[clap(about = "Upload, download and mirror files in the distributed file store", long_about = None)]
struct Cli {
    /// Owner recorded against files; defaults to the OS user name.
    #[clap(long, global = true)]
    owner: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a single file
    Upload {
        file: PathBuf,
        #[clap(long, default_value = "/upload")]
        target_dir: String,
    },
    /// Download a file by name into the configured download directory
    Download { filename: String },
    /// List the files under a remote directory
    List {
        #[clap(default_value = "/upload")]
        directory: String,
    },
    /// Mirror a local directory tree into a remote directory
    Mirror {
        local_root: PathBuf,
        target_dir: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let owner = cli.owner.unwrap_or_else(whoami::username);
    let client = DfsClient::new(ClientConfig::from_env()?)?;

    match cli.command {
        Command::Upload { file, target_dir } => {
            let payload = FilePayload::from_path(&file)?;
            match client.upload_file(&owner, &target_dir, payload).await? {
                UploadOutcome::Stored(ack) => println!("{}", ack),
                UploadOutcome::AlreadyExists => {
                    println!("File already exists at the given location.")
                }
            }
        }
        Command::Download { filename } => {
            let path = client.download_file(&filename).await?;
            println!("File saved successfully: {}", path.display());
        }
        Command::List { directory } => {
            for entry in client.list_files(&owner, &directory).await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.name, entry.size, entry.owner, entry.directory
                );
            }
        }
        Command::Mirror {
            local_root,
            target_dir,
        } => {
            let report = client
                .mirror_directory(&owner, &local_root, &target_dir)
                .await?;
            println!(
                "mirrored {}: {} stored, {} already present, {} failed",
                local_root.display(),
                report.stored(),
                report.already_present(),
                report.failed()
            );
            for outcome in report.failures() {
                if let Err(e) = &outcome.result {
                    eprintln!("  {}: {}", outcome.path.display(), e);
                }
            }
            if report.failed() > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
