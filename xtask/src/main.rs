use clap::Parser;
use std::path::Path;
use tokio::process::Command;

mod cli;

const BUNDLE_DIR: &str = "playground";

async fn run(cmd: &mut Command) -> Result<(), Box<dyn std::error::Error>> {
    let status = cmd.spawn()?.wait().await?;
    if !status.success() {
        return Err(format!("{:?} exited with {}", cmd.as_std(), status).into());
    }
    Ok(())
}

async fn build_frontend(release: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new("trunk");
    cmd.current_dir(std::fs::canonicalize("frontend")?).arg("build");
    if release {
        cmd.arg("--release");
    }
    run(&mut cmd).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Launch { launcher_args } => {
            build_frontend(false).await?;
            let mut cmd = Command::new("cargo");
            cmd.args(["run", "--package", "playground-launcher", "--"])
                .args(["--dist-dir", "frontend/dist"])
                .args(launcher_args);
            run(&mut cmd).await
        }
        cli::Command::Dist { target_triple } => {
            let mut cmd = Command::new("cargo");
            cmd.args(["build", "--package", "playground-launcher", "--release"]);
            let binary = match &target_triple {
                Some(triple) => {
                    cmd.arg("--target").arg(triple);
                    format!("target/{triple}/release/playground-launcher")
                }
                None => "target/release/playground-launcher".to_string(),
            };
            run(&mut cmd).await?;
            build_frontend(true).await?;

            let dist = Path::new(BUNDLE_DIR).join("dist");
            tokio::fs::create_dir_all(&dist).await?;
            tokio::fs::copy(&binary, Path::new(BUNDLE_DIR).join("playground-launcher")).await?;

            let mut entries = tokio::fs::read_dir("frontend/dist").await?;
            while let Some(entry) = entries.next_entry().await? {
                if entry.file_type().await?.is_file() {
                    tokio::fs::copy(entry.path(), dist.join(entry.file_name())).await?;
                }
            }
            Ok(())
        }
    }
}
