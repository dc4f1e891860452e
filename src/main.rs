//! Host-side helper: `cargo run` builds the WASM bundle into `dist/pkg` and
//! serves `dist/` with every route mapped to `index.html`.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::PathBuf;

    use anyhow::{bail, Context, Result};
    use clap::Parser;
    use tokio::process::Command;

    use particle_landing::config::DEFAULT_PORT;
    use particle_landing::server::{self, ServerConfig};

    #[derive(Parser, Debug)]
    #[command(version, about = "Build and serve the animated landing page")]
    struct Cli {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Directory holding the site
        #[arg(long, default_value = "dist")]
        root: PathBuf,

        /// Document served for every route that is not a file
        #[arg(long, default_value = "index.html")]
        entry: String,

        /// Serve whatever is already built instead of running wasm-pack
        #[arg(long)]
        skip_wasm: bool,

        /// Increase verbosity (-v, -vv)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    }

    pub async fn main() -> Result<()> {
        let cli = Cli::parse();

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
            match cli.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            },
        ))
        .init();

        if cli.skip_wasm {
            log::info!("skipping wasm build; serving {}", cli.root.display());
        } else {
            build_wasm(&cli.root).await?;
        }

        if !cli.root.join(&cli.entry).is_file() {
            log::warn!(
                "{} has no {}; every request will 404",
                cli.root.display(),
                cli.entry
            );
        }

        log::info!(
            "PORT environment variable: {}",
            if std::env::var_os("PORT").is_some() { "SET" } else { "using default" }
        );
        server::serve(ServerConfig {
            port: cli.port,
            root: cli.root,
            entry: cli.entry,
        })
        .await
        .with_context(|| format!("serving on port {}", cli.port))
    }

    async fn build_wasm(root: &std::path::Path) -> Result<()> {
        let out_dir = root.join("pkg");
        log::info!("Building WASM pkg into {} …", out_dir.display());
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir"])
            .arg(&out_dir)
            .status()
            .await
        {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => bail!("wasm-pack finished with {status}"),
            Err(_) => {
                log::warn!(
                    "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); \
                     the site may serve stale artifacts"
                );
                Ok(())
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    host::main().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
