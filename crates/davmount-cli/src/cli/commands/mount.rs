//! `davmount mount <location> [--remote]` – mount a manifest's share and open its target.

use anyhow::Result;
use davmount_core::config::DavmountConfig;
use davmount_core::mount::GioMount;
use davmount_core::report::StderrReporter;
use davmount_core::viewer::{CommandViewer, NoViewer, Viewer};
use davmount_core::{DocumentSource, MountRun};
use std::io::IsTerminal;
use std::process::ExitCode;

pub async fn run_mount(
    cfg: &DavmountConfig,
    location: &str,
    remote: bool,
    no_open: bool,
) -> Result<ExitCode> {
    let source = DocumentSource::from_arg(location, remote);
    let mounter = GioMount::new(cfg.mount.program.clone());
    let viewer: Box<dyn Viewer> = if cfg.viewer.enabled && !no_open {
        Box::new(CommandViewer::new(cfg.viewer.program.clone()))
    } else {
        Box::new(NoViewer)
    };
    let reporter = StderrReporter;

    let outcome = MountRun::new(&cfg.http, &mounter, viewer.as_ref(), &reporter)
        .interactive(std::io::stdin().is_terminal())
        .run(&source)
        .await;

    match outcome.result {
        Ok(target) => {
            println!("Mounted {}", target);
            Ok(ExitCode::SUCCESS)
        }
        // Already reported.
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
