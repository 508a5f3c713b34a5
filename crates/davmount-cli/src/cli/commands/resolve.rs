//! `davmount resolve <location> [--remote]` – print the mount URI only.

use anyhow::Result;
use davmount_core::config::DavmountConfig;
use davmount_core::mount::GioMount;
use davmount_core::report::StderrReporter;
use davmount_core::viewer::NoViewer;
use davmount_core::{DocumentSource, MountRun};
use std::process::ExitCode;

pub async fn run_resolve(cfg: &DavmountConfig, location: &str, remote: bool) -> Result<ExitCode> {
    let source = DocumentSource::from_arg(location, remote);
    // Never invoked by resolve.
    let mounter = GioMount::new(cfg.mount.program.clone());
    let reporter = StderrReporter;

    let outcome = MountRun::new(&cfg.http, &mounter, &NoViewer, &reporter)
        .resolve(&source)
        .await;

    match outcome.result {
        Ok(target) => {
            println!("{}", target);
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
