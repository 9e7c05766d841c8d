//! `buildroot-cdt env` command
//!
//! Prints shell exports for building with one toolchain:
//!
//! ```bash
//! eval "$(buildroot-cdt env /opt/br/arm)"
//! ```

use anyhow::{bail, Result};

use crate::cli::EnvArgs;
use crate::commands::Context;
use buildroot_cdt::builder::build_environment;
use buildroot_cdt::core::manifest::FsProbe;
use buildroot_cdt::ops::scan;

pub fn execute(args: EnvArgs, ctx: &Context) -> Result<()> {
    let wanted = args.path.trim_end_matches('/');
    let scanned = scan(&ctx.manifest, &FsProbe);

    let Some(install) = scanned
        .installs
        .iter()
        .find(|i| i.install_path().trim_end_matches('/') == wanted)
    else {
        ctx.report_problems(&scanned.problems);
        bail!(
            "no usable toolchain at {} in {}",
            args.path,
            ctx.manifest.display()
        );
    };

    for var in build_environment(&install.entry, &FsProbe) {
        println!("{}", var);
    }

    Ok(())
}
