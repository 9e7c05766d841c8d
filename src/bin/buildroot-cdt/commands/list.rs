//! `buildroot-cdt list` command

use anyhow::Result;

use crate::cli::ListArgs;
use crate::commands::Context;
use buildroot_cdt::core::manifest::FsProbe;
use buildroot_cdt::ops::scan;

pub fn execute(args: ListArgs, ctx: &Context) -> Result<()> {
    let scanned = scan(&ctx.manifest, &FsProbe);

    if args.all {
        ctx.report_problems(&scanned.problems);
    } else {
        let fatal: Vec<_> = scanned
            .problems
            .into_iter()
            .filter(|p| !p.is_line_level())
            .collect();
        ctx.report_problems(&fatal);
    }

    if scanned.installs.is_empty() {
        println!("No toolchains found in {}", ctx.manifest.display());
        return Ok(());
    }

    for install in &scanned.installs {
        let languages = if install.has_cxx { "c, c++" } else { "c" };
        println!(
            "{:<10} {:<28} {} [{}]",
            install.architecture(),
            install.prefix(),
            install.install_path(),
            languages
        );
    }

    Ok(())
}
