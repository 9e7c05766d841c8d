//! `buildroot-cdt register` command

use anyhow::Result;

use crate::cli::RegisterArgs;
use crate::commands::Context;
use buildroot_cdt::ops::{discover, DirectoryRegistrar, DiscoveryOptions};

pub fn execute(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let mut options = DiscoveryOptions::from_config(&ctx.config, ctx.manifest.clone());
    if args.no_autotools {
        options.build.autotools = false;
    }
    if args.no_launch {
        options.launch = false;
    }

    let mut registrar = DirectoryRegistrar::new(&args.out);
    let report = discover(&options, &mut registrar);

    ctx.report_problems(&report.problems);

    for path in &report.gdbinit_created {
        println!("Created {}", path.display());
    }
    println!(
        "Registered {} fragment(s) for {} toolchain(s) in {}",
        report.registered.len(),
        report.toolchains.len(),
        registrar.dir().display()
    );

    Ok(())
}
