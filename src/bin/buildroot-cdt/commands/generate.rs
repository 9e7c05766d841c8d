//! `buildroot-cdt generate` command
//!
//! Prints every descriptor as one plug-in fragment, or as JSON.

use anyhow::{Context as _, Result};

use crate::cli::{Format, GenerateArgs};
use crate::commands::Context;
use buildroot_cdt::builder::{build_all, ToolchainDescriptors};
use buildroot_cdt::core::manifest::FsProbe;
use buildroot_cdt::emit::xml::{
    build_definitions_extension, launch_extensions, plugin_fragment, scanner_profile_extension,
    Element,
};
use buildroot_cdt::ops::scan;
use buildroot_cdt::util::fs::write_string;

pub fn execute(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let mut options = ctx.config.build_options();
    if args.no_autotools {
        options.autotools = false;
    }

    let scanned = scan(&ctx.manifest, &FsProbe);
    ctx.report_problems(&scanned.problems);

    let toolchains: Vec<ToolchainDescriptors> = scanned
        .installs
        .iter()
        .map(|install| build_all(install, options))
        .collect();

    let output = match args.format {
        Format::Xml => render_xml(&toolchains, ctx.config.launch_enabled())?,
        Format::Json => serde_json::to_string_pretty(&toolchains)
            .context("failed to serialize descriptors")?,
    };

    match args.output {
        Some(path) => {
            write_string(&path, &output)?;
            tracing::info!(
                "wrote {} toolchain(s) to {}",
                toolchains.len(),
                path.display()
            );
        }
        None => println!("{}", output.trim_end()),
    }

    Ok(())
}

fn render_xml(toolchains: &[ToolchainDescriptors], launch: bool) -> Result<String> {
    let mut extensions: Vec<Element> = Vec::new();

    for descriptors in toolchains {
        let toolchain = &descriptors.toolchain;
        extensions.push(build_definitions_extension(
            toolchain.id(),
            toolchain.name().unwrap_or_default(),
            descriptors.nodes(),
        ));
        extensions.extend(descriptors.scanner_profiles.iter().map(scanner_profile_extension));
        if launch {
            extensions.extend(launch_extensions(&descriptors.launch));
        }
    }

    plugin_fragment(extensions).context("failed to render plug-in fragment")
}
