use clap::{Parser, Subcommand};

fn get_version() -> &'static str {
    // build.rs exports `git describe` output when building from a checkout;
    // release tarballs fall back to the crate version
    match option_env!("SEBPATCH_BUILD_INFO") {
        Some(describe) => describe,
        None => concat!("v", env!("CARGO_PKG_VERSION")),
    }
}

#[derive(Parser)]
#[command(name = "sebpatch")]
#[command(about = "A CLI patch manager for Safe Exam Browser installations")]
#[command(version = get_version(), propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Patch the installed SEB version
    Patch {
        /// Base SEB version to patch (e.g. '3.9.0'); detected if omitted
        #[arg(long)]
        base: Option<String>,

        /// Patch release tag to install (e.g. 'v3.9.0_abc123'); chosen
        /// interactively if omitted
        #[arg(long)]
        tag: Option<String>,

        /// Answer yes to every confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Restore the original SEB files, undoing a previous patch
    Unpatch {
        /// Answer yes to every confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Detect the installed SEB version from its file fingerprint
    Detect,

    /// List available patch releases for a base version
    List {
        /// Base SEB version (e.g. '3.8.0'); detected if omitted
        #[arg(long)]
        base: Option<String>,
    },

    /// Check for a newer build of this tool and install it
    SelfUpdate {
        /// Answer yes to every confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the current version
    Version,
}
