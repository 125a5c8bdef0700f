// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "xr-walkthrough")]
#[command(about = "Headless driver for the VR exhibition walkthrough", long_about = None)]
pub struct Cli {
    /// Scene layout (JSON); the built-in exhibition room when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Scripted input (JSON); holds select on controller 0 when omitted
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Frames to simulate for the built-in walk
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Seconds per frame for the built-in walk
    #[arg(long, default_value_t = 1.0 / 72.0)]
    pub dt: f32,

    /// Write the per-frame trace to this file
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Print the scene layout as JSON and exit
    #[arg(long = "dump-scene", default_value = "false")]
    pub dump_scene: bool,

    /// Take frame times from the wall clock instead of the script's dt
    #[arg(long, default_value = "false")]
    pub realtime: bool,

    /// Skip the end-of-run summary; log output still follows RUST_LOG
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quiet_only_mentions_the_summary() {
        let cmd = Cli::command();
        let quiet = cmd.get_arguments().find(|a| a.get_id() == "quiet").unwrap();
        let help = quiet.get_help().unwrap().to_string();
        assert!(help.contains("summary"));
        assert!(!help.contains("Disable console output"));

        let cli = Cli::try_parse_from(["xr-walkthrough", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.frames, 600);
    }
}
