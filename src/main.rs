use anyhow::Result;
use clap::Parser;

use wt_package::cleanup::{Confirm, Preset, Prompt};
use wt_package::cli::orchestration::{self, PipelineArgs};
use wt_package::process::SystemRunner;
use wt_package::ui;

#[derive(clap::Parser)]
#[command(
    name = "wt-package",
    version,
    about = "Build, shrink and package the wt binary for distribution"
)]
struct Args {
    #[arg(help = "Target platform (linux or darwin); defaults to the host")]
    platform: Option<String>,

    #[arg(short, long, help = "Custom packager configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        conflicts_with = "no_cleanup",
        help = "Remove build outputs after packaging without asking"
    )]
    yes: bool,

    #[arg(long, help = "Keep build outputs without asking")]
    no_cleanup: bool,
}

impl Args {
    /// Without a flag, ask only when someone is at the terminal.
    fn cleanup_decision(&self) -> Box<dyn Confirm> {
        if self.yes {
            Box::new(Preset(true))
        } else if self.no_cleanup || !console::user_attended() {
            Box::new(Preset(false))
        } else {
            Box::new(Prompt)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let confirm = args.cleanup_decision();

    let pipeline_args = PipelineArgs {
        root: std::env::current_dir()?,
        config_path: args.config,
        platform: args.platform,
    };

    if let Err(e) = orchestration::run_pipeline(pipeline_args, &SystemRunner, &*confirm) {
        ui::display_error(&orchestration::describe_failure(&e));
        std::process::exit(e.exit_code());
    }

    Ok(())
}
