use anyhow::Result;
use clap::Parser;

use get_plugin_ref::cli::orchestration::{run_resolve_workflow, ResolveWorkflowArgs};
use get_plugin_ref::cli::init_logging;
use get_plugin_ref::resolver::ResolveRequest;
use get_plugin_ref::ui;

#[derive(clap::Parser)]
#[command(
    name = "get-plugin-ref",
    version,
    about = "Print the git reference of the plugin branch matching a core version",
    after_help = "Prints refs/heads/core_<CORE_VERSION>/<plugin version> when a release branch \
exists, otherwise refs/heads/<default branch>.\n\
All four positional arguments are required; a missing one is a usage error (exit status 2)."
)]
struct Args {
    /// Name of the GitHub organization
    org_name: String,

    /// Name of the plugin repository
    repo_name: String,

    /// Core version to match
    core_version: String,

    /// Personal access token with at least repo permissions
    access_token: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "GitHub API base URL (overrides the config file)")]
    api_url: Option<String>,

    #[arg(short, long, help = "Log lookups to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.verbose {
        ui::display_status(&format!(
            "Resolving {}/{} for core {}",
            args.org_name, args.repo_name, args.core_version
        ));
    }

    let workflow_args = ResolveWorkflowArgs {
        config_path: args.config,
        api_url: args.api_url,
        request: ResolveRequest {
            org: args.org_name,
            repo: args.repo_name,
            core_version: args.core_version,
            access_token: args.access_token,
        },
    };

    match run_resolve_workflow(&workflow_args) {
        Ok(git_ref) => {
            ui::display_ref(&git_ref);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!(
                "Failed to resolve plugin ref for {}/{}: {}",
                workflow_args.request.org, workflow_args.request.repo, e
            ));
            std::process::exit(1);
        }
    }
}
