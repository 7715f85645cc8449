use anyhow::Result;
use contracts_core::MetadataPublisher;
use contracts_enforcer::{EnforcementSources, Enforcer, EnforcerConfig, Evaluation, ExitStatus};
use contracts_parser::{JsonContractLoader, JsonPolicyLoader};
use std::io::Write;
use tracing::{error, info};

use crate::output;
use crate::sinks::{JsonFilePublisher, StdoutPublisher};

pub struct EnforceArgs<'a> {
    pub contract: &'a str,
    pub policy: &'a str,
    pub baseline: Option<&'a str>,
    pub report_dir: Option<&'a str>,
    pub format: &'a str,
    pub patch_sensitive: bool,
}

pub fn execute(args: EnforceArgs<'_>) -> Result<()> {
    info!("{}", "=".repeat(35));
    info!("Enforcing contract: {}", args.contract);
    info!("Policy: {}", args.policy);
    if let Some(baseline) = args.baseline {
        info!("Baseline contract: {}", baseline);
    }

    let enforcer = Enforcer::with_config(
        EnforcerConfig::new().with_patch_sensitive(args.patch_sensitive),
    );

    let evaluation = enforcer.evaluate_sources(
        &JsonContractLoader,
        &JsonPolicyLoader,
        EnforcementSources {
            contract: args.contract,
            baseline: args.baseline,
            policy: args.policy,
        },
    );

    let status = evaluation.exit_status;

    let mut sinks: Vec<Box<dyn MetadataPublisher>> =
        vec![Box::new(StdoutPublisher::new(args.format))];
    if let Some(dir) = args.report_dir {
        sinks.push(Box::new(JsonFilePublisher::new(dir)));
    }
    evaluation.publish_to(&sinks);

    if status == ExitStatus::Continue {
        if args.format != "json" {
            output::print_success("Pipeline may continue");
        }
        info!("Enforcement complete");
        info!("{}", "=".repeat(35));
        return Ok(());
    }

    terminate(&evaluation)
}

/// Logs why the pipeline stops and exits with the gate's code.
fn terminate(evaluation: &Evaluation) -> ! {
    let code = evaluation.exit_code();
    match &evaluation.error {
        Some(e) if e.is_load_failure() => error!("Enforcement inputs unavailable: {e}"),
        _ => error!(
            "Compatibility enforcement failed: {} ({})",
            evaluation.report.decision(),
            evaluation.report.impact_tier()
        ),
    }
    error!("Pipeline terminated before data processing");
    error!("Exit code: {}", code);
    info!("{}", "=".repeat(35));

    let _ = std::io::stdout().flush();
    std::process::exit(code)
}
