//! Bulk start/stop execution with a dry-run permission probe.

use std::fmt;

use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::types::{InstanceState, InstanceStateChange};
use colored::Colorize;
use tracing::{debug, info};

use super::Ec2Client;
use crate::error::{PauserError, Result};

/// Error code AWS returns when a dry run would have succeeded.
const DRY_RUN_AUTHORIZED: &str = "DryRunOperation";

/// Bulk lifecycle action to apply to the resolved fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    /// Subcommand-style name.
    pub fn name(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }

    /// Progressive verb used in the success summary.
    pub fn verb(self) -> &'static str {
        match self {
            Action::Start => "starting",
            Action::Stop => "stopping",
        }
    }

    /// EC2 API operation name.
    pub fn api_action(self) -> &'static str {
        match self {
            Action::Start => "StartInstances",
            Action::Stop => "StopInstances",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized failure from a bulk action call.
struct ActionFailure {
    code: Option<String>,
    message: String,
}

impl ActionFailure {
    fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: fmt::Debug,
    {
        Self {
            code: err.code().map(str::to_string),
            message: super::sdk_error_message(&err),
        }
    }
}

impl Ec2Client {
    /// Apply the action to the instance set: a dry-run permission probe
    /// first, then the identical call with dry-run cleared.
    ///
    /// The probe must fail with the `DryRunOperation` signal; any other
    /// outcome, including an unexpected success, aborts before the commit.
    pub async fn execute(
        &self,
        action: Action,
        instance_ids: &[String],
        verbose: bool,
    ) -> Result<()> {
        if instance_ids.is_empty() {
            println!("{}", "No instances found".yellow());
            return Ok(());
        }

        debug!(
            action = action.name(),
            instance_count = instance_ids.len(),
            "Issuing dry-run permission probe"
        );

        match self.send_action(action, instance_ids, true).await {
            Err(probe) if probe.code.as_deref() == Some(DRY_RUN_AUTHORIZED) => {
                debug!(
                    api_action = action.api_action(),
                    "Dry run authorized, committing"
                );
            }
            Err(probe) => return Err(PauserError::DryRunRejected(probe.message)),
            Ok(_) => {
                return Err(PauserError::DryRunRejected(format!(
                    "{} dry run succeeded without the {} signal",
                    action.api_action(),
                    DRY_RUN_AUTHORIZED
                )));
            }
        }

        let changes = self
            .send_action(action, instance_ids, false)
            .await
            .map_err(|failure| PauserError::ActionFailed {
                action: action.api_action(),
                message: failure.message,
            })?;

        info!(
            region = %self.region,
            action = action.name(),
            instance_count = instance_ids.len(),
            "Bulk action committed"
        );

        if verbose {
            println!("{}", "Success:".green().bold());
            for change in &changes {
                println!(
                    "  {}: {} -> {}",
                    change.instance_id().unwrap_or("unknown").bright_cyan(),
                    state_name(change.previous_state()),
                    state_name(change.current_state()),
                );
            }
        } else {
            println!(
                "{} {} {} instance(s)",
                "Success:".green().bold(),
                action.verb(),
                instance_ids.len()
            );
        }

        Ok(())
    }

    /// Issue the bulk call for the action kind, normalizing the shared
    /// result and error shapes.
    async fn send_action(
        &self,
        action: Action,
        instance_ids: &[String],
        dry_run: bool,
    ) -> std::result::Result<Vec<InstanceStateChange>, ActionFailure> {
        match action {
            Action::Stop => self
                .client
                .stop_instances()
                .set_instance_ids(Some(instance_ids.to_vec()))
                .dry_run(dry_run)
                .send()
                .await
                .map(|output| output.stopping_instances.unwrap_or_default())
                .map_err(ActionFailure::from_sdk),
            Action::Start => self
                .client
                .start_instances()
                .set_instance_ids(Some(instance_ids.to_vec()))
                .dry_run(dry_run)
                .send()
                .await
                .map(|output| output.starting_instances.unwrap_or_default())
                .map_err(ActionFailure::from_sdk),
        }
    }
}

fn state_name(state: Option<&InstanceState>) -> &str {
    state
        .and_then(|s| s.name())
        .map(|n| n.as_str())
        .unwrap_or("unknown")
}
