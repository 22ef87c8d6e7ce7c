//! Fleet inventory resolution.

use tracing::{debug, info};

use super::{Ec2Client, FilterSpec};
use crate::error::{PauserError, Result};

impl Ec2Client {
    /// Resolve the target instance set for the given filter.
    ///
    /// The response is grouped by reservation; ids are flattened in the
    /// order received. Duplicates, should the API ever return any, are kept.
    pub async fn resolve_instances(&self, spec: &FilterSpec) -> Result<Vec<String>> {
        let mut request = self
            .client
            .describe_instances()
            .set_filters(Some(spec.to_filters()));

        if let Some(ids) = &spec.id_allowlist {
            request = request.set_instance_ids(Some(ids.clone()));
        }

        let response = request
            .send()
            .await
            .map_err(|e| PauserError::Describe(super::sdk_error_message(&e)))?;

        debug!(response = ?response, "DescribeInstances response");

        let mut instances = Vec::new();
        for reservation in response.reservations() {
            debug!(
                reservation_id = reservation.reservation_id().unwrap_or("unknown"),
                instance_count = reservation.instances().len(),
                "Flattening reservation"
            );

            for instance in reservation.instances() {
                if let Some(id) = instance.instance_id() {
                    debug!(instance_id = %id, "Resolved instance");
                    instances.push(id.to_string());
                }
            }
        }

        info!(
            region = %self.region,
            instance_count = instances.len(),
            "Resolved target instance set"
        );

        Ok(instances)
    }
}
