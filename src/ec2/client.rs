//! AWS EC2 SDK client wrapper.

use aws_config::BehaviorVersion;
use aws_sdk_ec2::Client;
use tracing::{debug, info};

use crate::error::{PauserError, Result};

/// EC2 client wrapper bound to a credential profile and region.
pub struct Ec2Client {
    pub(super) client: Client,
    pub(super) region: String,
}

impl Ec2Client {
    /// Create a new EC2 client for the given profile and optional region.
    ///
    /// Region resolution priority:
    /// 1. Explicit region (--region CLI arg or AWS_REGION env var)
    /// 2. AWS SDK defaults (environment variables, ~/.aws/config, IMDS)
    pub async fn new(profile: &str, region: Option<&str>) -> Result<Self> {
        debug!(profile = %profile, "Initializing AWS SDK configuration");

        let mut config_loader =
            aws_config::defaults(BehaviorVersion::latest()).profile_name(profile);

        if let Some(region) = region {
            debug!(region = %region, "Using explicit AWS region");
            config_loader = config_loader.region(aws_config::Region::new(region.to_string()));
        }

        let config = config_loader.load().await;
        let region_name = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let client = Client::new(&config);

        info!(
            profile = %profile,
            region = %region_name,
            "AWS EC2 client initialized"
        );

        Ok(Self {
            client,
            region: region_name,
        })
    }

    /// Wrap an existing SDK client. Lets tests inject a stub transport.
    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Probe EC2 API connectivity with a DescribeRegions call so credential
    /// problems surface before any mutating traffic.
    pub async fn verify_session(&self) -> Result<()> {
        debug!(region = %self.region, "Verifying AWS session");

        self.client
            .describe_regions()
            .send()
            .await
            .map_err(|e| PauserError::Session(super::sdk_error_message(&e)))?;

        debug!(region = %self.region, "AWS session verified");
        Ok(())
    }
}
