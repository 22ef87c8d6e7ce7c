//! Pause and resume non-ephemeral EC2 fleets by tag.
//!
//! The pipeline is a single synchronous call sequence: build a tag filter,
//! flatten the DescribeInstances response into an instance-id list, then
//! issue the bulk start/stop call behind a dry-run permission probe.

pub mod config;
pub mod ec2;
pub mod error;
