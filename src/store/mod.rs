//! Persistent state kept between commands

mod deployments;

pub use deployments::DeploymentRecord;
