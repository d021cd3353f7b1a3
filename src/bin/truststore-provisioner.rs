//! CloudFormation custom resource that provisions the mTLS trust store.

use anyhow::{anyhow, Context};
use clap::Parser;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

use mtls_gateway_functions::provisioner::{
    CallbackClient, CompletionReport, Provisioner, ProvisionerConfig, ProvisioningEvent,
    S3ObjectStore,
};
use mtls_gateway_functions::telemetry;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "truststore-provisioner")]
#[command(about = "Uploads or deletes the mTLS trust store object for CloudFormation")]
struct Args {
    /// Trust store file bundled with the function
    #[arg(long, default_value = "truststore.pem", env = "TRUSTSTORE_PATH")]
    truststore_path: PathBuf,

    /// Timeout for the completion callback, in seconds
    #[arg(long, default_value_t = 10, env = "CALLBACK_TIMEOUT_SECS")]
    callback_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, env = "VERBOSE")]
    verbose: bool,
}

async fn handler(
    provisioner: &Provisioner<S3ObjectStore>,
    event: LambdaEvent<ProvisioningEvent>,
) -> Result<CompletionReport, Error> {
    let (event, context) = event.into_parts();

    provisioner
        .handle(&event, &context.env_config.log_stream)
        .await
        .map_err(|e| {
            error!(
                request_id = %event.request_id,
                logical_resource_id = %event.logical_resource_id,
                error = %e,
                "Custom resource handler failed"
            );
            Error::from(e)
        })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();
    telemetry::init(env!("CARGO_CRATE_NAME"), args.verbose);

    info!("Starting trust store provisioner");

    let config = ProvisionerConfig {
        truststore_path: args.truststore_path,
        callback_timeout_secs: args.callback_timeout_secs,
    };
    config.validate().map_err(|e| anyhow!(e))?;

    info!(
        truststore_path = ?config.truststore_path,
        callback_timeout_secs = config.callback_timeout_secs,
        "Configuration loaded"
    );

    let callback = CallbackClient::new(Duration::from_secs(config.callback_timeout_secs))
        .context("Failed to create HTTP client")?;
    let store = S3ObjectStore::from_env().await;
    let provisioner = Provisioner::new(&config, store, callback);

    let provisioner = &provisioner;
    run(service_fn(move |event| async move { handler(provisioner, event).await })).await
}
