//! API Gateway request authorizer for mTLS clients.

use clap::Parser;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::{info, warn};

use mtls_gateway_functions::authorizer::{authorize, AuthDecision, AuthorizerRequest};
use mtls_gateway_functions::telemetry;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "cert-authorizer")]
#[command(about = "Client-certificate authorizer for an mTLS API Gateway")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, env = "VERBOSE")]
    verbose: bool,
}

async fn handler(event: LambdaEvent<AuthorizerRequest>) -> Result<AuthDecision, Error> {
    let (request, context) = event.into_parts();

    authorize(&request).map_err(|e| {
        warn!(request_id = %context.request_id, error = %e, "Authorization failed");
        Error::from(e)
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();
    telemetry::init(env!("CARGO_CRATE_NAME"), args.verbose);

    info!("Starting cert authorizer");
    run(service_fn(handler)).await
}
