use tokio_compat::runtime;

use std::env;
use std::process;

use rusoto_core::Region;

use clap::{App, Arg, ArgMatches};
use tracing::{error, info};

mod config;
mod error;
mod key_resolver;
mod mechanism;
mod probe;
mod scratch;
mod table;
mod uploader;
mod utils;

use config::ProbeConfig;
use error::Error;
use mechanism::Mechanism;

fn args() -> ArgMatches<'static> {
    App::new("s3probe")
        .about("Uploads a generated demo CSV to S3 through three mechanisms")
        .arg(
            Arg::with_name("tolerate")
                .short("t")
                .long("tolerate")
                .value_name("MECHANISM")
                .help("Mechanisms whose upload failure does not fail the run (boto3, s3hook, pandas)")
                .takes_value(true)
                .multiple(true)
                .use_delimiter(true),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Fail the run on any mechanism failure")
                .conflicts_with("tolerate"),
        )
        .get_matches()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "s3probe=info".into()),
        )
        .init();

    let aws_region = if let Ok(endpoint) = env::var("S3_ENDPOINT") {
        let region = Region::Custom {
            name: "us-east-1".to_owned(),
            endpoint,
        };
        info!(
            "picked up non-standard endpoint {:?} from S3_ENDPOINT env. variable",
            region
        );
        region
    } else {
        Region::default()
    };

    let matches = args();

    // Fail before any side effect when the destination is not configured.
    let config = match ProbeConfig::from_env(tolerated_mechanisms(&matches)) {
        Ok(config) => config,
        Err(e) => {
            error!("refusing to run without a destination: {}", e);
            process::exit(2);
        }
    };

    let mut rt = runtime::Builder::default()
        .core_threads(2)
        .build()
        .expect("failed to create Runtime");

    let s3_client = rusoto_s3::S3Client::new(aws_region);
    let prober = probe::ProbeExecutor::new(s3_client);
    let report = match rt.block_on_std(prober.execute(&config)) {
        Ok(report) => report,
        Err(e) => {
            error!("run aborted: {}", e);
            process::exit(1);
        }
    };

    for outcome in report.fatal_failures(&config.tolerated) {
        if let Err(ref e) = outcome.result {
            error!(
                "{} upload of {} failed: {}",
                outcome.mechanism, report.filename, e
            );
        }
    }
    if !report.passed(&config.tolerated) {
        process::exit(1);
    }

    let tolerated_failures = report.failures().count();
    if tolerated_failures > 0 {
        info!(
            "run passed with {} tolerated failure(s) for {}",
            tolerated_failures, report.filename
        );
    } else {
        info!("all upload paths verified for {}", report.filename);
    }
}

fn tolerated_mechanisms(matches: &ArgMatches) -> Vec<Mechanism> {
    if matches.is_present("strict") {
        return Vec::new();
    }
    match matches.values_of("tolerate") {
        Some(values) => values
            .map(|v| v.parse().expect("unrecognized mechanism"))
            .collect(),
        None => vec![Mechanism::Boto3, Mechanism::S3Hook],
    }
}
