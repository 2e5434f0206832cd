// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use faros::{
    crd::GitTrackObject,
    dry_run::{describe_gvk, DryRunVerifier},
    metrics,
    reconcilers::{StatusOptions, StatusReconciler},
    status_reasons::ConditionReason,
};
use kube::{core::GroupVersionKind, Api, Client, Config};
use tracing::{debug, error, info, warn};

/// Operate on `GitTrackObject` resources and cluster dry-run support
#[derive(Debug, Parser)]
#[command(name = "faros", version, about)]
struct Cli {
    /// Print Prometheus metrics gathered during the run before exiting
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether a Group/Version/Kind supports server-side dry-run
    DryRun {
        /// API group, empty for the core group
        #[arg(long, default_value = "")]
        group: String,
        /// API version
        #[arg(long)]
        version: String,
        /// Kind
        #[arg(long)]
        kind: String,
    },
    /// Recompute and persist the status of a `GitTrackObject`
    Status {
        /// Namespace of the `GitTrackObject`
        #[arg(long, default_value = "default")]
        namespace: String,
        /// Name of the `GitTrackObject`
        #[arg(long)]
        name: String,
        /// Error applying the child object, marks the object out of sync
        #[arg(long)]
        error: Option<String>,
        /// Condition reason code
        #[arg(long, default_value_t = ConditionReason::ChildAppliedSuccess)]
        reason: ConditionReason,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("faros")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (json or text)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    // kube's rustls transport needs a process-wide crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider already installed");
    }

    debug!("Inferring Kubernetes configuration");
    let config = Config::infer()
        .await
        .context("failed to load Kubernetes configuration")?;

    let result = match cli.command {
        Command::DryRun {
            group,
            version,
            kind,
        } => run_dry_run(&config, GroupVersionKind::gvk(&group, &version, &kind)).await,
        Command::Status {
            namespace,
            name,
            error,
            reason,
        } => {
            let opts = match error {
                Some(err) => StatusOptions::new().with_error(reason, err),
                None => StatusOptions::new().with_reason(reason),
            };
            run_status(config, &namespace, &name, &opts).await
        }
    };

    if cli.print_metrics {
        match metrics::gather_metrics() {
            Ok(text) => print!("{text}"),
            Err(e) => error!("Failed to gather metrics: {}", e),
        }
    }

    result
}

/// Report whether `gvk` supports dry-run. Unsupported kinds are not a failure.
async fn run_dry_run(config: &Config, gvk: GroupVersionKind) -> Result<()> {
    let verifier = DryRunVerifier::try_from_config(config)?;

    match verifier.has_support(&gvk).await {
        Ok(()) => {
            info!("{} supports dry-run", describe_gvk(&gvk));
            println!("supported");
            Ok(())
        }
        Err(e) if e.is_unsupported() => {
            info!("{}", e);
            println!("unsupported");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_status(
    config: Config,
    namespace: &str,
    name: &str,
    opts: &StatusOptions,
) -> Result<()> {
    let client = Client::try_from(config).context("failed to create Kubernetes client")?;
    let api: Api<GitTrackObject> = Api::namespaced(client.clone(), namespace);

    let gto = api
        .get(name)
        .await
        .with_context(|| format!("failed to get GitTrackObject {namespace}/{name}"))?;

    let reconciler = StatusReconciler::for_client(client);
    if reconciler.reconcile(&gto, opts).await? {
        println!("updated");
    } else {
        println!("unchanged");
    }
    Ok(())
}
