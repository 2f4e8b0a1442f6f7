use clap::Parser;
use serde::Serialize;

use tenant_edge::config::RoutingConfig;
use tenant_edge::routing::{RequestDescriptor, RouteOutcome, SubdomainRouter};

#[derive(Parser)]
#[command(name = "route-check")]
#[command(about = "Show how the edge would route a request", long_about = None)]
struct Cli {
    /// Host header, optionally with a port
    #[arg(long)]
    host: String,

    /// Request path
    #[arg(long, default_value = "/")]
    path: String,

    /// Root domain the edge is configured with
    #[arg(long, env = "ROOT_DOMAIN", default_value = "localhost:3000")]
    root_domain: String,

    /// Full request URL (defaults to http://<host><path>)
    #[arg(long)]
    url: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    host: &'a str,
    path: &'a str,
    url: &'a str,
    root_domain: &'a str,
    #[serde(flatten)]
    outcome: &'a RouteOutcome,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let routing = RoutingConfig {
        root_domain: cli.root_domain.clone(),
        ..RoutingConfig::default()
    };
    let router = SubdomainRouter::from_config(&routing);

    let url = cli
        .url
        .clone()
        .unwrap_or_else(|| format!("http://{}{}", cli.host, cli.path));
    let outcome = router.evaluate(&RequestDescriptor {
        url: &url,
        host_header: &cli.host,
        path: &cli.path,
    });

    let report = Report {
        host: &cli.host,
        path: &cli.path,
        url: &url,
        root_domain: &cli.root_domain,
        outcome: &outcome,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
