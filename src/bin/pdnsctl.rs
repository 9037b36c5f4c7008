use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdns_client::{
    CallContext, Client, ClientConfig,
    zones::{ResourceRecordSet, SoaEditApi, ZoneBasicDataUpdate, ZoneFetchOptions},
};
use serde::Serialize;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// PowerDNS API URL (e.g. http://127.0.0.1:8081)
    #[arg(
        long,
        value_name = "URL",
        global = true,
        default_value = "http://127.0.0.1:8081"
    )]
    base_url: String,
    /// PowerDNS API key
    #[arg(long, value_name = "KEY", global = true)]
    api_key: Option<String>,
    /// PowerDNS server ID
    #[arg(long, value_name = "ID", global = true, default_value = "localhost")]
    server_id: String,
    /// Give up after this many seconds
    #[arg(long, value_name = "SECS", global = true, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Command {
    /// Wait until the API answers HTTP requests
    Wait,
    /// List servers
    Servers,
    /// List zones
    Zones,
    /// Show one zone
    Zone {
        zone: String,
        /// Leave record sets out of the response
        #[arg(long)]
        no_rrsets: bool,
        /// Only return record sets with this name
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        /// Only return record sets with this type (requires --name)
        #[arg(long = "type", value_name = "TYPE", requires = "name")]
        rrtype: Option<String>,
    },
    /// Print the zone in zone-file format
    Export { zone: String },
    /// Create or replace a record set
    Add {
        zone: String,
        name: String,
        rrtype: String,
        ttl: u32,
        #[arg(required = true)]
        contents: Vec<String>,
    },
    /// Delete a record set
    Remove {
        zone: String,
        name: String,
        rrtype: String,
    },
    /// Change the zone's SOA-EDIT-API policy
    SetSoaEditApi { zone: String, mode: SoaEditApiArg },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SoaEditApiArg {
    Default,
    Increase,
    Epoch,
    SoaEdit,
    SoaEditIncrease,
    Off,
}

impl From<SoaEditApiArg> for SoaEditApi {
    fn from(arg: SoaEditApiArg) -> Self {
        match arg {
            SoaEditApiArg::Default => SoaEditApi::Default,
            SoaEditApiArg::Increase => SoaEditApi::Increase,
            SoaEditApiArg::Epoch => SoaEditApi::Epoch,
            SoaEditApiArg::SoaEdit => SoaEditApi::SoaEdit,
            SoaEditApiArg::SoaEditIncrease => SoaEditApi::SoaEditIncrease,
            SoaEditApiArg::Off => SoaEditApi::Off,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let client = build_client(&cli)?;
    let ctx = CallContext::with_timeout(Duration::from_secs(cli.timeout_secs));

    let canceller = ctx.clone();
    tokio::spawn(async move {
        if shutdown_signal().await {
            canceller.cancel();
        }
    });

    run(&cli, &client, &ctx).await
}

fn build_client(cli: &Cli) -> Result<Client> {
    if cli.server_id.trim().is_empty() {
        bail!("--server-id cannot be empty");
    }
    let mut config = ClientConfig::new(&cli.base_url);
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key);
    }
    Client::new(config).with_context(|| format!("invalid PowerDNS settings for {}", cli.base_url))
}

async fn run(cli: &Cli, client: &Client, ctx: &CallContext) -> Result<()> {
    let server = cli.server_id.as_str();
    match &cli.command {
        Command::Wait => {
            client
                .wait_until_up(ctx)
                .await
                .with_context(|| format!("{} did not come up", cli.base_url))?;
        }
        Command::Servers => print_json(&client.servers().list_servers(ctx).await?)?,
        Command::Zones => print_json(&client.zones().list_zones(ctx, server).await?)?,
        Command::Zone {
            zone,
            no_rrsets,
            name,
            rrtype,
        } => {
            let options = ZoneFetchOptions::new(*no_rrsets, name.as_deref(), rrtype.as_deref())?;
            let fetched = client
                .zones()
                .get_zone(ctx, server, zone, &options)
                .await
                .with_context(|| format!("failed to fetch zone '{zone}'"))?;
            print_json(&fetched)?;
        }
        Command::Export { zone } => {
            let text = client
                .zones()
                .export_zone(ctx, server, zone)
                .await
                .with_context(|| format!("failed to export zone '{zone}'"))?;
            print!("{text}");
        }
        Command::Add {
            zone,
            name,
            rrtype,
            ttl,
            contents,
        } => {
            let rrset = ResourceRecordSet::new(name, rrtype, *ttl, contents.iter().cloned());
            client
                .zones()
                .add_record_set(ctx, server, zone, rrset)
                .await
                .with_context(|| format!("failed to replace {name}/{rrtype} in '{zone}'"))?;
            info!(zone = %zone, name = %name, rrtype = %rrtype, "record set replaced");
        }
        Command::Remove { zone, name, rrtype } => {
            client
                .zones()
                .remove_record_set(ctx, server, zone, name, rrtype)
                .await
                .with_context(|| format!("failed to delete {name}/{rrtype} from '{zone}'"))?;
            info!(zone = %zone, name = %name, rrtype = %rrtype, "record set deleted");
        }
        Command::SetSoaEditApi { zone, mode } => {
            let update = ZoneBasicDataUpdate::new().soa_edit_api((*mode).into());
            client
                .zones()
                .modify_basic_zone_data(ctx, server, zone, &update)
                .await
                .with_context(|| format!("failed to update zone '{zone}'"))?;
            info!(zone = %zone, mode = ?mode, "SOA-EDIT-API updated");
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn shutdown_signal() -> bool {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to install CTRL+C handler: {err}");
        return false;
    }
    info!("interrupt received, cancelling");
    true
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
