use std::net::IpAddr;

use splinekit::server;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about="splinekit-server: web server for splinekit imports", long_about=None)] // Read from Cargo.toml
struct Arguments {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    address: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3003")]
    port: u16,
}

#[tokio::main]
async fn main() -> splinekit::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Arguments::parse();
    let address = if args.address.is_ipv6() {
        format!("[{}]:{}", args.address, args.port)
    } else {
        format!("{}:{}", args.address, args.port)
    };

    server::start_server(Some(&address)).await
}
