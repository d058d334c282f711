//! steptrace CLI — run the trace server, or open, step and close traces
//! on a running server from the shell.

use clap::{Parser, Subcommand};

use steptrace_cli::commands::{self, trace::TraceClient};

/// steptrace — ad-hoc timing traces across processes
#[derive(Parser)]
#[command(name = "steptrace", version, about = "steptrace — ad-hoc timing traces across processes")]
pub struct Cli {
    /// Base URL of the steptrace server used by client commands
    #[arg(long, env = "STEPTRACE_URL", default_value = "http://127.0.0.1:3210", global = true)]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the steptrace HTTP server
    Server {
        /// Host to bind to
        #[arg(long, env = "STEPTRACE_HOST", default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, env = "STEPTRACE_PORT", default_value_t = 3210)]
        port: u16,
    },

    /// Open a trace (replaces a live trace with the same tag and id)
    Start {
        tag: String,
        #[arg(long)]
        trace_id: Option<String>,
    },

    /// Record a step on a live trace
    Step {
        tag: String,
        step_name: String,
        #[arg(long)]
        trace_id: Option<String>,
        /// Also end the trace at this step
        #[arg(long)]
        end: bool,
    },

    /// End a live trace and print its timing breakdown
    End {
        tag: String,
        #[arg(long)]
        trace_id: Option<String>,
    },

    /// List retained traces for a tag
    List { tag: String },

    /// Delete all retained traces for a tag
    Delete { tag: String },

    /// Send a raw JSON-RPC request
    Rpc {
        /// JSON-RPC method name (e.g. "tracing.list")
        #[arg(long)]
        method: String,
        /// JSON-RPC params as a JSON string
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = TraceClient::new(&cli.url);

    let result = match cli.command {
        Commands::Server { host, port } => commands::server::run(host, port).await,
        Commands::Start { tag, trace_id } => {
            commands::trace::start(&client, &tag, trace_id.as_deref())
                .await
                .map(|v| commands::print_json(&v))
        }
        Commands::Step {
            tag,
            step_name,
            trace_id,
            end,
        } => commands::trace::step(&client, &tag, trace_id.as_deref(), &step_name, end)
            .await
            .map(|v| commands::print_json(&v)),
        Commands::End { tag, trace_id } => {
            commands::trace::end(&client, &tag, trace_id.as_deref())
                .await
                .map(|v| commands::print_json(&v))
        }
        Commands::List { tag } => commands::trace::list(&client, &tag)
            .await
            .map(|v| commands::print_json(&v)),
        Commands::Delete { tag } => commands::trace::delete(&client, &tag)
            .await
            .map(|v| commands::print_json(&v)),
        Commands::Rpc { method, params } => commands::trace::rpc(&client, &method, &params)
            .await
            .map(|v| commands::print_json(&v)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
