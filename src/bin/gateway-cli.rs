use ai_gateway::gateway::{Mode, API_KEY_HEADER};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Send notes to the AI gateway from the terminal", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Shared secret sent as x-api-key.
    #[arg(short, long, env = "GATEWAY_API_KEY", hide_env_values = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a note and print the reply
    Note {
        /// idea, todo or daily
        mode: Mode,
        /// Note text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Check that the deployment answers
    Health,
}

/// The reply text, if the gateway answered with a success envelope.
fn reply_of(status: reqwest::StatusCode, body: &Value) -> Option<&str> {
    if !status.is_success() {
        return None;
    }
    body.get("reply").and_then(Value::as_str)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Note { mode, text } => {
            let mut request = client
                .post(format!("{}/api/ai", base))
                .json(&json!({ "text": text.join(" "), "mode": mode }));
            if let Some(key) = &cli.key {
                request = request.header(API_KEY_HEADER, key);
            }

            let res = request.send().await?;
            let status = res.status();
            let body: Value = res.json().await?;

            match reply_of(status, &body) {
                Some(reply) => println!("{}", reply),
                None => {
                    eprintln!("Error: gateway returned status {}", status);
                    eprintln!("{}", serde_json::to_string_pretty(&body)?);
                    std::process::exit(1);
                }
            }
        }
        Commands::Health => {
            let res = client.get(format!("{}/api/test", base)).send().await?;
            let status = res.status();
            let json: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
            if !status.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
