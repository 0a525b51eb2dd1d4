//! chatmeter — send one chat request and print the reply with its estimated cost
//!
//! Usage:
//!   chatmeter [OPTIONS] <USER_MESSAGE>

use anyhow::{bail, Context};
use chatmeter::structured::ResponseFormat;
use chatmeter::{ChatClient, ChatOutcome, ClientConfig};
use std::path::PathBuf;

const DEFAULT_SYSTEM: &str = "You are a helpful assistant.";

struct Args {
    system: String,
    user: String,
    image: Option<PathBuf>,
    schema: Option<PathBuf>,
    json: bool,
    max_tokens: Option<u32>,
    model: Option<String>,
}

fn print_usage() {
    println!(
        r#"chatmeter — chat completion with cost accounting

USAGE:
    chatmeter [OPTIONS] <USER_MESSAGE>

OPTIONS:
    --system <text>         System message (default: "{DEFAULT_SYSTEM}")
    --image <path>          Attach an image inline
    --schema <path>         JSON schema file for structured output
    --json                  Ask for any JSON object
    --max-tokens <n>        Completion token limit (default 300, 0 for none)
    --model <id>            Model id (overrides CHATMETER_MODEL)
    help                    Show this help message

ENVIRONMENT:
    OPENAI_API_KEY          API key
    OPENAI_BASE_URL         API base URL
    CHATMETER_MODEL         Model id
    CHATMETER_PRICING_FILE  YAML pricing table
    RUST_LOG                Log filter (e.g. chatmeter=debug)"#
    );
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<Args>> {
    let mut parsed = Args {
        system: DEFAULT_SYSTEM.to_string(),
        user: String::new(),
        image: None,
        schema: None,
        json: false,
        max_tokens: None,
        model: None,
    };
    let mut user_parts = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{flag} expects a value"))
        };
        match arg.as_str() {
            "help" | "--help" | "-h" => return Ok(None),
            "--system" => parsed.system = value("--system")?,
            "--image" => parsed.image = Some(PathBuf::from(value("--image")?)),
            "--schema" => parsed.schema = Some(PathBuf::from(value("--schema")?)),
            "--json" => parsed.json = true,
            "--max-tokens" => {
                let raw = value("--max-tokens")?;
                parsed.max_tokens = Some(
                    raw.parse()
                        .with_context(|| format!("invalid --max-tokens: {raw}"))?,
                );
            }
            "--model" => parsed.model = Some(value("--model")?),
            other if other.starts_with("--") => bail!("Unknown option: {other}"),
            other => user_parts.push(other.to_string()),
        }
    }

    if user_parts.is_empty() {
        bail!("missing user message");
    }
    parsed.user = user_parts.join(" ");
    Ok(Some(parsed))
}

fn response_format(args: &Args) -> anyhow::Result<Option<ResponseFormat>> {
    if let Some(path) = &args.schema {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading schema {}", path.display()))?;
        let schema: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing schema {}", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("response")
            .to_string();
        return Ok(Some(ResponseFormat::from_schema(name, schema)));
    }
    Ok(args.json.then(ResponseFormat::json_object))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("warn".parse()?),
        )
        .with_target(false)
        .try_init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let mut config = ClientConfig::from_env();
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    let client = ChatClient::new(config).context("building chat client")?;

    let mut request = client.chat(args.system.as_str(), args.user.as_str());
    if let Some(image) = &args.image {
        request = request.image(image);
    }
    if let Some(format) = response_format(&args)? {
        request = request.response_format(format);
    }
    match args.max_tokens {
        Some(0) => request = request.no_completion_limit(),
        Some(n) => request = request.max_completion_tokens(n),
        None => {}
    }

    match request.send().await {
        ChatOutcome::Parsed(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        ChatOutcome::Refused(reason) => println!("Refused: {reason}"),
        ChatOutcome::Plain(Some(resp)) => println!("{}", resp.first_text().unwrap_or("")),
        ChatOutcome::Plain(None) => println!("(no response)"),
    }

    println!();
    client.print_total_costs();
    Ok(())
}
