//! CLI entry point for gpt3.

mod cli;

use clap::Parser;
use gpt3::config::load_config;
use gpt3::error::ClientError;
use gpt3::interview::InterviewArgs;
use gpt3::types::{
    ChatCompletionRequest, ChatMessage, CompletionRequest, EditsRequest, SearchRequest,
};
use gpt3::ApiClient;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Env var holding the log filter directive.
const LOG_ENV: &str = "GPT3_LOG";

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_logging();

    // Load config.
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(engine) = &args.engine {
        config.default_engine = engine.clone();
    }

    let client = ApiClient::new(&config);
    if let Err(e) = run(&client, args.command).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(client: &ApiClient, command: cli::Command) -> Result<(), ClientError> {
    match command {
        cli::Command::Engines => {
            let engines = client.engines().await?;
            for engine in engines.data {
                let ready = if engine.ready { "ready" } else { "not ready" };
                println!("{}\t{}\t{ready}", engine.id, engine.owner);
            }
        }
        cli::Command::Engine { id } => {
            let engine = client.engine(&id).await?;
            println!("id: {}", engine.id);
            println!("owner: {}", engine.owner);
            println!("ready: {}", engine.ready);
        }
        cli::Command::Complete {
            prompt,
            max_tokens,
            temperature,
            stop,
            stream,
        } => {
            let request = CompletionRequest {
                max_tokens,
                temperature,
                stop,
                ..CompletionRequest::new(prompt)
            };
            if stream {
                client
                    .completion_stream(request, |event| {
                        if let Some(choice) = event.choices.first() {
                            print_fragment(&choice.text);
                        }
                    })
                    .await?;
                println!();
            } else {
                let response = client.completion(request).await?;
                if let Some(choice) = response.choices.first() {
                    println!("{}", choice.text);
                }
            }
        }
        cli::Command::Search { query, documents } => {
            let response = client
                .search(&SearchRequest {
                    documents: documents.clone(),
                    query,
                })
                .await?;
            let mut ranked = response.data;
            ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
            for hit in ranked {
                let doc = documents.get(hit.document).map_or("?", String::as_str);
                println!("{:>8.3}\t{doc}", hit.score);
            }
        }
        cli::Command::Edit {
            instruction,
            input,
            model,
        } => {
            let response = client
                .edits(&EditsRequest {
                    model,
                    input,
                    instruction,
                    ..EditsRequest::default()
                })
                .await?;
            if let Some(choice) = response.choices.first() {
                println!("{}", choice.text);
            }
        }
        cli::Command::Chat {
            message,
            system,
            model,
            stream,
        } => {
            let mut messages = Vec::new();
            if let Some(system) = system {
                messages.push(ChatMessage::system(system));
            }
            messages.push(ChatMessage::user(message));
            let request = ChatCompletionRequest::new(model, messages);
            if stream {
                client
                    .chat_completion_stream(request, |event| {
                        if let Some(content) = event
                            .choices
                            .first()
                            .and_then(|choice| choice.delta.content.as_deref())
                        {
                            print_fragment(content);
                        }
                    })
                    .await?;
                println!();
            } else {
                let response = client.chat_completion(request).await?;
                if let Some(choice) = response.choices.first() {
                    println!("{}", choice.message.content);
                }
            }
        }
        cli::Command::Interview {
            title,
            description,
            cap,
        } => {
            let response = client
                .interview_questions(&InterviewArgs {
                    job_title: title,
                    job_description: description,
                    cap,
                })
                .await?;
            if !response.has_questions() {
                eprintln!("no questions generated");
                return Ok(());
            }
            for question in &response.questions {
                println!("{}. {}", question.index, question.question);
            }
            tracing::info!(elapsed_ms = response.duration.as_millis() as u64, "interview done");
        }
    }
    Ok(())
}

fn print_fragment(text: &str) {
    let mut out = std::io::stdout().lock();
    let _ = out.write_all(text.as_bytes());
    let _ = out.flush();
}
