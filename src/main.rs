//! Interactive chat front end for the triage assistant.
//!
//! Presentation plumbing only: it renders the transcript turn by turn,
//! forwards patient input to the turn handler, and shows the final result
//! with the recommended next step. All session mutation happens inside the
//! handler; this loop only reads.

use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use clinic_triage::adapters::ai::{OpenAiClient, OpenAiConfig};
use clinic_triage::application::handlers::{
    ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler, TurnOutcome,
};
use clinic_triage::config::AppConfig;
use clinic_triage::domain::triage::{Categorization, Category, TriageSession};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clinic_triage=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Configuration error: {err}");
        std::process::exit(1);
    }
    let system_prompt = match config.ai.load_system_prompt() {
        Ok(prompt) => prompt,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    // Non-empty by validate() above.
    let api_key = config.ai.openai_api_key.clone().unwrap_or_default();
    let client = Arc::new(OpenAiClient::new(
        OpenAiConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    ));
    let handler = ProcessTurnHandler::new(client, system_prompt)
        .with_generation(config.ai.max_reply_tokens, config.ai.temperature);
    let mut session = TriageSession::new();

    print_banner();
    chat_loop(&handler, &mut session).await;
}

/// Reads patient input line by line and drives the turn handler.
async fn chat_loop(
    handler: &ProcessTurnHandler<OpenAiClient>,
    session: &mut TriageSession,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("you> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                eprintln!("Input error: {err}");
                break;
            }
        };

        let input = line.trim();
        // Blank input is never submitted.
        if input.is_empty() {
            continue;
        }
        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                println!("Started a new conversation.\n");
                continue;
            }
            _ => {}
        }

        match handler
            .handle(session, ProcessTurnCommand::new(input))
            .await
        {
            Ok(TurnOutcome::Continued { reply }) => {
                println!("\nassistant> {reply}\n");
            }
            Ok(TurnOutcome::Completed(categorization)) => {
                print_result(&categorization);
            }
            Err(ProcessTurnError::SessionComplete) => {
                println!("This conversation is finished. Type /reset to start a new one.\n");
            }
            Err(ProcessTurnError::Completion(err)) => {
                eprintln!("\nCould not reach the triage service: {err}");
                eprintln!("Your message is kept - send it again to retry.\n");
            }
            Err(err) => {
                eprintln!("\n{err}\n");
            }
        }
    }
}

fn print_banner() {
    println!("Family-practice appointment triage");
    println!("What is the reason for your appointment request?\n");
    println!("How this works:");
    println!("  1. Describe the reason for the appointment");
    println!("  2. The assistant asks clarifying questions when needed");
    println!("  3. You get a recommendation for the right kind of care\n");
    println!("Categories:");
    for category in Category::ALL {
        println!("  {category}");
    }
    println!("\nCommands: /reset starts over, /quit exits.\n");
}

fn print_result(categorization: &Categorization) {
    println!("\nThe reason for your appointment has been identified.\n");
    println!("Category: {}", categorization.category().description());
    println!("Explanation: {}", categorization.reason());
    println!("Suggestion: {}\n", categorization.category().recommended_action());
    println!("Type /reset to start a new conversation, or /quit to leave.\n");
}
