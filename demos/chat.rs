use std::{error::Error, io::Write};

use colored::*;
use dotenv::dotenv;
use futures::StreamExt;
use genai_facade::GoogleGenAI;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let genai = GoogleGenAI::from_env()?;
    let chat = genai.chat()?;
    println!("{} {}", "✓ Chat session".green(), chat.id().bright_black());

    let messages = [
        "My favourite language is Rust. Remember that.",
        "What are two features that make it unique?",
    ];

    for message in messages {
        println!("\n{}", "━".repeat(50).bright_black());
        println!("{} {}", "👤 User:".blue().bold(), message);

        let response = genai.chat_message(message).await?;
        println!("{} {}", "🤖 Assistant:".green().bold(), response.text().white());
    }

    println!("\n{}", "━".repeat(50).bright_black());
    let prompt = "Which language did I say I like? Answer with a short poem.";
    println!("{} {}", "👤 User:".blue().bold(), prompt);
    print!("{} ", "🤖 Assistant:".green().bold());
    std::io::stdout().flush()?;

    let mut stream = genai.chat_message_stream(prompt).await?;
    while let Some(response) = stream.next().await {
        match response {
            Ok(response) => {
                print!("{}", response.text().white());
                std::io::stdout().flush()?;
            }
            Err(e) => eprintln!("\n{} {}", "Error:".red().bold(), e),
        }
    }
    println!();

    // a fresh session forgets the conversation
    let fresh = genai.new_chat()?;
    println!(
        "\n{} {} ({} turns)",
        "✓ New chat session".green(),
        fresh.id().bright_black(),
        fresh.session().history().len()
    );

    Ok(())
}
