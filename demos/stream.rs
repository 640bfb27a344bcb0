use std::io::Write;

use dotenv::dotenv;
use futures::StreamExt;
use genai_facade::{models::GenerateContentConfig, GoogleGenAI};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let genai = GoogleGenAI::from_env()?;

    let config = GenerateContentConfig::builder()
        .system_instruction("You are a helpful assistant that translates English to German.")
        .build();

    // Stream the response
    let mut stream = genai
        .generate_content_stream("How are you?", Some(config))
        .await?;

    while let Some(response) = stream.next().await {
        match response {
            Ok(response) => {
                print!("{}", response.text());
                std::io::stdout().flush()?;
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    println!();

    Ok(())
}
