use dotenv::dotenv;
use genai_facade::{
    models::{GenerateContentConfig, Model},
    GoogleGenAI,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Reads GEMINI_API_KEY (or GOOGLE_API_KEY)
    let mut genai = GoogleGenAI::from_env()?;
    genai.set_model(Model::Gemini20Flash);

    let config = GenerateContentConfig::builder()
        .temperature(0.4)
        .max_output_tokens(256)
        .build();

    let response = genai
        .generate_content("Explain ownership in Rust in two sentences.", Some(config))
        .await?;
    println!("{}", response.text());

    let counted = genai.count_tokens("Explain ownership in Rust.", None).await?;
    println!("Prompt tokens: {}", counted.total_tokens);

    Ok(())
}
