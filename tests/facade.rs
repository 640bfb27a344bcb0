mod common;

use std::sync::Arc;

use common::{FakeClient, FakeFactory};
use futures::StreamExt;
use genai_facade::backend::GenAIClient;
use genai_facade::models::{Content, CountTokensConfig, Model};
use genai_facade::{ClientConfig, GoogleGenAI, GoogleGenAIError, GoogleGenAIOptions};

fn facade(api_key: &str, factory: &Arc<FakeFactory>) -> GoogleGenAI {
    common::init_tracing();
    GoogleGenAI::with_options(
        GoogleGenAIOptions::builder()
            .api_key(api_key)
            .model(Model::Gemini15Flash)
            .factory(factory.clone())
            .build(),
    )
}

#[tokio::test]
async fn missing_key_fails_every_operation_without_building() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("", &factory);

    assert!(matches!(
        genai.generate_content("hi", None).await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.generate_content_stream("hi", None).await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.generate_images("a cat", None).await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.generate_videos("a cat", None, None).await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.compute_tokens("hi").await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.count_tokens("hi", None).await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.embed_content("hi", None).await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(genai.chat(), Err(GoogleGenAIError::MissingApiKey)));
    assert!(matches!(
        genai.new_chat(),
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.chat_message("hi").await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.chat_message_stream("hi").await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.upload_file(b"x".to_vec(), None).await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.get_file("files/a").await,
        Err(GoogleGenAIError::MissingApiKey)
    ));
    assert!(matches!(
        genai.delete_file("files/a").await,
        Err(GoogleGenAIError::MissingApiKey)
    ));

    assert_eq!(factory.builds(), 0);
    assert!(factory.client.calls().is_empty());
}

#[tokio::test]
async fn client_is_built_once_on_first_use() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("key-1", &factory);
    assert_eq!(factory.builds(), 0);

    genai.generate_content("one", None).await.unwrap();
    genai.count_tokens("two", None).await.unwrap();

    assert_eq!(factory.builds(), 1);
    assert_eq!(factory.last_key().as_deref(), Some("key-1"));
}

#[tokio::test]
async fn setting_the_key_rebuilds_with_the_new_key() {
    let factory = FakeFactory::new(FakeClient::new());
    let mut genai = facade("", &factory);
    assert!(genai.generate_content("hi", None).await.is_err());

    genai.set_api_key("late-key");
    genai.generate_content("hi", None).await.unwrap();
    assert_eq!(factory.last_key().as_deref(), Some("late-key"));

    genai.set_api_key("rotated");
    assert_eq!(genai.config().api_key, "rotated");
    genai.generate_content("hi", None).await.unwrap();
    assert_eq!(factory.builds(), 2);
    assert_eq!(factory.last_key().as_deref(), Some("rotated"));
}

#[tokio::test]
async fn reconfigure_swaps_config_and_client() {
    let factory = FakeFactory::new(FakeClient::new());
    let mut genai = facade("key", &factory);
    genai.generate_content("hi", None).await.unwrap();

    genai
        .reconfigure(
            ClientConfig::builder()
                .base_url("http://localhost:9")
                .build(),
        )
        .unwrap();

    assert_eq!(factory.builds(), 2);
    assert_eq!(genai.config().base_url, "http://localhost:9");
    // the facade's key wins over the empty key in the new config
    assert_eq!(genai.config().api_key, "key");
    assert_eq!(factory.last_key().as_deref(), Some("key"));

    genai.generate_content("again", None).await.unwrap();
    assert_eq!(factory.builds(), 2);
}

#[tokio::test]
async fn reconfigure_without_key_changes_nothing() {
    let factory = FakeFactory::new(FakeClient::new());
    let mut genai = facade("", &factory);
    let before = genai.config().clone();

    let result = genai.reconfigure(ClientConfig::builder().base_url("http://other").build());

    assert!(matches!(result, Err(GoogleGenAIError::MissingApiKey)));
    assert_eq!(genai.config(), &before);
    assert_eq!(factory.builds(), 0);
}

#[tokio::test]
async fn injected_client_is_used_without_building() {
    let factory = FakeFactory::new(FakeClient::new());
    let injected = Arc::new(FakeClient::new());
    let genai = GoogleGenAI::with_options(
        GoogleGenAIOptions::builder()
            .api_key("key")
            .client(injected.clone() as Arc<dyn GenAIClient>)
            .factory(factory.clone())
            .build(),
    );

    genai.embed_content("hi", None).await.unwrap();

    assert_eq!(factory.builds(), 0);
    assert_eq!(injected.calls(), vec!["embed_content"]);
}

#[tokio::test]
async fn results_pass_through_unchanged() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("key", &factory);

    let response = genai.generate_content("ping", None).await.unwrap();
    assert_eq!(response, common::reply("echo: ping"));
    assert_eq!(response.text(), "echo: ping");

    let sent = factory.client.last_generate.lock().unwrap().clone().unwrap();
    assert_eq!(sent.model, Model::Gemini15Flash);
    assert_eq!(sent.contents.0, vec![Content::from("ping")]);
    assert!(sent.config.is_none());

    let operation = genai.generate_videos("sunrise", None, None).await.unwrap();
    assert_eq!(operation.name, "operations/sunrise");

    let images = genai.generate_images("a fox", None).await.unwrap();
    assert_eq!(images, common::canned_images("a fox"));
    let image = images.generated_images[0].image.as_ref().unwrap();
    assert_eq!(image.decode().unwrap(), b"a fox");

    let tokens = genai.compute_tokens("two words").await.unwrap();
    assert_eq!(tokens, common::canned_tokens("two words"));
    assert_eq!(tokens.tokens_info[0].tokens, vec!["two", "words"]);

    let embeddings = genai
        .embed_content(vec![Content::from("a"), Content::from("b")], None)
        .await
        .unwrap();
    assert_eq!(embeddings.embeddings.len(), 2);
}

#[tokio::test]
async fn count_tokens_forwards_its_config() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("key", &factory);
    let config = CountTokensConfig::builder()
        .system_instruction("be brief")
        .build();

    let counted = genai.count_tokens("hello", Some(config.clone())).await.unwrap();

    assert_eq!(counted.total_tokens, 1);
    let sent = factory.client.last_count.lock().unwrap().clone().unwrap();
    assert_eq!(sent.config, Some(config));
}

#[tokio::test]
async fn model_changes_apply_to_later_calls() {
    let factory = FakeFactory::new(FakeClient::new());
    let mut genai = facade("key", &factory);

    genai.set_model("gemini-2.5-pro");
    genai.generate_content("hi", None).await.unwrap();

    let sent = factory.client.last_generate.lock().unwrap().clone().unwrap();
    assert_eq!(sent.model, Model::Gemini25Pro);
}

#[tokio::test]
async fn stream_yields_chunks_in_order_then_ends() {
    let factory = FakeFactory::new(FakeClient::with_stream(&["one", "two", "three"]));
    let genai = facade("key", &factory);

    let mut stream = genai.generate_content_stream("count", None).await.unwrap();
    let mut seen = Vec::new();
    while let Some(chunk) = stream.next().await {
        seen.push(chunk.unwrap().text());
    }

    assert_eq!(seen, vec!["one", "two", "three"]);
    assert!(stream.next().await.is_none());
    assert_eq!(factory.client.calls(), vec!["generate_content_stream"]);
}

#[tokio::test]
async fn chat_session_is_cached_until_replaced() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("key", &factory);

    let first = genai.chat().unwrap();
    let again = genai.chat().unwrap();
    assert_eq!(first.id(), again.id());

    genai.chat_message("hello there").await.unwrap();
    assert_eq!(genai.chat().unwrap().session().history().len(), 2);

    let fresh = genai.new_chat().unwrap();
    assert_ne!(fresh.id(), first.id());
    assert_eq!(genai.chat().unwrap().id(), fresh.id());
    assert!(fresh.session().history().is_empty());
    assert_eq!(
        factory
            .client
            .chats_created
            .load(std::sync::atomic::Ordering::SeqCst),
        2
    );
}

#[tokio::test]
async fn rotating_the_key_keeps_the_chat() {
    let factory = FakeFactory::new(FakeClient::new());
    let mut genai = facade("key", &factory);
    let chat = genai.chat().unwrap();

    genai.set_api_key("other");
    assert_eq!(genai.chat().unwrap().id(), chat.id());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_chat_creates_one_session() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = Arc::new(facade("key", &factory));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let genai = Arc::clone(&genai);
            tokio::spawn(async move { genai.chat().unwrap().id().to_string() })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.dedup();

    assert_eq!(ids.len(), 1);
    assert_eq!(factory.builds(), 1);
    assert_eq!(
        factory
            .client
            .chats_created
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[tokio::test]
async fn chat_stream_splits_reply() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("key", &factory);

    let words: Vec<String> = genai
        .chat_message_stream("a b c")
        .await
        .unwrap()
        .map(|chunk| chunk.unwrap().text())
        .collect()
        .await;

    assert_eq!(words, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn missing_files_become_errors() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("key", &factory);

    assert!(matches!(
        genai.upload_file(b"data".to_vec(), None).await,
        Err(GoogleGenAIError::UploadFailed)
    ));
    match genai.get_file("files/gone").await {
        Err(GoogleGenAIError::FileNotFound(name)) => assert_eq!(name, "files/gone"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        genai.delete_file("files/gone").await,
        Err(GoogleGenAIError::FileNotFound(_))
    ));
}

#[tokio::test]
async fn stored_files_are_returned() {
    let factory = FakeFactory::new(FakeClient::with_file("files/abc"));
    let genai = facade("key", &factory);

    assert_eq!(
        genai.upload_file(b"data".to_vec(), None).await.unwrap().name,
        "files/abc"
    );
    assert_eq!(genai.get_file("files/abc").await.unwrap().name, "files/abc");
    genai.delete_file("files/abc").await.unwrap();
    assert_eq!(
        factory.client.calls(),
        vec!["files.upload", "files.get", "files.delete"]
    );
}

#[test]
fn debug_output_hides_the_key() {
    let factory = FakeFactory::new(FakeClient::new());
    let genai = facade("super-secret", &factory);
    assert!(!format!("{genai:?}").contains("super-secret"));
}
