use anyhow::Context;
use parley_attachments::FileLoader;
use parley_cli::{app::App, config::Config, logging::init_logging, repl};
use parley_llm::ClientFactory;
use parley_session::{ChatStore, Conversation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.logging);
    tracing::info!(
        model = %config.llm.model,
        base_url = %config.llm.base_url,
        "starting parley"
    );

    let client = ClientFactory::create_chat_client(config.provider_config())
        .context("Failed to create LLM client")?;

    let mut conversation = Conversation::new(client, config.llm.model.clone())
        .with_options(config.llm.chat_options())
        .with_timeout(config.llm.timeout());
    if let Some(prompt) = &config.llm.system_prompt {
        conversation = conversation.with_system_prompt(prompt.clone());
    }

    let store = ChatStore::new(config.chat.clone());
    let mut app = App::new(store, conversation, FileLoader::new());

    repl::run(&mut app).await
}
