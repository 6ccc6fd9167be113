//! carta — ask questions about a constitution from your terminal.
//!
//! Startup is strictly ordered: credential, document, index, then the
//! chat loop. The first two failures halt before anything is served;
//! once the loop is running, failures only ever affect their own turn.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use carta_chat::composer::{AnswerComposer, GeminiGenerator};
use carta_chat::config::{AppConfig, ConfigError};
use carta_chat::console;
use carta_chat::history::ConversationLog;
use carta_gemini::GeminiClient;
use carta_rag::{CorpusIndex, GeminiEmbedder, ParagraphChunker, load_pdf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingApiKey) => {
            eprintln!("GOOGLE_API_KEY is not set. Add it to your environment or a .env file.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if !config.pdf_path.exists() {
        eprintln!("Document not found: {}", config.pdf_path.display());
        eprintln!("Place the constitution PDF there, or point CARTA_PDF at it.");
        std::process::exit(1);
    }

    println!("Loading {} ...", config.pdf_path.display());
    let document = match load_pdf(&config.pdf_path).await {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Failed to load the document: {e}");
            std::process::exit(1);
        }
    };

    let client = GeminiClient::new(config.api_key.as_str())?;
    let embedder = GeminiEmbedder::new(client.clone(), config.embed_model.clone());
    let chunker = ParagraphChunker::new(config.rag.min_chunk_size);

    println!("Indexing the document, this can take a moment...");
    let index = match CorpusIndex::build(&document, &chunker, &embedder).await {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Failed to index the document: {e}");
            std::process::exit(1);
        }
    };
    println!("Document loaded ({} sections indexed).\n", index.len());

    let generator = GeminiGenerator::new(client, config.chat_model.clone());
    let composer = AnswerComposer::new(Arc::new(generator));
    let mut log = ConversationLog::new();

    console::print_banner();
    console::run(&index, &embedder, &composer, config.rag.top_k, &mut log).await
}
