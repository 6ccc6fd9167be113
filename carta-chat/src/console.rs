//! Interactive console chat loop.
//!
//! One turn at a time: read a question, retrieve the supporting chunks,
//! generate the answer, show both, record the turn. A slow remote call
//! blocks its own turn only; there is no background processing.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use carta_rag::{CorpusIndex, EmbeddingProvider, SearchResult};

use crate::composer::AnswerComposer;
use crate::history::ConversationLog;

/// Number of characters of each source chunk shown in the sources panel.
const SOURCE_PREVIEW_CHARS: usize = 300;

/// User-visible message shown when the query could not be embedded.
pub const RETRIEVAL_FAILURE_MESSAGE: &str =
    "Something went wrong while searching the document. Please try again.";

/// Print the startup banner.
pub fn print_banner() {
    println!("carta — constitution Q&A");
    println!("Ask a question about the constitution. Type /help for commands.\n");
}

fn print_help() {
    println!("Commands:");
    println!("  /help        show this help");
    println!("  /clear       discard the conversation history");
    println!("  exit, quit   end the session");
    println!();
}

/// Run the chat loop until EOF or an exit command.
///
/// Every submitted question is appended to the log before generation, and
/// the assistant's answer (or failure message) after, so the history
/// reflects the turn even when the remote call fails.
pub async fn run(
    index: &CorpusIndex,
    provider: &dyn EmbeddingProvider,
    composer: &AnswerComposer,
    top_k: usize,
    log: &mut ConversationLog,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "exit" | "quit" => break,
            "/help" => {
                print_help();
                continue;
            }
            "/clear" => {
                log.clear();
                println!("Conversation history cleared.\n");
                continue;
            }
            _ => {}
        }

        log.push_user(input);

        let answer = match index.query(provider, input, top_k).await {
            Ok(results) => {
                let answer = composer.answer(input, &results).await;
                println!("\n{answer}\n");
                print!("{}", render_sources(&results));
                answer
            }
            Err(e) => {
                error!(error = %e, "query embedding failed");
                println!("\n{RETRIEVAL_FAILURE_MESSAGE}\n");
                RETRIEVAL_FAILURE_MESSAGE.to_string()
            }
        };
        log.push_assistant(answer);
    }

    Ok(())
}

/// Render the supporting chunks and their similarity scores, each
/// display-truncated to its first [`SOURCE_PREVIEW_CHARS`] characters.
fn render_sources(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = String::from("Sources:\n");
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("  Section {} (similarity: {:.2}%)\n", i + 1, result.score * 100.0));
        out.push_str(&format!(
            "    {}\n",
            truncate_chars(&result.chunk.text, SOURCE_PREVIEW_CHARS)
        ));
    }
    out.push('\n');
    out
}

/// Truncate to at most `max_chars` characters, appending an ellipsis when
/// anything was cut. Operates on characters, not bytes, so multibyte text
/// never splits mid-character.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
