//! Interactive client loop.

use std::sync::Arc;

use rentchat_shared::{Message, time::to_wire_format};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{broadcast::error::RecvError, mpsc};

use super::{cli::ClientArgs, command::Command};
use crate::{
    domain::{CreateMessagePayload, MessageFactory, MessageSink},
    error::ChatError,
    infrastructure::{BroadcastSink, InMemoryChatStore, build_transport},
    usecase::ChatSession,
};

/// Run the interactive chat client until `/quit`, Ctrl-C or end of input.
pub async fn run_client(args: ClientArgs) -> Result<(), ChatError> {
    let config = args.chat_config();
    let key = args.conversation_key()?;
    let sender_id = args.sender_id()?;

    let store = Arc::new(InMemoryChatStore::new());
    let sink = BroadcastSink::default();
    let mut inbound = sink.subscribe();

    let transport = build_transport(&config, Arc::new(sink), MessageFactory::system());
    let mut session = ChatSession::new(transport);
    session.view(Some(key.clone()));

    println!("Chatting with {} about listing {}", key.receiver_id, key.listing_id);
    println!("Commands: /status /history /read <id> /reconnect /quit");

    let printer_store = Arc::clone(&store);
    let printer = tokio::spawn(async move {
        loop {
            match inbound.recv().await {
                Ok(message) => {
                    println!("{}", format_message(&message));
                    printer_store.publish(message);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {skipped} messages (display too slow)");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let (line_tx, mut line_rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || read_lines(line_tx));

    while let Some(line) = line_rx.recv().await {
        match Command::parse(&line) {
            Command::Send(content) => session.send_message(CreateMessagePayload::new(
                content,
                key.listing_id.as_str(),
                sender_id.as_str(),
                key.receiver_id.as_str(),
            )),
            Command::Status => println!("connection: {}", session.state()),
            Command::History => {
                let history = store.conversation(
                    key.listing_id.as_str(),
                    sender_id.as_str(),
                    key.receiver_id.as_str(),
                );
                if history.is_empty() {
                    println!("(no messages yet)");
                }
                for message in &history {
                    println!("{}", format_message(message));
                }
            }
            Command::Read(id) => match store.mark_as_read(&id) {
                0 => println!("no message with id {id}"),
                n => println!("marked {n} message(s) as read"),
            },
            Command::Reconnect => session.reconnect(),
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(input) => println!("unknown command: {input}"),
        }
    }

    session.close();
    printer.abort();
    Ok(())
}

/// Read prompt lines on a blocking thread until `/quit`, Ctrl-C or end of input.
fn read_lines(lines: mpsc::UnboundedSender<String>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!("Failed to open terminal: {e}");
            return;
        }
    };

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                let quit = Command::parse(&line) == Command::Quit;
                if lines.send(line).is_err() || quit {
                    return;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return,
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                return;
            }
        }
    }
}

fn format_message(message: &Message) -> String {
    let read = if message.is_read { " (read)" } else { "" };
    format!(
        "[{}] {}: {}{}  #{}",
        to_wire_format(&message.sent_at),
        message.sender_id,
        message.content,
        read,
        message.id
    )
}
