use std::sync::Arc;
use std::thread;

use anyhow::Result;
use tracing::debug;

use crate::app::{App, BackendEvent};
use crate::render::{render_bot, render_user, RenderableReply};

/// Send whatever is in the input box.
/// Returns Ok(false) when the trimmed input is empty and nothing happened.
pub fn submit_input(app: &mut App) -> Result<bool> {
    let text = app.input.trim().to_string();
    if text.is_empty() {
        return Ok(false);
    }

    // 1) Show the user's message and clear the input box
    app.push_message(render_user(&text));
    app.input.clear();

    // 2) Placeholder until the reply arrives
    app.show_typing();
    app.in_flight += 1;

    // 3) Talk to the proxy off the UI thread
    let ctx = Arc::clone(&app.ctx);
    let tx = app.backend_tx.clone();
    thread::Builder::new()
        .name("assistant-request".into())
        .spawn(move || {
            let text = ctx.send(&text);
            let _ = tx.send(BackendEvent::Reply { text });
        })?;

    debug!(in_flight = app.in_flight, "request started");
    Ok(true)
}

/// Apply a worker result to the UI state.
pub fn handle_backend_event(app: &mut App, event: BackendEvent) {
    match event {
        BackendEvent::Reply { text } => {
            app.in_flight = app.in_flight.saturating_sub(1);
            app.hide_typing();
            app.push_message(render_bot(&RenderableReply::Paragraphs(text)));

            // Another request is still pending, keep the placeholder last.
            if app.is_sending() {
                app.show_typing();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::app::TYPING_INDICATOR_ID;
    use crate::config::Config;
    use crate::llm::APOLOGY;
    use crate::render::{Block, MessageFrom};
    use crate::session::ChatContext;

    fn app_for(endpoint: String) -> (App, mpsc::Receiver<BackendEvent>) {
        let (tx, rx) = mpsc::channel();
        let config = Config::default().with_overrides(Some(endpoint), None, None, None);
        (App::new(Arc::new(ChatContext::new(config)), tx), rx)
    }

    #[test]
    fn whitespace_input_does_nothing() {
        let (mut app, rx) = app_for("http://127.0.0.1:1/".into());
        app.input = "   \t ".into();

        assert!(!submit_input(&mut app).unwrap());
        assert!(app.thread.is_empty());
        assert_eq!(app.input, "   \t ");
        assert!(!app.is_sending());
        assert!(app.ctx.buffer().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn send_shows_user_message_then_bot_reply() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/proxy")
            .with_status(200)
            .with_body(
                json!({"id": "r1", "output": [{"content": [{"text": "- Nike\n- Adidas"}]}]})
                    .to_string(),
            )
            .create();

        let (mut app, rx) = app_for(format!("{}/proxy", server.url()));
        app.input = "  which brands?  ".into();

        assert!(submit_input(&mut app).unwrap());
        assert_eq!(app.input, "");
        assert!(app.is_sending());
        assert_eq!(app.thread[0].body, vec![Block::Plain("which brands?".into())]);
        assert_eq!(app.thread[1].id, TYPING_INDICATOR_ID);

        let event = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        handle_backend_event(&mut app, event);

        assert!(!app.is_sending());
        assert!(!app.has_typing_indicator());
        assert_eq!(app.thread.len(), 2);
        assert_eq!(app.thread[1].from, MessageFrom::Bot);
        assert_eq!(
            app.thread[1].body,
            vec![Block::ListItem("Nike".into()), Block::ListItem("Adidas".into())]
        );
        assert_eq!(app.ctx.buffer().len(), 2);
    }

    #[test]
    fn failed_request_renders_apology() {
        let (mut app, rx) = app_for("http://127.0.0.1:1/proxy".into());
        app.input = "hello".into();

        submit_input(&mut app).unwrap();
        let event = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        handle_backend_event(&mut app, event);

        assert_eq!(app.thread.last().unwrap().to_lines(), vec![APOLOGY]);
        assert_eq!(app.ctx.buffer().len(), 1);
    }

    #[test]
    fn indicator_stays_while_another_request_is_pending() {
        let (mut app, _rx) = app_for("http://unused".into());
        app.in_flight = 2;
        app.show_typing();

        handle_backend_event(&mut app, BackendEvent::Reply { text: "first".into() });

        assert!(app.is_sending());
        assert_eq!(app.thread.last().map(|m| m.id.as_str()), Some(TYPING_INDICATOR_ID));
        assert_eq!(app.thread[0].to_lines(), vec!["first"]);
    }
}
