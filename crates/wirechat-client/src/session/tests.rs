//! Session behavior against an in-memory document and a fake connection task.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use tokio::sync::{mpsc, RwLock};
use wirechat_common::ChatError;

use super::*;
use crate::protocol::OutboundMessage;
use crate::socket::codec::{encode, Packet};
use crate::socket::{SocketClient, SocketCommand, SocketEvent};
use crate::surface::{Document, Surface};

struct Harness {
    session: ChatSession<Document>,
    commands: mpsc::Receiver<SocketCommand>,
    events: mpsc::Sender<SocketEvent>,
}

/// A session attached to channels instead of a real socket.
fn harness() -> Harness {
    let config = SessionConfig::default();
    let doc = Document::with_chat_layout(&config.input_key, &config.display_key);
    let mut session = ChatSession::new(config, doc);

    let (command_tx, commands) = mpsc::channel(16);
    let (events, event_rx) = mpsc::channel(16);
    let client = SocketClient::from_parts(command_tx, Arc::new(RwLock::new(true)));
    session.attach(client, event_rx);

    Harness {
        session,
        commands,
        events,
    }
}

fn connected_harness() -> Harness {
    let mut h = harness();
    h.session
        .handle_event(SocketEvent::Connected {
            sid: Some("test-sid".into()),
        })
        .unwrap();
    h
}

fn reply(text: &str) -> SocketEvent {
    SocketEvent::Event {
        name: "response".into(),
        data: json!({ "message": text }),
    }
}

fn type_input(session: &mut ChatSession<Document>, text: &str) {
    session
        .surface_mut()
        .set_input_value("userInput", text)
        .unwrap();
}

fn chat_lines(session: &ChatSession<Document>) -> Vec<String> {
    session.surface().lines("chat").unwrap().to_vec()
}

fn expect_emit(commands: &mut mpsc::Receiver<SocketCommand>) -> (String, serde_json::Value) {
    match commands.try_recv() {
        Ok(SocketCommand::Emit { event, payload }) => (event, payload),
        other => panic!("expected emit, got {other:?}"),
    }
}

#[test]
fn starts_disconnected() {
    let h = harness();
    assert_eq!(h.session.state(), SessionState::Disconnected);
}

#[test]
fn connected_event_transitions_state() {
    let h = connected_harness();
    assert_eq!(h.session.state(), SessionState::Connected);
}

#[tokio::test]
async fn send_emits_one_message_with_empty_history() {
    let mut h = connected_harness();
    type_input(&mut h.session, "hi");

    let sent = h.session.send_current_input().await.unwrap();
    assert_eq!(sent, OutboundMessage::new("hi"));

    let (event, payload) = expect_emit(&mut h.commands);
    assert_eq!(event, "message");
    assert_eq!(payload, json!({ "message": "hi", "history": [] }));
    assert!(h.commands.try_recv().is_err());
}

#[tokio::test]
async fn send_keeps_message_before_history_on_the_wire() {
    let mut h = connected_harness();
    type_input(&mut h.session, "hi");
    h.session.send_current_input().await.unwrap();

    let (event, payload) = expect_emit(&mut h.commands);
    assert_eq!(
        encode(&Packet::event(event, payload)),
        r#"42["message",{"message":"hi","history":[]}]"#
    );
}

#[tokio::test]
async fn send_accepts_empty_input() {
    let mut h = connected_harness();

    let sent = h.session.send_current_input().await.unwrap();
    assert_eq!(sent.message, "");
    assert!(sent.history.is_empty());

    let (_, payload) = expect_emit(&mut h.commands);
    assert_eq!(payload, json!({ "message": "", "history": [] }));
}

#[tokio::test]
async fn nothing_is_sent_before_connected() {
    let mut h = harness();
    type_input(&mut h.session, "hi");

    let err = h.session.send_current_input().await.unwrap_err();
    assert!(matches!(err, ChatError::Connection(_)));
    assert!(h.commands.try_recv().is_err());
}

#[tokio::test]
async fn nothing_is_sent_without_connection() {
    let config = SessionConfig::default();
    let doc = Document::with_chat_layout(&config.input_key, &config.display_key);
    let mut session = ChatSession::new(config, doc);
    session
        .handle_event(SocketEvent::Connected { sid: None })
        .unwrap();

    let err = session.send_current_input().await.unwrap_err();
    assert!(matches!(err, ChatError::Connection(_)));
}

#[tokio::test]
async fn send_reports_missing_input_field() {
    let mut h = connected_harness();
    h.session.surface_mut().remove("userInput");

    let err = h.session.send_current_input().await.unwrap_err();
    assert_eq!(err, ChatError::InputMissing("userInput".into()));
    assert!(h.commands.try_recv().is_err());
}

#[tokio::test]
async fn reply_after_one_send_appends_one_line() {
    let mut h = connected_harness();
    type_input(&mut h.session, "hi");
    h.session.send_current_input().await.unwrap();

    h.session.handle_event(reply("hello")).unwrap();
    assert_eq!(chat_lines(&h.session), ["<p>Bot: hello</p>"]);
}

#[tokio::test]
async fn reply_after_two_sends_appends_one_line() {
    let mut h = connected_harness();
    type_input(&mut h.session, "first");
    h.session.send_current_input().await.unwrap();
    type_input(&mut h.session, "second");
    h.session.send_current_input().await.unwrap();

    h.session.handle_event(reply("hello")).unwrap();
    assert_eq!(chat_lines(&h.session), ["<p>Bot: hello</p>"]);

    h.session.handle_event(reply("again")).unwrap();
    assert_eq!(
        chat_lines(&h.session),
        ["<p>Bot: hello</p>", "<p>Bot: again</p>"]
    );
}

#[test]
fn reply_text_is_rendered_as_data() {
    let mut h = connected_harness();
    h.session
        .handle_event(reply("<script>alert(1)</script>"))
        .unwrap();
    assert_eq!(
        chat_lines(&h.session),
        ["<p>Bot: &lt;script&gt;alert(1)&lt;/script&gt;</p>"]
    );
}

#[test]
fn reply_without_container_is_render_target_missing() {
    let mut h = connected_harness();
    h.session.surface_mut().remove("chat");

    let err = h.session.handle_event(reply("hello")).unwrap_err();
    assert_eq!(err, ChatError::RenderTargetMissing("chat".into()));
}

#[test]
fn malformed_reply_is_protocol_error() {
    let mut h = connected_harness();
    let err = h
        .session
        .handle_event(SocketEvent::Event {
            name: "response".into(),
            data: json!({ "response": "Request processed." }),
        })
        .unwrap_err();
    assert!(matches!(err, ChatError::Protocol(_)));
    assert!(chat_lines(&h.session).is_empty());
}

#[test]
fn server_notices_and_unknown_events_are_not_rendered() {
    let mut h = connected_harness();
    h.session
        .handle_event(SocketEvent::Event {
            name: "server_message".into(),
            data: json!("Welcome to the Travel Chatbot!"),
        })
        .unwrap();
    h.session
        .handle_event(SocketEvent::Event {
            name: "bot_response".into(),
            data: json!({ "response": "Request processed." }),
        })
        .unwrap();
    assert!(chat_lines(&h.session).is_empty());
}

#[test]
fn on_reply_replaces_previous_handler() {
    let mut h = connected_harness();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&first);
    h.session.on_reply(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let counter = Arc::clone(&second);
    h.session.on_reply(move |msg, doc: &mut Document| {
        counter.fetch_add(1, Ordering::SeqCst);
        doc.append_text("chat", &format!("custom: {}", msg.message))
    });

    h.session.handle_event(reply("hello")).unwrap();
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
    assert_eq!(chat_lines(&h.session), ["<p>custom: hello</p>"]);
}

#[test]
fn connection_error_keeps_session_disconnected() {
    let mut h = harness();
    let err = h
        .session
        .handle_event(SocketEvent::Error("Connection failed: refused".into()))
        .unwrap_err();
    assert_eq!(
        err,
        ChatError::Connection("Connection failed: refused".into())
    );
    assert_eq!(h.session.state(), SessionState::Disconnected);
}

#[test]
fn disconnect_event_is_not_an_error() {
    let mut h = connected_harness();
    assert!(h.session.handle_event(SocketEvent::Disconnected).is_ok());
    assert_eq!(h.session.state(), SessionState::Connected);
}

#[tokio::test]
async fn next_event_reads_from_connection() {
    let mut h = harness();
    h.events.send(reply("hello")).await.unwrap();
    assert_eq!(h.session.next_event().await, Some(reply("hello")));

    drop(h.events);
    assert_eq!(h.session.next_event().await, None);
}

#[tokio::test]
async fn next_event_without_connection_is_none() {
    let mut session = ChatSession::new(SessionConfig::default(), Document::new());
    assert_eq!(session.next_event().await, None);
}

#[tokio::test]
async fn second_connect_keeps_existing_connection() {
    let mut h = connected_harness();
    h.session.connect("http://127.0.0.1:1");

    type_input(&mut h.session, "still here");
    h.session.send_current_input().await.unwrap();
    let (_, payload) = expect_emit(&mut h.commands);
    assert_eq!(payload["message"], "still here");
}

#[tokio::test]
async fn close_disconnects_and_refuses_later_sends() {
    let mut h = connected_harness();
    h.session.close().await;

    assert!(matches!(
        h.commands.try_recv(),
        Ok(SocketCommand::Disconnect)
    ));
    let err = h.session.send_current_input().await.unwrap_err();
    assert!(matches!(err, ChatError::Connection(_)));
}

#[tokio::test]
async fn send_fails_once_connection_task_is_gone() {
    let mut h = connected_harness();
    drop(h.commands);

    let err = h.session.send_current_input().await.unwrap_err();
    assert!(matches!(err, ChatError::Connection(_)));
}
