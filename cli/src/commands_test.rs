use super::*;
use kabaw_chat::{SessionAddress, Transport, TransportError, TransportEvent, TransportId};
use std::cell::RefCell;
use std::rc::Rc;

// =============================================================
// parse_input
// =============================================================

#[test]
fn blank_lines_are_empty() {
    assert_eq!(parse_input(""), Input::Empty);
    assert_eq!(parse_input("   "), Input::Empty);
}

#[test]
fn plain_text_is_sent_verbatim() {
    assert_eq!(parse_input("hello"), Input::Chat("hello".into()));
    assert_eq!(parse_input("  spaced out  "), Input::Chat("  spaced out  ".into()));
}

#[test]
fn known_commands_parse() {
    assert_eq!(parse_input("/help"), Input::Help);
    assert_eq!(parse_input("/clear"), Input::Clear);
    assert_eq!(parse_input("/connect"), Input::Connect);
    assert_eq!(parse_input("/logout"), Input::Logout);
    assert_eq!(parse_input("/quit"), Input::Quit);
    assert_eq!(parse_input("  /quit  "), Input::Quit);
}

#[test]
fn join_takes_exactly_two_arguments() {
    assert_eq!(
        parse_input("/join Alice general"),
        Input::Join { username: "Alice".into(), channel: "general".into() }
    );
    assert_eq!(parse_input("/join Alice"), Input::Usage("/join <username> <channel>"));
    assert_eq!(parse_input("/join a b c"), Input::Usage("/join <username> <channel>"));
}

#[test]
fn unknown_commands_keep_their_name() {
    assert_eq!(parse_input("/dance now"), Input::Unknown("dance".into()));
}

// =============================================================
// apply_input
// =============================================================

#[derive(Default)]
struct Log {
    opened: Vec<String>,
    sent: Vec<String>,
    closed: usize,
}

struct FakeTransport(Rc<RefCell<Log>>);

impl Transport for FakeTransport {
    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.0.borrow_mut().sent.push(text);
        Ok(())
    }

    fn close(&mut self) {
        self.0.borrow_mut().closed += 1;
    }
}

#[derive(Default)]
struct FakeConnector(Rc<RefCell<Log>>);

impl Connector for FakeConnector {
    type Transport = FakeTransport;

    fn open(&self, address: &SessionAddress, _id: TransportId) -> Result<FakeTransport, TransportError> {
        self.0.borrow_mut().opened.push(address.url().to_string());
        Ok(FakeTransport(Rc::clone(&self.0)))
    }
}

struct Harness {
    hook: SessionHook<FakeTransport>,
    connector: FakeConnector,
    config: ChatConfig,
    out: Vec<u8>,
}

impl Harness {
    fn new() -> Self {
        Self {
            hook: SessionHook::new(),
            connector: FakeConnector::default(),
            config: ChatConfig { username: "Alice".into(), ..ChatConfig::default() },
            out: Vec::new(),
        }
    }

    fn run(&mut self, line: &str) -> Flow {
        apply_input(parse_input(line), &mut self.hook, &self.connector, &mut self.config, &mut self.out)
            .expect("write to buffer")
    }

    fn open_active(&mut self) {
        let id = self.hook.active_transport().expect("active transport");
        self.hook.handle(id, TransportEvent::Opened);
    }

    fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

#[test]
fn connect_opens_current_address_once() {
    let mut h = Harness::new();

    assert_eq!(h.run("/connect"), Flow::Continue);
    h.open_active();
    h.run("/connect");

    assert_eq!(
        h.connector.0.borrow().opened,
        vec!["ws://localhost:8080/ws?username=Alice&channel=general".to_owned()]
    );
    assert!(h.output().contains("Already connected"));
}

#[test]
fn chat_line_is_sent_when_open() {
    let mut h = Harness::new();
    h.run("/connect");
    h.open_active();

    h.run("hello all");

    let sent = h.connector.0.borrow().sent.clone();
    assert_eq!(sent, vec![r#"{"type":"message","content":"hello all"}"#.to_owned()]);
    assert!(h.output().is_empty());
}

#[test]
fn chat_line_while_offline_prints_hint() {
    let mut h = Harness::new();

    h.run("hello?");

    assert!(h.connector.0.borrow().sent.is_empty());
    assert!(h.output().contains("Not connected"));
}

#[test]
fn join_switches_address_and_updates_config() {
    let mut h = Harness::new();
    h.run("/connect");
    h.open_active();

    h.run("/join Bob random");

    assert_eq!(h.config.username, "Bob");
    assert_eq!(h.config.channel, "random");
    let log = h.connector.0.borrow();
    assert_eq!(log.closed, 1);
    assert_eq!(log.opened.last().map(String::as_str), Some("ws://localhost:8080/ws?username=Bob&channel=random"));
}

#[test]
fn logout_disconnects_and_reports_when_idle() {
    let mut h = Harness::new();
    h.run("/connect");
    h.open_active();

    h.run("/logout");
    assert!(!h.hook.state().connected);
    assert!(h.output().is_empty());

    h.run("/logout");
    assert!(h.output().contains("Not connected."));
}

#[test]
fn help_usage_and_unknown_print_feedback() {
    let mut h = Harness::new();
    h.run("/help");
    h.run("/join onlyone");
    h.run("/wat");

    let out = h.output();
    assert!(out.contains("/join <username> <channel>  switch identity or channel"));
    assert!(out.contains("Usage: /join <username> <channel>"));
    assert!(out.contains("Unknown command /wat"));
}

#[test]
fn clear_writes_ansi_reset() {
    let mut h = Harness::new();
    h.run("/clear");
    assert_eq!(h.output(), "\x1b[2J\x1b[H");
}

#[test]
fn quit_stops_the_loop() {
    let mut h = Harness::new();
    assert_eq!(h.run("/quit"), Flow::Quit);
}
