// Text commands as a language model would send them.

use std::io;
use std::sync::{Arc, Mutex};

use minigrid_text_core::{Action, ActionParseError, parse_action};

#[test]
fn every_keyword_maps_to_its_id() {
    let expected = [
        ("left", 0),
        ("right", 1),
        ("forward", 2),
        ("pickup", 3),
        ("drop", 4),
        ("toggle", 5),
        ("done", 6),
    ];
    for (word, id) in expected {
        assert_eq!(parse_action(word).unwrap().id(), id);
    }
}

#[test]
fn model_output_noise_is_tolerated() {
    assert_eq!(parse_action(" Forward \n"), Ok(Action::Forward));
    assert_eq!(parse_action("DONE"), Ok(Action::Done));
    assert_eq!(parse_action("\r\ntoggle\t"), Ok(Action::Toggle));
}

#[test]
fn anything_else_is_rejected() {
    for text in ["jump", "move forward", "pick up", "forward.", "l", "  "] {
        let err = parse_action(text).unwrap_err();
        assert_eq!(err, ActionParseError::Unrecognized(text.trim().to_lowercase()));
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn rejected_commands_are_logged_as_warnings() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        assert!(parse_action("forward").is_ok());
        assert!(parse_action(" Jump ").is_err());
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert_eq!(output.lines().count(), 1, "{output}");
    assert!(output.contains("WARN"));
    assert!(output.contains("rejected action command"));
    assert!(output.contains("command=jump"));
}
