#![deny(missing_docs)]

//! An AWS Lambda function that logs every event it receives and hands it
//! back tagged with one extra attribute.
//!
//! The transformation is available as a plain function, [`handle`], and as
//! an adapter for [`lambda_runtime`], [`function_handler`]. The `bootstrap`
//! binary of this crate wires the former into the runtime with the
//! [`lambda`] attribute.
//!
//! ```no_run
//! use event_transformer::function_handler;
//! use lambda_runtime::service_fn;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     event_transformer::logging::init();
//!     lambda_runtime::run(service_fn(function_handler)).await
//! }
//! ```
use lambda_runtime::LambdaEvent;
use std::io::{self, Write};

pub use crate::{
    error::{Error, Result},
    record::{Event, Record},
};
#[cfg(feature = "derive")]
pub use event_transformer_attributes::lambda;

mod error;
/// Tracing subscriber setup for the function binary.
pub mod logging;
mod record;
/// Rendering of the received-event log line.
pub mod render;

/// Key of the attribute added to every event.
pub const ATTRIBUTE_KEY: &str = "lambda";
/// Value of the attribute added to every event.
pub const ATTRIBUTE_VALUE: &str = "attribute added by lambda function";
/// Prefix of the diagnostic line written for every event.
pub const LOG_PREFIX: &str = "lambda received event: ";

/// Logs `event` to standard output and returns it with [`ATTRIBUTE_KEY`] set
/// to [`ATTRIBUTE_VALUE`].
///
/// The context is accepted for the benefit of the calling convention and is
/// never looked at.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if `event` can't be rendered as JSON.
pub fn handle<R, C>(event: R, _context: C) -> Result<R>
where
    R: Record,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    handle_with(event, &mut out)
}

/// Like [`handle`], writing the diagnostic line to `log` instead of standard
/// output.
///
/// The line reflects the event as received. It is rendered in full before
/// anything is written, so a failing event leaves `log` untouched.
pub fn handle_with<R, W>(mut event: R, log: &mut W) -> Result<R>
where
    R: Record,
    W: Write + ?Sized,
{
    tracing::debug!(keys = event.len(), "received event");
    let line = render::log_line(&event)?;
    log.write_all(&line)?;
    log.flush()?;

    let overwritten = event.set_attribute(ATTRIBUTE_KEY, ATTRIBUTE_VALUE).is_some();
    tracing::debug!(overwritten, key = ATTRIBUTE_KEY, "attribute set");
    Ok(event)
}

/// Adapts [`handle`] to [`lambda_runtime::service_fn`].
pub async fn function_handler(event: LambdaEvent<Event>) -> Result<Event> {
    let (payload, context) = event.into_parts();
    handle(payload, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{ser::Error as _, Serialize, Serializer};
    use serde_json::{json, Map, Value};
    use std::collections::BTreeSet;

    fn event(value: Value) -> Event {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    fn run(input: Value) -> (Event, String) {
        let mut log = Vec::new();
        let out = handle_with(event(input), &mut log).expect("failed to handle event");
        (out, String::from_utf8(log).expect("log is not utf-8"))
    }

    #[test]
    fn empty_event() {
        let (out, _) = run(json!({}));
        assert_eq!(Value::Object(out), json!({ "lambda": "attribute added by lambda function" }));
    }

    #[test]
    fn keeps_existing_keys() {
        let (out, _) = run(json!({ "a": 1, "b": "x" }));
        assert_eq!(
            Value::Object(out),
            json!({ "a": 1, "b": "x", "lambda": "attribute added by lambda function" })
        );
    }

    #[test]
    fn overwrites_existing_attribute() {
        let (out, log) = run(json!({ "lambda": "old" }));
        assert_eq!(Value::Object(out), json!({ "lambda": "attribute added by lambda function" }));
        assert_eq!(log, "lambda received event: {\n  \"lambda\": \"old\"\n}\n");
    }

    #[test]
    fn logs_once_before_mutation() {
        let (_, log) = run(json!({ "a": 1, "b": "x" }));
        assert_eq!(log.matches(LOG_PREFIX).count(), 1);
        assert_eq!(log, "lambda received event: {\n  \"a\": 1,\n  \"b\": \"x\"\n}\n");
    }

    #[test]
    fn key_count_is_union_with_attribute() {
        let inputs = vec![
            json!({}),
            json!({ "lambda": 3 }),
            json!({ "a": [1, 2], "b": { "lambda": "nested" }, "c": null }),
        ];
        for input in inputs {
            let mut expected: BTreeSet<String> = event(input.clone()).keys().cloned().collect();
            expected.insert(ATTRIBUTE_KEY.to_owned());

            let (out, _) = run(input);
            assert_eq!(out.len(), expected.len());
            assert!(out.keys().all(|k| expected.contains(k)));
        }
    }

    #[test]
    fn nested_attribute_is_left_alone() {
        let (out, _) = run(json!({ "b": { "lambda": "nested" } }));
        assert_eq!(out["b"], json!({ "lambda": "nested" }));
    }

    #[test]
    fn second_pass_yields_same_attribute() {
        let (once, _) = run(json!({ "a": true }));
        let (twice, log) = run(Value::Object(once.clone()));
        assert_eq!(once, twice);
        assert!(log.contains("\"lambda\": \"attribute added by lambda function\""));
    }

    #[test]
    fn preserves_key_order() {
        let (out, _) = run(json!({ "z": 1, "lambda": 0, "a": 2 }));
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "lambda", "a"]);
    }

    #[test]
    fn large_integers_pass_through_unchanged() {
        let input: Event =
            serde_json::from_str(r#"{"big": 123456789012345678901234567890, "x": 0.1}"#).unwrap();
        let mut log = Vec::new();
        let out = handle_with(input, &mut log).expect("failed to handle event");

        let log = String::from_utf8(log).unwrap();
        assert!(log.contains("\"big\": 123456789012345678901234567890,"));
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"big":123456789012345678901234567890,"x":0.1,"lambda":"attribute added by lambda function"}"#
        );
    }

    #[test]
    fn handle_accepts_any_context() {
        struct Opaque;
        let out = handle(event(json!({ "a": 1 })), Opaque).expect("failed to handle event");
        assert_eq!(out[ATTRIBUTE_KEY], json!(ATTRIBUTE_VALUE));
    }

    /// A record holding a value with no JSON representation.
    #[derive(Debug)]
    struct Cyclic(Map<String, Value>);

    impl Serialize for Cyclic {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("cycle detected"))
        }
    }

    impl Record for Cyclic {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn set_attribute(&mut self, key: &str, value: &str) -> Option<Value> {
            self.0.set_attribute(key, value)
        }
    }

    #[test]
    fn unserializable_event_fails_without_logging() {
        let mut log = Vec::new();
        let err = handle_with(Cyclic(Map::new()), &mut log).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(err.name(), "SerializationError");
        assert!(log.is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_a_serialization_error() {
        let err = handle_with(event(json!({})), &mut BrokenPipe).unwrap_err();
        assert!(matches!(err, Error::Serialization(ref e) if e.is_io()));
    }

    #[tokio::test]
    async fn function_handler_tags_payload() {
        let invocation = LambdaEvent::new(event(json!({ "a": 1 })), lambda_runtime::Context::default());
        let out = function_handler(invocation).await.expect("failed to handle event");
        assert_eq!(Value::Object(out), json!({ "a": 1, "lambda": "attribute added by lambda function" }));
    }
}
