use serde_json::Value;

use crate::error::IntentError;
use crate::intent::{Composition, Intent};

/// Runs a composite intent's nested `intents` under its declared
/// [`Composition`] strategy, calling `process` once per leaf intent.
/// `process` stands in for whatever actually executes an intent
/// (reactor dispatch, delegation, a test double); this crate only knows
/// the composition contract, not how a single intent gets processed.
///
/// `predicate` is consulted only for [`Composition::Conditional`] and is
/// otherwise ignored.
pub fn run_composite(
    composite: &Intent,
    process: &dyn Fn(&Intent) -> Result<Value, IntentError>,
    predicate: Option<&dyn Fn(&[Value]) -> bool>,
) -> Result<Value, IntentError> {
    let strategy = composite.composition.ok_or(IntentError::NoComponentsWithCapability)?;
    match strategy {
        Composition::Sequential => run_sequential(&composite.intents, process),
        Composition::Parallel => run_parallel(&composite.intents, process),
        Composition::Conditional => {
            let predicate = predicate.ok_or(IntentError::MissingPredicate)?;
            run_conditional(&composite.intents, process, predicate)
        }
        Composition::Pipeline => run_pipeline(&composite.intents, process),
        Composition::FanOut => run_fan_out(&composite.intents, process),
    }
}

/// Runs intents in order, stopping on the first error. Result is the
/// ordered list of successes produced before the failure.
fn run_sequential(
    intents: &[Intent],
    process: &dyn Fn(&Intent) -> Result<Value, IntentError>,
) -> Result<Value, IntentError> {
    let mut results = Vec::with_capacity(intents.len());
    for intent in intents {
        results.push(process(intent)?);
    }
    Ok(Value::Array(results))
}

/// Runs every intent, succeeding only if all succeed; on failure,
/// returns the first error in intent order (not wall-clock completion
/// order, since `process` is synchronous here).
fn run_parallel(
    intents: &[Intent],
    process: &dyn Fn(&Intent) -> Result<Value, IntentError>,
) -> Result<Value, IntentError> {
    let mut results = Vec::with_capacity(intents.len());
    for intent in intents {
        results.push(process(intent)?);
    }
    Ok(Value::Array(results))
}

/// Runs intents in order, accumulating results, stopping (without
/// error) as soon as `predicate` rejects the accumulated list so far.
fn run_conditional(
    intents: &[Intent],
    process: &dyn Fn(&Intent) -> Result<Value, IntentError>,
    predicate: &dyn Fn(&[Value]) -> bool,
) -> Result<Value, IntentError> {
    let mut results = Vec::with_capacity(intents.len());
    for intent in intents {
        if !predicate(&results) {
            break;
        }
        results.push(process(intent)?);
    }
    Ok(Value::Array(results))
}

/// Runs intents in order, threading each result into the next intent's
/// payload under an added `context` key. Result is the last intent's
/// output.
fn run_pipeline(
    intents: &[Intent],
    process: &dyn Fn(&Intent) -> Result<Value, IntentError>,
) -> Result<Value, IntentError> {
    let mut last = Value::Null;
    for intent in intents {
        let staged = intent.with_payload_entry("context", last.clone());
        last = process(&staged)?;
    }
    Ok(last)
}

/// Runs every intent, wrapping the aggregated results as
/// `{type: "fan_out", results: [..]}`.
fn run_fan_out(
    intents: &[Intent],
    process: &dyn Fn(&Intent) -> Result<Value, IntentError>,
) -> Result<Value, IntentError> {
    let mut results = Vec::with_capacity(intents.len());
    for intent in intents {
        results.push(process(intent)?);
    }
    Ok(serde_json::json!({ "type": "fan_out", "results": results }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{create_composite_intent, create_intent, IntentIdFactory};
    use packetflow_temporal::FixedClock;
    use std::collections::BTreeMap;

    fn leaf(ids: &IntentIdFactory, clock: &FixedClock, n: i64) -> Intent {
        let mut payload = BTreeMap::new();
        payload.insert("n".to_string(), Value::from(n));
        create_intent(ids, clock, "step", payload, vec![])
    }

    fn ok_process(intent: &Intent) -> Result<Value, IntentError> {
        Ok(intent.payload.get("n").cloned().unwrap_or(Value::Null))
    }

    #[test]
    fn sequential_stops_on_first_error() {
        let ids = IntentIdFactory::new();
        let clock = FixedClock::new(chrono::Utc::now());
        let intents = vec![leaf(&ids, &clock, 1), leaf(&ids, &clock, 2)];
        let composite = create_composite_intent(&ids, &clock, "batch", intents, Composition::Sequential);

        let calls = std::cell::RefCell::new(0);
        let process = |_intent: &Intent| -> Result<Value, IntentError> {
            *calls.borrow_mut() += 1;
            Err(IntentError::ProcessingFailed("step".into(), "boom".into()))
        };
        let err = run_composite(&composite, &process, None).unwrap_err();
        assert!(matches!(err, IntentError::ProcessingFailed(_, _)));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn pipeline_threads_previous_result_as_context() {
        let ids = IntentIdFactory::new();
        let clock = FixedClock::new(chrono::Utc::now());
        let intents = vec![leaf(&ids, &clock, 1), leaf(&ids, &clock, 2)];
        let composite = create_composite_intent(&ids, &clock, "batch", intents, Composition::Pipeline);

        let process = |intent: &Intent| -> Result<Value, IntentError> {
            let context = intent.payload.get("context").cloned().unwrap_or(Value::Null);
            let n = intent.payload.get("n").and_then(Value::as_i64).unwrap_or(0);
            Ok(serde_json::json!({ "n": n, "saw_context": context }))
        };
        let result = run_composite(&composite, &process, None).unwrap();
        assert_eq!(result["saw_context"], Value::Null);

        let ids2 = IntentIdFactory::new();
        let intents2 = vec![leaf(&ids2, &clock, 10), leaf(&ids2, &clock, 20)];
        let composite2 = create_composite_intent(&ids2, &clock, "batch", intents2, Composition::Pipeline);
        let result2 = run_composite(&composite2, &process, None).unwrap();
        assert_eq!(result2["n"], Value::from(20));
        assert_ne!(result2["saw_context"], Value::Null);
    }

    #[test]
    fn conditional_stops_when_predicate_goes_false() {
        let ids = IntentIdFactory::new();
        let clock = FixedClock::new(chrono::Utc::now());
        let intents = vec![leaf(&ids, &clock, 1), leaf(&ids, &clock, 2), leaf(&ids, &clock, 3)];
        let composite = create_composite_intent(&ids, &clock, "batch", intents, Composition::Conditional);

        let predicate = |accumulated: &[Value]| accumulated.len() < 2;
        let result = run_composite(&composite, &ok_process, Some(&predicate)).unwrap();
        assert_eq!(result.as_array().unwrap().len(), 2);
    }

    #[test]
    fn fan_out_wraps_aggregated_results() {
        let ids = IntentIdFactory::new();
        let clock = FixedClock::new(chrono::Utc::now());
        let intents = vec![leaf(&ids, &clock, 1), leaf(&ids, &clock, 2)];
        let composite = create_composite_intent(&ids, &clock, "batch", intents, Composition::FanOut);

        let result = run_composite(&composite, &ok_process, None).unwrap();
        assert_eq!(result["type"], Value::from("fan_out"));
        assert_eq!(result["results"].as_array().unwrap().len(), 2);
    }
}
