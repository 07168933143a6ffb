use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error raised by a single [`Stage`], carrying the stage's name so a
/// caller can tell which pipeline member rejected the item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageError {
    pub stage: String,
    pub message: String,
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage '{}' rejected item: {}", self.stage, self.message)
    }
}

impl std::error::Error for StageError {}

/// A single step in a priority-ordered pipeline, generic over the item
/// type so this crate never needs to depend on `packetflow-intent` (or
/// any other consumer crate) to define the pipeline machinery those
/// crates plug into.
pub trait Stage<T>: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, item: T) -> Result<T, StageError>;
}

/// Priority-ordered pipeline of stages, sorted once at construction
/// (descending priority, ties broken by registration order) rather
/// than re-sorted per call — mutating the pipeline means rebuilding it.
pub struct Pipeline<T> {
    stages: Vec<Arc<dyn Stage<T>>>,
}

impl<T> Pipeline<T> {
    pub fn new(mut stages: Vec<Arc<dyn Stage<T>>>) -> Self {
        stages.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Left-folds `item` through every stage, stopping at the first
    /// error.
    pub fn run(&self, item: T) -> Result<T, StageError> {
        self.stages.iter().try_fold(item, |acc, stage| stage.apply(acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AddOne;
    impl Stage<i32> for AddOne {
        fn name(&self) -> &str {
            "add_one"
        }
        fn priority(&self) -> i32 {
            10
        }
        fn apply(&self, item: i32) -> Result<i32, StageError> {
            Ok(item + 1)
        }
    }

    struct RejectNegative;
    impl Stage<i32> for RejectNegative {
        fn name(&self) -> &str {
            "reject_negative"
        }
        fn priority(&self) -> i32 {
            100
        }
        fn apply(&self, item: i32) -> Result<i32, StageError> {
            if item < 0 {
                Err(StageError {
                    stage: self.name().to_string(),
                    message: "negative value".to_string(),
                })
            } else {
                Ok(item)
            }
        }
    }

    #[test]
    fn higher_priority_stage_runs_first() {
        let pipeline = Pipeline::new(vec![Arc::new(AddOne), Arc::new(RejectNegative)]);
        let result = pipeline.run(-5);
        assert!(result.is_err());
    }

    #[test]
    fn pipeline_short_circuits_on_first_error() {
        let pipeline = Pipeline::new(vec![Arc::new(RejectNegative), Arc::new(AddOne)]);
        assert!(pipeline.run(-1).is_err());
        assert_eq!(pipeline.run(1).unwrap(), 2);
    }
}
