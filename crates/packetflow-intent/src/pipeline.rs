use packetflow_plugin::{Pipeline, Stage, StageError};

use crate::intent::Intent;

/// A single validation or transformation step. Both pipelines share this
/// trait: validation stages typically return the intent unchanged (or
/// reject it), transformation stages typically return a modified
/// intent; the pipeline machinery doesn't distinguish the two, matching
/// `packetflow-plugin::Stage<T>`'s "transform-or-reject" shape.
pub type IntentStage = dyn Stage<Intent>;

/// Validation and transformation are two independent, sorted-once
/// `Pipeline<Intent>` instances — never a shared lookup table — each
/// left-folding an intent through its stages and short-circuiting on
/// the first [`StageError`].
pub struct IntentPipelines {
    validation: Pipeline<Intent>,
    transformation: Pipeline<Intent>,
}

impl IntentPipelines {
    pub fn new(
        validation_stages: Vec<std::sync::Arc<dyn Stage<Intent>>>,
        transformation_stages: Vec<std::sync::Arc<dyn Stage<Intent>>>,
    ) -> Self {
        Self {
            validation: Pipeline::new(validation_stages),
            transformation: Pipeline::new(transformation_stages),
        }
    }

    /// Runs `intent` through validation, then (on success) through
    /// transformation, returning the final intent or the first error
    /// from either stage.
    pub fn run(&self, intent: Intent) -> Result<Intent, StageError> {
        let validated = self.validation.run(intent)?;
        self.transformation.run(validated)
    }
}
