use crate::{Document, pipeline::Stage};
use serde::Serialize;
use serde_json::Value;

///
/// Pipeline
///
/// Compiled, executable pipeline description for one source collection.
/// The core assembles it; an external [`PipelineExecutor`] runs it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    /// Source collection the pipeline runs against.
    pub collection: String,
    /// Ordered stages.
    pub stages: Vec<Stage>,
    /// Executor may spill intermediate results to disk.
    pub allow_disk_use: bool,
}

impl Pipeline {
    #[must_use]
    pub const fn new(collection: String) -> Self {
        Self {
            collection,
            stages: Vec::new(),
            allow_disk_use: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Operator names in stage order (`["$match", "$lookup", ...]`).
    #[must_use]
    pub fn operators(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::operator).collect()
    }

    /// Stage array in the store's JSON syntax.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.stages)
    }

    /// Hand the pipeline to an executor; its errors surface unchanged.
    pub fn exec<E>(&self, executor: &E) -> Result<Vec<Document>, E::Error>
    where
        E: PipelineExecutor + ?Sized,
    {
        executor.aggregate(self)
    }
}

///
/// PipelineExecutor
///
/// Store-side aggregation engine. The core never executes pipelines itself.
///

pub trait PipelineExecutor {
    type Error;

    fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<Document>, Self::Error>;
}
