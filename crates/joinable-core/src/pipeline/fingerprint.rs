//! Deterministic pipeline fingerprinting over the stage contents.

use crate::pipeline::{Pipeline, Stage};
use serde_json::Value;
use sha2::{Digest, Sha256};

///
/// PipelineFingerprint
///
/// Stable, deterministic fingerprint for compiled pipelines.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PipelineFingerprint([u8; 32]);

impl PipelineFingerprint {
    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl std::fmt::Display for PipelineFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl Pipeline {
    /// Compute a stable fingerprint for this pipeline.
    #[must_use]
    pub fn fingerprint(&self) -> PipelineFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"pipefp:v2");

        write_tag(&mut hasher, 0x01);
        write_str(&mut hasher, &self.collection);

        write_tag(&mut hasher, 0x02);
        for stage in &self.stages {
            write_str(&mut hasher, stage.operator());
            write_stage(&mut hasher, stage);
        }

        write_tag(&mut hasher, 0x03);
        write_tag(&mut hasher, u8::from(self.allow_disk_use));

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        PipelineFingerprint(out)
    }
}

fn write_stage(hasher: &mut Sha256, stage: &Stage) {
    match stage {
        // Criteria maps are key-ordered, so their JSON text is canonical.
        Stage::Match(criteria) => {
            write_str(hasher, &Value::Object(criteria.clone()).to_string());
        }
        Stage::Lookup(lookup) => {
            write_str(hasher, &lookup.from);
            write_str(hasher, &lookup.local_field);
            write_str(hasher, &lookup.foreign_field);
            write_str(hasher, &lookup.as_name);
        }
        Stage::Unwind(unwind) => {
            write_str(hasher, &unwind.path);
            write_tag(hasher, u8::from(unwind.preserve_null_and_empty_arrays));
        }
    }
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

fn write_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}
