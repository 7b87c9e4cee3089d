use super::error::EngineError;
use crate::core::models::entity::{Entity, EntityKind};
use crate::core::registry::EntityRegistry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The full registry contents at the end of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub step: u64,
    pub entities: Vec<(String, Entity)>,
}

impl Snapshot {
    pub fn capture(step: u64, registry: &EntityRegistry) -> Self {
        Self {
            step,
            entities: registry.snapshot(),
        }
    }
}

/// Consolidated time series derived from a trajectory.
///
/// Every series has one value per logged snapshot, aligned with `steps`. Kinds or
/// protein sequences absent from a snapshot count as zero there.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrajectoryOutput {
    /// Step number of each logged snapshot.
    pub steps: Vec<u64>,
    /// Entity kind label (`Ribosome`, `MRNA`, `Protein`) to entity count per step.
    pub entity_counts: BTreeMap<String, Vec<usize>>,
    /// Protein amino acid sequence to number of proteins with that sequence per step.
    pub protein_counts: BTreeMap<String, Vec<usize>>,
    /// Ribosomes bound to an mRNA per step.
    pub bound_ribosomes: Vec<usize>,
}

/// Append-only store of per-step snapshots.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryLogger {
    snapshots: Vec<Snapshot>,
}

impl TrajectoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Assembles the recorded trajectory into per-kind time series.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoData`] if no snapshot has been recorded.
    pub fn output(&self) -> Result<TrajectoryOutput, EngineError> {
        if self.snapshots.is_empty() {
            return Err(EngineError::NoData);
        }

        let sequences: BTreeSet<&str> = self
            .snapshots
            .iter()
            .flat_map(|snapshot| snapshot.entities.iter())
            .filter_map(|(_, entity)| entity.as_protein())
            .map(|protein| protein.sequence.as_str())
            .collect();

        let n = self.snapshots.len();
        let mut output = TrajectoryOutput {
            steps: Vec::with_capacity(n),
            entity_counts: EntityKind::ALL
                .iter()
                .map(|kind| (kind.label().to_string(), vec![0; n]))
                .collect(),
            protein_counts: sequences
                .iter()
                .map(|sequence| (sequence.to_string(), vec![0; n]))
                .collect(),
            bound_ribosomes: vec![0; n],
        };

        for (t, snapshot) in self.snapshots.iter().enumerate() {
            output.steps.push(snapshot.step);
            for (_, entity) in &snapshot.entities {
                if let Some(series) = output.entity_counts.get_mut(entity.kind().label()) {
                    series[t] += 1;
                }
                match entity {
                    Entity::Protein(protein) => {
                        if let Some(series) = output.protein_counts.get_mut(&protein.sequence) {
                            series[t] += 1;
                        }
                    }
                    Entity::Ribosome(ribosome) if !ribosome.is_free() => {
                        output.bound_ribosomes[t] += 1;
                    }
                    _ => {}
                }
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::entity::{Mrna, Protein, Ribosome};

    fn snapshot(step: u64, entities: Vec<Entity>) -> Snapshot {
        Snapshot {
            step,
            entities: entities
                .into_iter()
                .map(|e| (e.key().to_string(), e))
                .collect(),
        }
    }

    fn bound_ribosome(index: usize, mrna: &str) -> Entity {
        let mut ribosome = Ribosome::new(index, &EntityKind::Ribosome.key_for(index));
        ribosome.bound_to = Some(mrna.to_string());
        ribosome.into()
    }

    #[test]
    fn output_on_empty_trajectory_is_no_data() {
        let logger = TrajectoryLogger::new();
        assert!(logger.is_empty());
        assert_eq!(logger.output(), Err(EngineError::NoData));
    }

    #[test]
    fn output_builds_aligned_series() {
        let mut logger = TrajectoryLogger::new();
        logger.add_step(snapshot(
            1,
            vec![
                bound_ribosome(0, "MRNA_0"),
                Ribosome::new(1, "Ribosome_1").into(),
                Mrna::new(0, "MRNA_0", "UUUUAA").into(),
            ],
        ));
        logger.add_step(snapshot(
            2,
            vec![
                Ribosome::new(0, "Ribosome_0").into(),
                Ribosome::new(1, "Ribosome_1").into(),
                Mrna::new(0, "MRNA_0", "UUUUAA").into(),
                Protein::new(0, "Protein_0", "F", "MRNA_0").into(),
                Protein::new(1, "Protein_1", "MF", "MRNA_0").into(),
                Protein::new(2, "Protein_2", "F", "MRNA_0").into(),
            ],
        ));

        let output = logger.output().unwrap();

        assert_eq!(output.steps, vec![1, 2]);
        assert_eq!(output.entity_counts["Ribosome"], vec![2, 2]);
        assert_eq!(output.entity_counts["MRNA"], vec![1, 1]);
        assert_eq!(output.entity_counts["Protein"], vec![0, 3]);
        assert_eq!(output.protein_counts["F"], vec![0, 2]);
        assert_eq!(output.protein_counts["MF"], vec![0, 1]);
        assert_eq!(output.bound_ribosomes, vec![1, 0]);
    }

    #[test]
    fn every_kind_label_is_present_even_when_absent() {
        let mut logger = TrajectoryLogger::new();
        logger.add_step(snapshot(1, vec![]));

        let output = logger.output().unwrap();

        let labels: Vec<&str> = output.entity_counts.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["MRNA", "Protein", "Ribosome"]);
        assert!(output.entity_counts.values().all(|series| series == &vec![0]));
        assert!(output.protein_counts.is_empty());
    }

    #[test]
    fn output_is_idempotent() {
        let mut logger = TrajectoryLogger::new();
        logger.add_step(snapshot(1, vec![Ribosome::new(0, "Ribosome_0").into()]));

        assert_eq!(logger.output().unwrap(), logger.output().unwrap());
        assert_eq!(logger.len(), 1);
    }

    #[test]
    fn recorded_snapshots_are_independent_of_the_registry() {
        let mut registry = EntityRegistry::new();
        registry
            .register("Ribosome_0", Ribosome::new(0, "Ribosome_0").into())
            .unwrap();
        let mut logger = TrajectoryLogger::new();
        logger.add_step(Snapshot::capture(1, &registry));

        registry
            .register("Ribosome_1", Ribosome::new(1, "Ribosome_1").into())
            .unwrap();
        logger.add_step(Snapshot::capture(2, &registry));

        assert_eq!(logger.snapshots()[0].entities.len(), 1);
        assert_eq!(logger.snapshots()[1].entities.len(), 2);
        assert_eq!(logger.output().unwrap().entity_counts["Ribosome"], vec![1, 2]);
    }

    #[test]
    fn output_serializes_with_stable_field_names() {
        let mut logger = TrajectoryLogger::new();
        logger.add_step(snapshot(1, vec![Ribosome::new(0, "Ribosome_0").into()]));

        let json = serde_json::to_value(logger.output().unwrap()).unwrap();

        assert_eq!(json["steps"], serde_json::json!([1]));
        assert_eq!(json["entity_counts"]["Ribosome"], serde_json::json!([1]));
        assert_eq!(json["bound_ribosomes"], serde_json::json!([0]));
        assert!(json["protein_counts"].as_object().unwrap().is_empty());
    }
}
