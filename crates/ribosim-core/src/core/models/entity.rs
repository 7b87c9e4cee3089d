use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Ribosome,
    Mrna,
    Protein,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Ribosome, EntityKind::Mrna, EntityKind::Protein];

    /// The label used for this kind in keys and trajectory output.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Ribosome => "Ribosome",
            EntityKind::Mrna => "MRNA",
            EntityKind::Protein => "Protein",
        }
    }

    /// Builds the registry key for the `index`-th entity of this kind, e.g. `MRNA_3`.
    pub fn key_for(&self, index: usize) -> String {
        format!("{}_{}", self.label(), index)
    }
}

#[derive(Debug, Error)]
#[error("Invalid entity kind string")]
pub struct ParseEntityKindError;

impl FromStr for EntityKind {
    type Err = ParseEntityKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ribosome" => Ok(EntityKind::Ribosome),
            "mrna" => Ok(EntityKind::Mrna),
            "protein" => Ok(EntityKind::Protein),
            _ => Err(ParseEntityKindError),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ribosome {
    pub index: usize,
    pub key: String,
    pub bound_to: Option<String>, // Key of the mRNA currently being translated
}

impl Ribosome {
    pub fn new(index: usize, key: &str) -> Self {
        Self {
            index,
            key: key.to_string(),
            bound_to: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.bound_to.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mrna {
    pub index: usize,
    pub key: String,
    pub sequence: String,
    pub position: usize,                // Nucleotide offset of the next codon to read
    pub nascent_peptide: String,        // Amino acids read so far in the current frame
    pub bound_ribosome: Option<String>, // Key of the ribosome reading this strand
    pub translations_completed: usize,
}

impl Mrna {
    pub fn new(index: usize, key: &str, sequence: &str) -> Self {
        Self {
            index,
            key: key.to_string(),
            sequence: sequence.to_string(),
            position: 0,
            nascent_peptide: String::new(),
            bound_ribosome: None,
            translations_completed: 0,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound_ribosome.is_some()
    }

    /// Returns the strand to its unread state, dropping any partial peptide.
    pub fn reset_frame(&mut self) {
        self.position = 0;
        self.nascent_peptide.clear();
        self.bound_ribosome = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protein {
    pub index: usize,
    pub key: String,
    pub sequence: String,    // One-letter amino acid sequence
    pub source_mrna: String, // Key of the mRNA the protein was translated from
}

impl Protein {
    pub fn new(index: usize, key: &str, sequence: &str, source_mrna: &str) -> Self {
        Self {
            index,
            key: key.to_string(),
            sequence: sequence.to_string(),
            source_mrna: source_mrna.to_string(),
        }
    }
}

/// A molecule instance held in the registry.
///
/// Every variant carries an integer index and its registry key, exposed through
/// [`Entity::index`] and [`Entity::key`] so that the registry and the trajectory
/// logger can treat entities uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
    Ribosome(Ribosome),
    Mrna(Mrna),
    Protein(Protein),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Ribosome(_) => EntityKind::Ribosome,
            Entity::Mrna(_) => EntityKind::Mrna,
            Entity::Protein(_) => EntityKind::Protein,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Entity::Ribosome(r) => &r.key,
            Entity::Mrna(m) => &m.key,
            Entity::Protein(p) => &p.key,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Entity::Ribosome(r) => r.index,
            Entity::Mrna(m) => m.index,
            Entity::Protein(p) => p.index,
        }
    }

    pub fn as_ribosome(&self) -> Option<&Ribosome> {
        match self {
            Entity::Ribosome(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_ribosome_mut(&mut self) -> Option<&mut Ribosome> {
        match self {
            Entity::Ribosome(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_mrna(&self) -> Option<&Mrna> {
        match self {
            Entity::Mrna(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mrna_mut(&mut self) -> Option<&mut Mrna> {
        match self {
            Entity::Mrna(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_protein(&self) -> Option<&Protein> {
        match self {
            Entity::Protein(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Ribosome> for Entity {
    fn from(r: Ribosome) -> Self {
        Entity::Ribosome(r)
    }
}

impl From<Mrna> for Entity {
    fn from(m: Mrna) -> Self {
        Entity::Mrna(m)
    }
}

impl From<Protein> for Entity {
    fn from(p: Protein) -> Self {
        Entity::Protein(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_build_registry_keys() {
        assert_eq!(EntityKind::Mrna.key_for(7), "MRNA_7");
        assert_eq!(EntityKind::Ribosome.key_for(0), "Ribosome_0");
        assert_eq!(EntityKind::Protein.key_for(12), "Protein_12");
    }

    #[test]
    fn kind_round_trips_through_display_and_from_str() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
        assert!("lipid".parse::<EntityKind>().is_err());
    }

    #[test]
    fn shared_accessors_work_across_variants() {
        let entities: Vec<Entity> = vec![
            Ribosome::new(1, "Ribosome_1").into(),
            Mrna::new(2, "MRNA_2", "AUGUAA").into(),
            Protein::new(3, "Protein_3", "M", "MRNA_2").into(),
        ];

        let summary: Vec<_> = entities
            .iter()
            .map(|e| (e.kind(), e.key(), e.index()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (EntityKind::Ribosome, "Ribosome_1", 1),
                (EntityKind::Mrna, "MRNA_2", 2),
                (EntityKind::Protein, "Protein_3", 3),
            ]
        );
    }

    #[test]
    fn typed_accessors_only_match_their_variant() {
        let mut entity: Entity = Mrna::new(0, "MRNA_0", "UUU").into();
        assert!(entity.as_ribosome().is_none());
        assert!(entity.as_protein().is_none());
        entity.as_mrna_mut().unwrap().position = 3;
        assert_eq!(entity.as_mrna().unwrap().position, 3);
    }

    #[test]
    fn reset_frame_clears_translation_state() {
        let mut mrna = Mrna::new(0, "MRNA_0", "UUUUAA");
        mrna.position = 3;
        mrna.nascent_peptide.push('F');
        mrna.bound_ribosome = Some("Ribosome_0".to_string());
        mrna.translations_completed = 2;

        mrna.reset_frame();

        assert_eq!(mrna.position, 0);
        assert!(mrna.nascent_peptide.is_empty());
        assert!(!mrna.is_bound());
        assert_eq!(mrna.translations_completed, 2);
    }
}
