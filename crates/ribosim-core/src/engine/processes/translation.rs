use crate::core::models::codon::{self, CODON_LENGTH, Codon};
use crate::core::models::entity::{Entity, EntityKind, Mrna, Protein, Ribosome};
use crate::core::registry::EntityRegistry;
use crate::engine::config::ConfigError;
use crate::engine::error::EngineError;
use crate::engine::process::{Configure, Process};
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

pub const TRANSLATION_PROCESS_NAME: &str = "Translation";

/// The registry keys a translation process may use, in tie-break order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationConfig {
    pub mrna_keys: Vec<String>,
    pub ribosome_keys: Vec<String>,
}

/// Tally of what happened during the most recent update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationEvents {
    pub initiations: usize,
    pub elongations: usize,
    pub terminations: usize,
    pub aborted: usize,
    /// Ribosomes freed because the strand they were bound to left the registry.
    pub released: usize,
}

impl TranslationEvents {
    /// Codon reads performed by bound ribosomes. Each bound ribosome reads at most once
    /// per update, so this never exceeds the configured ribosome count.
    pub fn ribosome_events(&self) -> usize {
        self.elongations + self.terminations + self.aborted
    }
}

enum ReadOutcome {
    Elongated,
    Terminated { peptide: String },
    Aborted,
}

/// Ribosomes translating mRNA strands into proteins.
///
/// Each update runs two phases over the configured keys:
///
/// 1. **Reading.** Every bound mRNA, in configured order, has its next codon read by
///    its ribosome. A sense codon extends the nascent peptide. A stop codon releases
///    the ribosome and registers a new [`Protein`] under a fresh `Protein_{n}` key. A
///    missing or malformed codon releases the ribosome and discards the peptide.
/// 2. **Initiation.** Free ribosomes, in configured order, bind to unbound mRNAs whose
///    first codon is a sense codon. The scan over mRNAs starts just after the last
///    strand that received a ribosome, so under contention every strand is served in
///    turn rather than the first few monopolising the pool.
///
/// Strands that cannot start a frame stay idle without error. A configured strand that
/// is no longer in the registry counts as degraded: it is skipped, and a ribosome still
/// bound to it is released before the reading phase.
#[derive(Debug, Clone)]
pub struct Translation {
    id: u32,
    name: String,
    config: Option<TranslationConfig>,
    next_protein_index: usize,
    initiation_cursor: usize,
    last_events: TranslationEvents,
    proteins_created: usize,
}

impl Translation {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            config: None,
            next_protein_index: 0,
            initiation_cursor: 0,
            last_events: TranslationEvents::default(),
            proteins_created: 0,
        }
    }

    pub fn config(&self) -> Option<&TranslationConfig> {
        self.config.as_ref()
    }

    pub fn events_last_update(&self) -> TranslationEvents {
        self.last_events
    }

    pub fn proteins_created(&self) -> usize {
        self.proteins_created
    }

    fn validate_keys(
        config: &TranslationConfig,
        registry: &EntityRegistry,
    ) -> Result<(), EngineError> {
        for key in &config.mrna_keys {
            if let Ok(entity) = registry.get(key) {
                expect_kind(entity, key, EntityKind::Mrna)?;
            }
        }
        for key in &config.ribosome_keys {
            expect_kind(registry.get(key)?, key, EntityKind::Ribosome)?;
        }
        Ok(())
    }

    fn release_orphaned(
        config: &TranslationConfig,
        registry: &mut EntityRegistry,
        events: &mut TranslationEvents,
    ) -> Result<(), EngineError> {
        for key in &config.ribosome_keys {
            let Some(strand) = ribosome_ref(registry, key)?.bound_to.clone() else {
                continue;
            };
            let still_bound = registry
                .get(&strand)
                .ok()
                .and_then(Entity::as_mrna)
                .is_some_and(|m| m.bound_ribosome.as_deref() == Some(key.as_str()));
            if !still_bound {
                ribosome_mut(registry, key)?.bound_to = None;
                events.released += 1;
                debug!(ribosome = %key, mrna = %strand, "Strand degraded; ribosome released.");
            }
        }
        Ok(())
    }

    fn read_phase(
        &mut self,
        registry: &mut EntityRegistry,
        events: &mut TranslationEvents,
    ) -> Result<(), EngineError> {
        let Some(config) = &self.config else {
            return Err(self.not_configured());
        };

        for mrna_key in &config.mrna_keys {
            if !registry.contains(mrna_key) {
                continue;
            }
            let mrna = mrna_mut(registry, mrna_key)?;
            let Some(ribosome_key) = mrna.bound_ribosome.clone() else {
                continue;
            };

            let outcome = match codon::read_codon(&mrna.sequence, mrna.position) {
                Some(Codon::Sense(amino_acid)) => {
                    mrna.nascent_peptide.push(amino_acid);
                    mrna.position += CODON_LENGTH;
                    ReadOutcome::Elongated
                }
                Some(Codon::Stop) => {
                    let peptide = std::mem::take(&mut mrna.nascent_peptide);
                    mrna.translations_completed += 1;
                    mrna.reset_frame();
                    ReadOutcome::Terminated { peptide }
                }
                None => {
                    trace!(
                        mrna = %mrna_key,
                        position = mrna.position,
                        "No readable codon; releasing ribosome."
                    );
                    mrna.reset_frame();
                    ReadOutcome::Aborted
                }
            };

            match outcome {
                ReadOutcome::Elongated => events.elongations += 1,
                ReadOutcome::Terminated { peptide } => {
                    ribosome_mut(registry, &ribosome_key)?.bound_to = None;
                    events.terminations += 1;
                    if !peptide.is_empty() {
                        let key = fresh_protein_key(registry, &mut self.next_protein_index);
                        let index = self.next_protein_index;
                        self.next_protein_index += 1;
                        registry.register(&key, Protein::new(index, &key, &peptide, mrna_key).into())?;
                        self.proteins_created += 1;
                        debug!(protein = %key, sequence = %peptide, mrna = %mrna_key, "Protein released.");
                    }
                }
                ReadOutcome::Aborted => {
                    ribosome_mut(registry, &ribosome_key)?.bound_to = None;
                    events.aborted += 1;
                }
            }
        }
        Ok(())
    }

    fn initiation_phase(
        &mut self,
        registry: &mut EntityRegistry,
        events: &mut TranslationEvents,
    ) -> Result<(), EngineError> {
        let Some(config) = &self.config else {
            return Err(self.not_configured());
        };

        let mut free_ribosomes = Vec::new();
        for key in &config.ribosome_keys {
            if ribosome_ref(registry, key)?.is_free() {
                free_ribosomes.push(key.as_str());
            }
        }
        let mut free_ribosomes = free_ribosomes.into_iter();

        let total = config.mrna_keys.len();
        let start = self.initiation_cursor;
        let mut next_cursor = start;
        for offset in 0..total {
            let slot = (start + offset) % total;
            let mrna_key = &config.mrna_keys[slot];
            if !registry.contains(mrna_key) {
                continue;
            }
            let mrna = mrna_ref(registry, mrna_key)?;
            if mrna.is_bound() || !is_translatable(mrna) {
                continue;
            }
            let Some(ribosome_key) = free_ribosomes.next() else {
                break;
            };

            ribosome_mut(registry, ribosome_key)?.bound_to = Some(mrna_key.clone());
            mrna_mut(registry, mrna_key)?.bound_ribosome = Some(ribosome_key.to_string());
            events.initiations += 1;
            next_cursor = (slot + 1) % total;
        }
        self.initiation_cursor = next_cursor;
        Ok(())
    }

    fn not_configured(&self) -> EngineError {
        EngineError::NotConfigured {
            process: self.name.clone(),
        }
    }
}

impl Default for Translation {
    fn default() -> Self {
        Self::new(1, TRANSLATION_PROCESS_NAME)
    }
}

impl Configure for Translation {
    type Config = TranslationConfig;

    fn configure(&mut self, config: TranslationConfig) -> Result<(), EngineError> {
        if self.config.is_some() {
            return Err(EngineError::AlreadyConfigured {
                process: self.name.clone(),
            });
        }
        reject_duplicates("mrna_keys", &config.mrna_keys)?;
        reject_duplicates("ribosome_keys", &config.ribosome_keys)?;
        debug!(
            process = %self.name,
            mrnas = config.mrna_keys.len(),
            ribosomes = config.ribosome_keys.len(),
            "Translation configured."
        );
        self.config = Some(config);
        Ok(())
    }
}

impl Process for Translation {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    #[instrument(skip_all, name = "translation_update", fields(process = %self.name))]
    fn update(&mut self, registry: &mut EntityRegistry) -> Result<(), EngineError> {
        let Some(config) = &self.config else {
            return Err(self.not_configured());
        };
        Self::validate_keys(config, registry)?;

        let mut events = TranslationEvents::default();
        Self::release_orphaned(config, registry, &mut events)?;
        self.read_phase(registry, &mut events)?;
        self.initiation_phase(registry, &mut events)?;
        self.last_events = events;

        trace!(?events, "Translation update finished.");
        Ok(())
    }
}

fn is_translatable(mrna: &Mrna) -> bool {
    matches!(codon::read_codon(&mrna.sequence, 0), Some(Codon::Sense(_)))
}

fn fresh_protein_key(registry: &EntityRegistry, next_index: &mut usize) -> String {
    loop {
        let key = EntityKind::Protein.key_for(*next_index);
        if !registry.contains(&key) {
            return key;
        }
        *next_index += 1;
    }
}

fn reject_duplicates(parameter: &'static str, keys: &[String]) -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key.as_str()) {
            return Err(ConfigError::InvalidParameter {
                parameter,
                reason: format!("key '{}' is listed more than once", key),
            }
            .into());
        }
    }
    Ok(())
}

fn expect_kind(entity: &Entity, key: &str, expected: EntityKind) -> Result<(), EngineError> {
    let found = entity.kind();
    if found != expected {
        return Err(EngineError::WrongKind {
            key: key.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn mrna_ref<'r>(registry: &'r EntityRegistry, key: &str) -> Result<&'r Mrna, EngineError> {
    let entity = registry.get(key)?;
    expect_kind(entity, key, EntityKind::Mrna)?;
    entity
        .as_mrna()
        .ok_or_else(|| EngineError::Internal(format!("'{}' is not an mRNA", key)))
}

fn mrna_mut<'r>(registry: &'r mut EntityRegistry, key: &str) -> Result<&'r mut Mrna, EngineError> {
    let entity = registry.get_mut(key)?;
    expect_kind(entity, key, EntityKind::Mrna)?;
    entity
        .as_mrna_mut()
        .ok_or_else(|| EngineError::Internal(format!("'{}' is not an mRNA", key)))
}

fn ribosome_ref<'r>(registry: &'r EntityRegistry, key: &str) -> Result<&'r Ribosome, EngineError> {
    let entity = registry.get(key)?;
    expect_kind(entity, key, EntityKind::Ribosome)?;
    entity
        .as_ribosome()
        .ok_or_else(|| EngineError::Internal(format!("'{}' is not a ribosome", key)))
}

fn ribosome_mut<'r>(
    registry: &'r mut EntityRegistry,
    key: &str,
) -> Result<&'r mut Ribosome, EngineError> {
    let entity = registry.get_mut(key)?;
    expect_kind(entity, key, EntityKind::Ribosome)?;
    entity
        .as_ribosome_mut()
        .ok_or_else(|| EngineError::Internal(format!("'{}' is not a ribosome", key)))
}
