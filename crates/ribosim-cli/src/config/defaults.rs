use ribosim::engine::config::{
    DEFAULT_INITIAL_MRNA_COUNT, DEFAULT_INITIAL_SEQUENCE, DEFAULT_RIBOSOME_COUNT,
};

pub struct DefaultsConfig {
    pub ribosome_count: usize,
    pub initial_mrna_count: usize,
    pub initial_sequence: String,
    pub steps: u64,
    pub log: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ribosome_count: DEFAULT_RIBOSOME_COUNT,
            initial_mrna_count: DEFAULT_INITIAL_MRNA_COUNT,
            initial_sequence: DEFAULT_INITIAL_SEQUENCE.to_string(),
            steps: 100,
            log: true,
        }
    }
}
