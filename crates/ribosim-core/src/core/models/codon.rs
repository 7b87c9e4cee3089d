use phf::{Map, Set, phf_map, phf_set};

pub const CODON_LENGTH: usize = 3;

static RNA_NUCLEOTIDES: Set<char> = phf_set! { 'A', 'C', 'G', 'U' };

static STOP_CODONS: Set<&'static str> = phf_set! { "UAA", "UAG", "UGA" };

// Standard genetic code, one-letter amino acid symbols.
static GENETIC_CODE: Map<&'static str, char> = phf_map! {
    "UUU" => 'F', "UUC" => 'F', "UUA" => 'L', "UUG" => 'L',
    "CUU" => 'L', "CUC" => 'L', "CUA" => 'L', "CUG" => 'L',
    "AUU" => 'I', "AUC" => 'I', "AUA" => 'I', "AUG" => 'M',
    "GUU" => 'V', "GUC" => 'V', "GUA" => 'V', "GUG" => 'V',
    "UCU" => 'S', "UCC" => 'S', "UCA" => 'S', "UCG" => 'S',
    "CCU" => 'P', "CCC" => 'P', "CCA" => 'P', "CCG" => 'P',
    "ACU" => 'T', "ACC" => 'T', "ACA" => 'T', "ACG" => 'T',
    "GCU" => 'A', "GCC" => 'A', "GCA" => 'A', "GCG" => 'A',
    "UAU" => 'Y', "UAC" => 'Y',
    "CAU" => 'H', "CAC" => 'H', "CAA" => 'Q', "CAG" => 'Q',
    "AAU" => 'N', "AAC" => 'N', "AAA" => 'K', "AAG" => 'K',
    "GAU" => 'D', "GAC" => 'D', "GAA" => 'E', "GAG" => 'E',
    "UGU" => 'C', "UGC" => 'C', "UGG" => 'W',
    "CGU" => 'R', "CGC" => 'R', "CGA" => 'R', "CGG" => 'R',
    "AGU" => 'S', "AGC" => 'S', "AGA" => 'R', "AGG" => 'R',
    "GGU" => 'G', "GGC" => 'G', "GGA" => 'G', "GGG" => 'G',
};

/// The meaning of a single codon when read by a ribosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codon {
    /// A sense codon encoding the given amino acid.
    Sense(char),
    /// One of the three stop codons that terminate a reading frame.
    Stop,
}

pub fn is_rna_nucleotide(base: char) -> bool {
    RNA_NUCLEOTIDES.contains(&base)
}

/// Classifies a nucleotide triplet.
///
/// Returns `None` for anything that is not three RNA bases (`A`, `C`, `G`, `U`).
pub fn classify(triplet: &str) -> Option<Codon> {
    if STOP_CODONS.contains(triplet) {
        return Some(Codon::Stop);
    }
    GENETIC_CODE.get(triplet).copied().map(Codon::Sense)
}

/// Reads the codon starting at `position` in `sequence`.
///
/// Returns `None` when fewer than three bases remain or the triplet holds a
/// base outside the RNA alphabet.
pub fn read_codon(sequence: &str, position: usize) -> Option<Codon> {
    let end = position.checked_add(CODON_LENGTH)?;
    sequence.get(position..end).and_then(classify)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genetic_code_covers_all_sense_codons() {
        assert_eq!(GENETIC_CODE.len() + STOP_CODONS.len(), 64);
    }

    #[test]
    fn classify_recognizes_sense_and_stop_codons() {
        assert_eq!(classify("UUU"), Some(Codon::Sense('F')));
        assert_eq!(classify("AUG"), Some(Codon::Sense('M')));
        assert_eq!(classify("UGG"), Some(Codon::Sense('W')));
        assert_eq!(classify("UAA"), Some(Codon::Stop));
        assert_eq!(classify("UAG"), Some(Codon::Stop));
        assert_eq!(classify("UGA"), Some(Codon::Stop));
    }

    #[test]
    fn classify_rejects_non_rna_triplets() {
        assert_eq!(classify("TTT"), None);
        assert_eq!(classify("uuu"), None);
        assert_eq!(classify("UU"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn read_codon_walks_the_reading_frame() {
        let sequence = "UUUUUUUUUUAA";
        assert_eq!(read_codon(sequence, 0), Some(Codon::Sense('F')));
        assert_eq!(read_codon(sequence, 6), Some(Codon::Sense('F')));
        assert_eq!(read_codon(sequence, 9), Some(Codon::Stop));
        assert_eq!(read_codon(sequence, 12), None);
        assert_eq!(read_codon(sequence, 11), None);
        assert_eq!(read_codon(sequence, usize::MAX), None);
    }

    #[test]
    fn nucleotide_alphabet_is_rna() {
        assert!(is_rna_nucleotide('U'));
        assert!(!is_rna_nucleotide('T'));
        assert!(!is_rna_nucleotide('a'));
    }
}
