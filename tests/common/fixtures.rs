// Test fixtures for integration testing

use chrono::{TimeZone, Utc};
use paper_rag::core::types::{ChunkMetadata, Document};
use std::path::Path;
use tempfile::TempDir;

/// A directory of plain-text papers plus the documents describing them
#[allow(dead_code)] // Used in integration tests
pub struct TestPapers {
    pub dir: TempDir,
    pub documents: Vec<Document>,
}

/// (arxiv id, title, category, body)
#[allow(dead_code)] // Used in integration tests
pub type PaperSpec<'a> = (&'a str, &'a str, &'a str, &'a str);

impl TestPapers {
    /// Three short papers on distinct topics
    #[allow(dead_code)] // Used in integration tests
    pub fn small() -> Self {
        Self::with_papers(&[
            (
                "2301.00001v1",
                "Photon Entanglement in Optical Cavities",
                "quant-ph",
                "Entangled photon pairs are produced by spontaneous parametric down conversion. \
                 The cavity enhances the entanglement rate. Bell inequality violations confirm \
                 the quantum correlations between photons.",
            ),
            (
                "2302.00002v2",
                "Surface Codes for Quantum Error Correction",
                "quant-ph",
                "Surface codes protect logical qubits against local noise. Syndrome measurements \
                 detect bit flip and phase flip errors. The threshold is close to one percent.",
            ),
            (
                "2303.00003v1",
                "Dark Matter Halos in Dwarf Galaxies",
                "astro-ph",
                "Rotation curves of dwarf galaxies suggest cored dark matter halos. \
                 Feedback from supernovae may flatten the central density profile.",
            ),
        ])
    }

    /// One paper long enough to need several chunks
    #[allow(dead_code)] // Used in integration tests
    pub fn long_paper(sentences: usize) -> Self {
        let body: String = (0..sentences)
            .map(|i| format!("Sentence number {i} describes decoherence in superconducting qubits. "))
            .collect();
        Self::with_papers(&[(
            "2304.00004v1",
            "Decoherence in Superconducting Qubits",
            "quant-ph",
            &body,
        )])
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn with_papers(papers: &[PaperSpec<'_>]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let papers_dir = dir.path().join("raw_papers");
        std::fs::create_dir_all(&papers_dir).expect("Failed to create papers dir");

        let documents = papers
            .iter()
            .enumerate()
            .map(|(i, (id, title, category, body))| {
                let pdf_path = papers_dir.join(format!("{}.txt", id.replace('.', "_")));
                std::fs::write(&pdf_path, body).expect("Failed to write paper");
                Document {
                    arxiv_id: id.to_string(),
                    title: title.to_string(),
                    authors: vec![format!("Author {i}")],
                    abstract_text: format!("Abstract of {title}"),
                    published: Utc
                        .with_ymd_and_hms(2023, 1, 1 + i as u32, 0, 0, 0)
                        .unwrap(),
                    categories: vec![category.to_string()],
                    pdf_path,
                }
            })
            .collect();

        Self { dir, documents }
    }

    /// Directory used as the data dir of test services
    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Metadata for chunker tests
#[allow(dead_code)] // Used in integration tests
pub fn sample_metadata() -> ChunkMetadata {
    ChunkMetadata {
        arxiv_id: "2301.00001v1".to_string(),
        title: "Sample Paper".to_string(),
        authors: vec!["A. Author".to_string(), "B. Author".to_string()],
        published: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        categories: vec!["quant-ph".to_string()],
    }
}
