//! Unified service container for paper-rag
//!
//! Builds every collaborator once from the configuration and hands
//! them out as trait objects. Nothing in the crate holds global
//! state; commands and tests receive a `Services` value instead.

use crate::core::config::{Config, EmbeddingProviderKind, GeneratorBackend, IndexBackend};
use crate::core::embedding::{Embedder, HashingEmbedder, OpenAiEmbedder};
use crate::core::error::Result;
use crate::core::generation::{Generator, OpenAiGenerator, PlaceholderGenerator};
use crate::core::index::{ChromaIndex, MemoryIndex, VectorIndex};
use crate::core::ingest::{Chunker, IndexingPipeline, ProcessingPipeline};
use crate::core::query::{QaPipeline, Retriever};
use crate::core::source::{ArxivSource, DocumentSource, FileTextExtractor, ManifestSource, TextExtractor};
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Online paper search and download
    pub source: Arc<dyn DocumentSource>,

    /// Local text extraction
    pub extractor: Arc<dyn TextExtractor>,

    pub embedder: Arc<dyn Embedder>,

    pub index: Arc<dyn VectorIndex>,

    pub generator: Arc<dyn Generator>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    ///
    /// Fails if a configured backend cannot be built, e.g. an
    /// OpenAI backend without its API key in the environment.
    pub fn new(config: Config) -> Result<Self> {
        let source: Arc<dyn DocumentSource> = Arc::new(ArxivSource::new(
            &config.source,
            config.storage.papers_dir(),
        )?);

        let embedder: Arc<dyn Embedder> = match config.embedding.provider {
            EmbeddingProviderKind::Hashing => {
                Arc::new(HashingEmbedder::new(config.embedding.dimensions))
            }
            EmbeddingProviderKind::OpenAi => Arc::new(OpenAiEmbedder::from_config(&config.embedding)?),
        };

        let index: Arc<dyn VectorIndex> = match config.index.backend {
            IndexBackend::Memory => Arc::new(MemoryIndex::open(
                config.storage.index_snapshot_path(&config.index.collection),
            )?),
            IndexBackend::Chroma => Arc::new(ChromaIndex::new(
                &config.index.chroma_url,
                &config.index.collection,
            )?),
        };

        let generator: Arc<dyn Generator> = match config.generation.backend {
            GeneratorBackend::Placeholder => Arc::new(PlaceholderGenerator),
            GeneratorBackend::OpenAi => Arc::new(OpenAiGenerator::from_config(&config.generation)?),
        };

        Ok(Self::from_parts(
            config,
            source,
            Arc::new(FileTextExtractor::default()),
            embedder,
            index,
            generator,
        ))
    }

    /// Assemble services from explicit collaborators
    pub fn from_parts(
        config: Config,
        source: Arc<dyn DocumentSource>,
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            source,
            extractor,
            embedder,
            index,
            generator,
            config: Arc::new(config),
        }
    }

    /// Offline source reading the saved paper manifest
    pub fn manifest_source(&self) -> ManifestSource {
        ManifestSource::new(self.config.storage.manifest_path())
    }

    /// Chunker with the configured size and overlap
    pub fn default_chunker(&self) -> Result<Chunker> {
        Chunker::new(
            self.config.chunking.chunk_size,
            self.config.chunking.chunk_overlap,
        )
    }

    pub fn create_processing_pipeline(&self, chunker: Chunker) -> ProcessingPipeline {
        ProcessingPipeline::new(Arc::clone(&self.extractor), chunker)
    }

    pub fn create_indexing_pipeline(&self) -> IndexingPipeline {
        IndexingPipeline::new(
            Arc::clone(&self.embedder),
            Arc::clone(&self.index),
            self.config.embedding.batch_size,
        )
    }

    pub fn create_qa_pipeline(&self) -> QaPipeline {
        QaPipeline::new(
            Retriever::new(Arc::clone(&self.embedder), Arc::clone(&self.index)),
            Arc::clone(&self.generator),
            self.config.retrieval.default_k,
        )
    }
}
