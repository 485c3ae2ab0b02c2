//! High-level runner: corpus in, one spliced level out.
use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::{debug, info, warn};

use crate::combine::config::CombineConfig;
use crate::combine::events::{CombineEvent, CombineEventKind, EventSink};
use crate::combine::ACCUMULATOR_NAME;
use crate::error::Result;
use crate::format::LevelFile;
use crate::geometry::Offset;
use crate::level::Level;
use crate::storage::{generated_file_name, Collection, LevelStore};

/// A sampled, already-exploded variant and the offset it will be tried at.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedVariant {
    pub level: Level,
    pub offset: Offset,
}

/// Outcome counts of the placement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementStats {
    pub placed: usize,
    pub rejected: usize,
}

/// Result of a combination run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct CombineResult {
    /// The aligned composite level.
    pub level: Level,
    /// Number of corpus levels.
    pub corpus_size: usize,
    /// Number of rotated variants derived from the corpus.
    pub variant_pool: usize,
    /// Number of variants kept after shuffling.
    pub sampled: usize,
    /// Variants merged into the composite.
    pub placed: usize,
    /// Variants dropped because they shared a cell with the composite.
    pub rejected: usize,
}

/// A combination that was written to the store.
#[derive(Debug, Clone)]
pub struct SavedCombination {
    pub file_name: String,
    pub path: PathBuf,
    pub result: CombineResult,
}

/// Rotated copies of every corpus level: `rotations` snapshots each, at 0°,
/// 90°, 180°, ... in that order. The corpus itself is left untouched.
pub fn expand_variants(corpus: &[Level], rotations: usize) -> Vec<Level> {
    let mut pool = Vec::with_capacity(corpus.len() * rotations);
    for level in corpus {
        let mut current = level.clone();
        for step in 0..rotations {
            if step > 0 {
                current.rotate();
            }
            pool.push(current.clone());
        }
    }
    pool
}

/// Shuffle `pool` uniformly and keep at most `max` entries.
pub fn sample<R: RngCore + ?Sized>(mut pool: Vec<Level>, max: usize, rng: &mut R) -> Vec<Level> {
    pool.shuffle(rng);
    pool.truncate(max);
    pool
}

/// Explode each variant in place and draw its placement offset. Draws are
/// made per variant, in order: explode first, then x, then y.
pub fn prepare<R: RngCore + ?Sized>(
    variants: Vec<Level>,
    config: &CombineConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Vec<PreparedVariant> {
    let range = config.offset_range;
    variants
        .into_iter()
        .enumerate()
        .map(|(index, mut level)| {
            let removed = level.explode(&config.explode, &mut *rng);
            let offset = Offset::new(
                rng.random_range(-range..=range),
                rng.random_range(-range..=range),
            );
            if sink.wants(CombineEventKind::VariantPrepared) {
                sink.send(CombineEvent::VariantPrepared {
                    index,
                    name: level.name.clone(),
                    removed,
                    remaining: level.len(),
                    offset,
                });
            }
            PreparedVariant { level, offset }
        })
        .collect()
}

/// Merge each prepared variant into `accumulator` unless it shares a cell
/// with what has been placed so far. Rejected variants are dropped; there is
/// no retry at another offset.
pub fn place(
    accumulator: &mut Level,
    prepared: &[PreparedVariant],
    sink: &mut dyn EventSink,
) -> PlacementStats {
    let mut stats = PlacementStats::default();
    for (index, variant) in prepared.iter().enumerate() {
        if accumulator.collides(&variant.level, variant.offset) {
            debug!(
                "Rejected variant {} of '{}' at {:?}.",
                index, variant.level.name, variant.offset
            );
            stats.rejected += 1;
            if sink.wants(CombineEventKind::VariantRejected) {
                sink.send(CombineEvent::VariantRejected {
                    index,
                    name: variant.level.name.clone(),
                    offset: variant.offset,
                });
            }
            continue;
        }

        accumulator.blit(&variant.level, variant.offset);
        debug!(
            "Placed variant {} of '{}' at {:?} ({} objects).",
            index,
            variant.level.name,
            variant.offset,
            variant.level.len()
        );
        stats.placed += 1;
        if sink.wants(CombineEventKind::VariantPlaced) {
            sink.send(CombineEvent::VariantPlaced {
                index,
                name: variant.level.name.clone(),
                offset: variant.offset,
                objects: variant.level.len(),
            });
        }
    }
    stats
}

/// Run the whole pipeline over an in-memory corpus: expand, sample, prepare,
/// place, align. Nothing is written.
pub fn combine<R: RngCore + ?Sized>(
    corpus: &[Level],
    config: &CombineConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<CombineResult> {
    config.validate()?;

    if corpus.is_empty() {
        warn!("Corpus is empty; the combined level will have no objects.");
        if sink.wants(CombineEventKind::Warning) {
            sink.send(CombineEvent::Warning {
                context: "corpus".into(),
                message: "Corpus is empty".into(),
            });
        }
    }

    let pool = expand_variants(corpus, config.rotations);
    let variant_pool = pool.len();
    let kept = sample(pool, config.max_variants, rng);
    let sampled = kept.len();
    info!(
        "Corpus: {} level(s) | variants: {} | sampled: {}.",
        corpus.len(),
        variant_pool,
        sampled
    );
    if sink.wants(CombineEventKind::RunStarted) {
        sink.send(CombineEvent::RunStarted {
            corpus_size: corpus.len(),
            variant_pool,
            sampled,
        });
    }

    let prepared = prepare(kept, config, rng, sink);

    let mut accumulator = Level::empty(ACCUMULATOR_NAME);
    let stats = place(&mut accumulator, &prepared, sink);
    accumulator.align();

    info!(
        "Placed {} variant(s), rejected {}; {} object(s) in total.",
        stats.placed,
        stats.rejected,
        accumulator.len()
    );
    if sink.wants(CombineEventKind::RunFinished) {
        sink.send(CombineEvent::RunFinished {
            placed: stats.placed,
            rejected: stats.rejected,
            objects: accumulator.len(),
        });
    }

    Ok(CombineResult {
        level: accumulator,
        corpus_size: corpus.len(),
        variant_pool,
        sampled,
        placed: stats.placed,
        rejected: stats.rejected,
    })
}

/// Loads the corpus from a [`LevelStore`], combines it, and saves the result
/// into the user collection.
#[derive(Debug, Clone)]
pub struct Combiner {
    /// Store the corpus is read from and the output written to.
    pub store: LevelStore,
    /// Run configuration applied to this combiner.
    pub config: CombineConfig,
}

impl Combiner {
    pub fn try_new(store: LevelStore, config: CombineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Decode every published and user level. Fails before any level is
    /// touched unless the config allows skipping unreadable files.
    pub fn load_corpus(&self) -> Result<Vec<Level>> {
        Ok(self
            .store
            .load_corpus(self.config.skip_unreadable)?
            .into_iter()
            .map(|stored| Level::from(stored.file))
            .collect())
    }

    /// Load and combine without writing anything.
    pub fn combine<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<CombineResult> {
        let corpus = self.load_corpus()?;
        combine(&corpus, &self.config, rng, sink)
    }

    /// Load, combine, and write the result under a freshly generated name.
    pub fn run<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<SavedCombination> {
        self.run_with_events(rng, &mut ())
    }

    pub fn run_with_events<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<SavedCombination> {
        let result = self.combine(rng, sink)?;
        let (file_name, path) = self.save(&result.level, rng)?;
        Ok(SavedCombination {
            file_name,
            path,
            result,
        })
    }

    /// Write `level` as an output document into the user collection.
    pub fn save<R: RngCore + ?Sized>(&self, level: &Level, rng: &mut R) -> Result<(String, PathBuf)> {
        let file_name = generated_file_name(&self.config.output, rng);
        let document: LevelFile = level.to_output_file();
        let path = self.store.write(Collection::User, &file_name, &document)?;
        info!("Saved combined level to '{}'.", path.display());
        Ok((file_name, path))
    }
}
