//! PDF compression presets
//!
//! Compression runs in four phases (load, clean, compress, write) and
//! reports progress after each. A [`CancellationToken`] is checked before
//! every phase, so a cancelled job stops between phases and never writes
//! the output file.
//!
//! | Level    | Clean                                            | Compress            |
//! |----------|--------------------------------------------------|---------------------|
//! | `high`   | drop unreferenced objects                        | none                |
//! | `medium` | drop unreferenced objects and empty streams      | renumber, deflate   |
//! | `low`    | as `medium`, plus merge identical streams        | renumber, deflate   |

use clap::ValueEnum;
use lopdf::{Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::document::{load_document, save_document};
use crate::error::{HomeboxError, HomeboxResult};

/// Compression preset, trading output size against fidelity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    /// Largest output, structural cleanup only
    High,
    #[default]
    Medium,
    /// Smallest output
    Low,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    fn deflates(&self) -> bool {
        !matches!(self, Self::High)
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QualityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("Unknown quality level: {}", other)),
        }
    }
}

/// Shared flag used to ask a running job to stop
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn check(&self, phase: Phase) -> HomeboxResult<()> {
        if self.is_cancelled() {
            tracing::info!(?phase, "Compression cancelled");
            return Err(HomeboxError::Cancelled(format!(
                "compression stopped before {} phase",
                phase.name()
            )));
        }
        Ok(())
    }
}

/// Compression phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Load,
    Clean,
    Compress,
    Write,
}

impl Phase {
    /// Progress reached when this phase completes
    pub fn percent(&self) -> u8 {
        match self {
            Self::Start => 0,
            Self::Load => 20,
            Self::Clean => 50,
            Self::Compress => 80,
            Self::Write => 100,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Load => "load",
            Self::Clean => "clean",
            Self::Compress => "compress",
            Self::Write => "write",
        }
    }
}

/// A progress tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub phase: Phase,
    pub percent: u8,
}

impl From<Phase> for Progress {
    fn from(phase: Phase) -> Self {
        Self {
            phase,
            percent: phase.percent(),
        }
    }
}

/// Outcome of a finished compression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub level: QualityLevel,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressReport {
    /// `1 - compressed / original`; negative when the output grew
    pub fn reduction(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            1.0 - self.compressed_size as f64 / self.original_size as f64
        }
    }
}

/// Compress `input` into `output`, calling `on_progress` after each phase
pub fn compress(
    input: &Path,
    output: &Path,
    level: QualityLevel,
    token: &CancellationToken,
    mut on_progress: impl FnMut(Progress),
) -> HomeboxResult<CompressReport> {
    on_progress(Phase::Start.into());

    token.check(Phase::Load)?;
    let original_size = std::fs::metadata(input)
        .map_err(|e| HomeboxError::Io(format!("Failed to read {}: {}", input.display(), e)))?
        .len();
    let mut document = load_document(input)?;
    on_progress(Phase::Load.into());

    token.check(Phase::Clean)?;
    clean(&mut document, level);
    on_progress(Phase::Clean.into());

    token.check(Phase::Compress)?;
    if level.deflates() {
        document.renumber_objects();
        document.compress();
    }
    on_progress(Phase::Compress.into());

    token.check(Phase::Write)?;
    save_document(&mut document, output)?;
    let compressed_size = std::fs::metadata(output)?.len();
    on_progress(Phase::Write.into());

    let report = CompressReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        level,
        original_size,
        compressed_size,
    };

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        %level,
        original_size,
        compressed_size,
        reduction = report.reduction(),
        "Compressed document"
    );

    Ok(report)
}

fn clean(document: &mut Document, level: QualityLevel) {
    let pruned = document.prune_objects().len();
    let mut emptied = 0;
    let mut merged = 0;

    if level != QualityLevel::High {
        emptied = document.delete_zero_length_streams().len();
    }
    if level == QualityLevel::Low {
        merged = merge_duplicate_streams(document);
        document.prune_objects();
    }

    tracing::debug!(%level, pruned, emptied, merged, "Cleaned document");
}

fn stream_fingerprint(object: &Object) -> Option<(u64, String, &[u8])> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let dict = format!("{:?}", stream.dict);
    let mut hasher = DefaultHasher::new();
    dict.hash(&mut hasher);
    stream.content.hash(&mut hasher);
    Some((hasher.finish(), dict, &stream.content))
}

/// Point every reference to a duplicate stream at its first copy;
/// returns the number of duplicates found
fn merge_duplicate_streams(document: &mut Document) -> usize {
    let mut first_by_hash: HashMap<u64, Vec<ObjectId>> = HashMap::new();
    let mut replacements: HashMap<ObjectId, ObjectId> = HashMap::new();

    for (&id, object) in &document.objects {
        let Some((hash, dict, content)) = stream_fingerprint(object) else {
            continue;
        };
        let candidates = first_by_hash.entry(hash).or_default();
        let original = candidates.iter().copied().find(|candidate| {
            document
                .objects
                .get(candidate)
                .and_then(stream_fingerprint)
                .map(|(_, d, c)| d == dict && c == content)
                .unwrap_or(false)
        });
        match original {
            Some(original) => {
                replacements.insert(id, original);
            }
            None => candidates.push(id),
        }
    }

    if replacements.is_empty() {
        return 0;
    }

    for object in document.objects.values_mut() {
        rewrite_references(object, &replacements);
    }
    for (_, value) in document.trailer.iter_mut() {
        rewrite_references(value, &replacements);
    }
    for duplicate in replacements.keys() {
        document.objects.remove(duplicate);
    }

    replacements.len()
}

fn rewrite_references(object: &mut Object, replacements: &HashMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => {
            if let Some(target) = replacements.get(id) {
                *id = *target;
            }
        }
        Object::Array(items) => {
            for item in items {
                rewrite_references(item, replacements);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                rewrite_references(value, replacements);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                rewrite_references(value, replacements);
            }
        }
        _ => {}
    }
}

/// A compression running on a worker thread
pub struct CompressJob {
    token: CancellationToken,
    progress: Receiver<Progress>,
    handle: JoinHandle<HomeboxResult<CompressReport>>,
}

impl CompressJob {
    /// Start compressing `input` into `output` on a new thread
    pub fn spawn(input: PathBuf, output: PathBuf, level: QualityLevel) -> Self {
        let token = CancellationToken::new();
        let (sender, progress): (Sender<Progress>, Receiver<Progress>) = mpsc::channel();

        let worker_token = token.clone();
        let handle = thread::spawn(move || {
            compress(&input, &output, level, &worker_token, |tick| {
                // The receiver may already be gone; progress is best effort
                let _ = sender.send(tick);
            })
        });

        Self {
            token,
            progress,
            handle,
        }
    }

    /// Ask the job to stop before its next phase
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A handle that can cancel this job from elsewhere
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Progress ticks, in order; the channel closes when the job ends
    pub fn progress(&self) -> &Receiver<Progress> {
        &self.progress
    }

    /// Wait for the job to finish
    pub fn wait(self) -> HomeboxResult<CompressReport> {
        self.handle
            .join()
            .map_err(|_| HomeboxError::Pdf("Compression worker panicked".into()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{page_widths, write_sample_pdf};
    use tempfile::TempDir;

    #[test]
    fn test_quality_level_parse_and_display() {
        assert_eq!("LOW".parse::<QualityLevel>().unwrap(), QualityLevel::Low);
        assert!("tiny".parse::<QualityLevel>().is_err());
        assert_eq!(QualityLevel::default(), QualityLevel::Medium);
        assert_eq!(QualityLevel::High.to_string(), "high");
    }

    #[test]
    fn test_reduction() {
        let report = CompressReport {
            input: PathBuf::from("in.pdf"),
            output: PathBuf::from("out.pdf"),
            level: QualityLevel::Medium,
            original_size: 1000,
            compressed_size: 250,
        };
        assert!((report.reduction() - 0.75).abs() < 1e-9);

        let empty = CompressReport {
            original_size: 0,
            ..report
        };
        assert_eq!(empty.reduction(), 0.0);
    }

    #[test]
    fn test_compress_every_level_keeps_pages() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.pdf");
        write_sample_pdf(&input, &[100, 200, 300]);

        for level in [QualityLevel::High, QualityLevel::Medium, QualityLevel::Low] {
            let output = temp_dir.path().join(format!("out_{}.pdf", level));
            let mut ticks = Vec::new();

            let report = compress(&input, &output, level, &CancellationToken::new(), |p| {
                ticks.push(p.percent)
            })
            .unwrap();

            assert_eq!(ticks, vec![0, 20, 50, 80, 100]);
            assert_eq!(page_widths(&output), vec![100, 200, 300]);
            assert_eq!(report.compressed_size, std::fs::metadata(&output).unwrap().len());
            assert!(report.original_size > 0);
        }
    }

    #[test]
    fn test_cancelled_before_start_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.pdf");
        let output = temp_dir.path().join("out.pdf");
        write_sample_pdf(&input, &[100]);

        let token = CancellationToken::new();
        token.cancel();
        let mut ticks = Vec::new();
        let err = compress(&input, &output, QualityLevel::Low, &token, |p| {
            ticks.push(p.percent)
        })
        .unwrap_err();

        assert!(matches!(err, HomeboxError::Cancelled(_)));
        assert_eq!(ticks, vec![0]);
        assert!(!output.exists());
    }

    #[test]
    fn test_cancel_between_phases() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.pdf");
        let output = temp_dir.path().join("out.pdf");
        write_sample_pdf(&input, &[100]);

        let token = CancellationToken::new();
        let trigger = token.clone();
        let err = compress(&input, &output, QualityLevel::Medium, &token, |p| {
            if p.phase == Phase::Clean {
                trigger.cancel();
            }
        })
        .unwrap_err();

        assert!(matches!(err, HomeboxError::Cancelled(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_merge_duplicate_streams() {
        use lopdf::{dictionary, Stream};

        let mut doc = Document::with_version("1.5");
        let a = doc.add_object(Stream::new(dictionary! {}, b"q 1 0 0 1 0 0 cm Q".to_vec()));
        let b = doc.add_object(Stream::new(dictionary! {}, b"q 1 0 0 1 0 0 cm Q".to_vec()));
        let c = doc.add_object(Stream::new(dictionary! {}, b"different".to_vec()));
        let holder = doc.add_object(dictionary! {
            "Items" => vec![Object::Reference(a), Object::Reference(b), Object::Reference(c)],
        });

        assert_eq!(merge_duplicate_streams(&mut doc), 1);

        let items = doc
            .get_dictionary(holder)
            .unwrap()
            .get(b"Items")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        let ids: Vec<ObjectId> = items.iter().map(|o| o.as_reference().unwrap()).collect();
        assert_eq!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_eq!(doc.objects.len(), 3);
    }

    #[test]
    fn test_background_job_reports_progress() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.pdf");
        let output = temp_dir.path().join("out.pdf");
        write_sample_pdf(&input, &[100, 200]);

        let job = CompressJob::spawn(input, output.clone(), QualityLevel::Medium);
        let ticks: Vec<u8> = job.progress().iter().map(|p| p.percent).collect();
        let report = job.wait().unwrap();

        assert_eq!(ticks.last(), Some(&100));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(report.output, output);
        assert!(output.exists());
    }

    #[test]
    fn test_background_job_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let job = CompressJob::spawn(
            temp_dir.path().join("missing.pdf"),
            temp_dir.path().join("out.pdf"),
            QualityLevel::High,
        );
        assert!(job.wait().unwrap_err().is_io_failure());
    }
}
