use std::time::{Duration, Instant};

use thiserror::Error;

use crate::extraction::domain::entity_extractor::EntityExtractor;
use crate::geocoding::domain::geocoder::Geocoder;
use crate::path::domain::path_builder::PathBuilder;
use crate::path::domain::reconciler::Reconciler;
use crate::pipeline::path_report::PathReport;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::{DEFAULT_LANGUAGE, DEFAULT_TIMEOUT};
use crate::shared::video_id::VideoId;
use crate::transcript::domain::transcript_source::{TranscriptError, TranscriptSource};

/// Conditions that abort a run. Both are raised before any place lookup.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid video URL: {0:?}")]
    InvalidInput(String),
    #[error("transcript unavailable: {0}")]
    TranscriptUnavailable(#[from] TranscriptError),
}

impl PipelineError {
    /// Both variants are caused by what the caller supplied.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::TranscriptUnavailable(_)
        )
    }
}

/// Options for the reverse lookups used during reconciliation.
#[derive(Debug, Clone)]
pub struct ReverseLookupOptions {
    pub language: String,
    pub timeout: Duration,
}

impl Default for ReverseLookupOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Video URL in, reconciled waypoint path out.
///
/// Runs strictly sequentially: parse id, fetch transcript, extract and
/// geocode per segment, sort, reconcile. Once the transcript is in hand
/// nothing further can fail the run; lookup failures only shrink the path
/// or leave pairs unmerged.
pub struct BuildPathUseCase {
    transcripts: Box<dyn TranscriptSource>,
    extractor: EntityExtractor,
    geocoder: Box<dyn Geocoder>,
    reconciler: Reconciler,
    reverse_options: ReverseLookupOptions,
    logger: Box<dyn PipelineLogger>,
}

impl BuildPathUseCase {
    pub fn new(
        transcripts: Box<dyn TranscriptSource>,
        extractor: EntityExtractor,
        geocoder: Box<dyn Geocoder>,
        reconciler: Reconciler,
        reverse_options: ReverseLookupOptions,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            transcripts,
            extractor,
            geocoder,
            reconciler,
            reverse_options,
            logger,
        }
    }

    pub fn execute(&mut self, url: &str) -> Result<PathReport, PipelineError> {
        let video_id =
            VideoId::from_url(url).ok_or_else(|| PipelineError::InvalidInput(url.to_string()))?;

        let segments = self.transcripts.fetch(&video_id)?;
        self.logger.info(&format!(
            "Building path for {video_id} from {} transcript segments",
            segments.len()
        ));

        let build = PathBuilder::new(&self.extractor, self.geocoder.as_ref())
            .build(&segments, self.logger.as_mut());
        self.logger.count("waypoints.raw", build.waypoints.len());

        let geocoder = self.geocoder.as_ref();
        let logger = self.logger.as_mut();
        let language = self.reverse_options.language.as_str();
        let timeout = self.reverse_options.timeout;
        let reconciliation = self.reconciler.reconcile(&build.waypoints, |coordinate| {
            let started = Instant::now();
            let address = geocoder.reverse(coordinate, language, timeout);
            logger.timing("reverse", started.elapsed().as_secs_f64() * 1000.0);
            address
        });

        self.logger.count("waypoints.merged", reconciliation.merged.len());
        self.logger
            .count("reverse.failed", reconciliation.failures.len());
        self.logger.count("waypoints.final", reconciliation.path.len());
        self.logger.info(&format!(
            "Path for {video_id}: {} waypoints ({} merged, {} unplaced mentions)",
            reconciliation.path.len(),
            reconciliation.merged.len(),
            build.misses.len()
        ));
        self.logger.summary();

        Ok(PathReport {
            video_id,
            path: reconciliation.path,
        })
    }
}
