use std::time::Instant;

use crate::extraction::domain::entity_extractor::EntityExtractor;
use crate::geocoding::domain::geocoder::{Geocoder, LookupFailure};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::waypoint::{sort_by_timestamp, Waypoint};
use crate::transcript::domain::transcript_segment::TranscriptSegment;

/// Raw, time-sorted waypoints plus the mentions that could not be placed.
#[derive(Debug, Default)]
pub struct PathBuild {
    pub waypoints: Vec<Waypoint>,
    pub misses: Vec<LookupFailure>,
    /// Segments whose text the recognizer failed on.
    pub unrecognized_segments: usize,
}

/// Turns transcript segments into geocoded waypoints.
///
/// Segments are processed strictly in order, one blocking call at a time.
/// Every waypoint takes its segment's start time; the result is stably
/// sorted so ties keep (segment, mention) order.
pub struct PathBuilder<'a> {
    extractor: &'a EntityExtractor,
    geocoder: &'a dyn Geocoder,
}

impl<'a> PathBuilder<'a> {
    pub fn new(extractor: &'a EntityExtractor, geocoder: &'a dyn Geocoder) -> Self {
        Self {
            extractor,
            geocoder,
        }
    }

    pub fn build(
        &self,
        segments: &[TranscriptSegment],
        logger: &mut dyn PipelineLogger,
    ) -> PathBuild {
        let mut result = PathBuild::default();
        let total = segments.len();

        for (idx, segment) in segments.iter().enumerate() {
            let started = Instant::now();
            let mentions = self.extractor.extract(&segment.text);
            logger.timing("extract", elapsed_ms(started));

            let mentions = match mentions {
                Ok(m) => m,
                Err(e) => {
                    log::warn!(
                        "Skipping segment at {:.2}s: entity recognition failed: {e}",
                        segment.start
                    );
                    logger.count("extract.failed", 1);
                    result.unrecognized_segments += 1;
                    logger.progress(idx + 1, total);
                    continue;
                }
            };
            logger.count("mentions", mentions.len());

            for mention in mentions {
                let started = Instant::now();
                let lookup = self.geocoder.forward(&mention.text);
                logger.timing("forward", elapsed_ms(started));

                match lookup {
                    Ok(coordinate) => {
                        log::debug!(
                            "{:.2}s {} '{}' -> {coordinate}",
                            segment.start,
                            mention.category,
                            mention.text
                        );
                        result
                            .waypoints
                            .push(Waypoint::new(segment.start, coordinate, mention.text));
                    }
                    Err(error) => {
                        log::warn!(
                            "No coordinate for '{}' at {:.2}s: {error}",
                            mention.text,
                            segment.start
                        );
                        logger.count(&format!("forward.{}", error.kind()), 1);
                        result.misses.push(LookupFailure {
                            place: mention.text,
                            timestamp: segment.start,
                            error,
                        });
                    }
                }
            }
            logger.progress(idx + 1, total);
        }

        sort_by_timestamp(&mut result.waypoints);
        result
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
