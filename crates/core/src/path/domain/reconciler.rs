use crate::geocoding::domain::geocoder::{GeocodeError, LookupFailure};
use crate::shared::constants::RECONCILE_WINDOW_SECS;
use crate::shared::geo_coordinate::GeoCoordinate;
use crate::shared::waypoint::Waypoint;

/// Outcome of one reconciliation sweep.
#[derive(Debug, Default, PartialEq)]
pub struct Reconciliation {
    pub path: Vec<Waypoint>,
    /// Waypoints dropped as coarser restatements of their predecessor.
    pub merged: Vec<Waypoint>,
    /// Hierarchy checks that could not be answered; those pairs were kept.
    pub failures: Vec<LookupFailure>,
}

/// Collapses "specific place, then its enclosing place" mention pairs.
///
/// Walks the time-sorted sequence once with a one-element lookahead. When
/// the next waypoint falls within `window_secs` (inclusive) and its name
/// appears in the reverse-geocoded address of the current one, the next
/// waypoint is dropped and the sweep skips past it. Only the later-is-coarser
/// direction is checked. A failed reverse lookup keeps both waypoints.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    window_secs: f64,
}

impl Reconciler {
    pub fn new(window_secs: f64) -> Self {
        Self { window_secs }
    }

    pub fn window_secs(&self) -> f64 {
        self.window_secs
    }

    /// Sweeps `waypoints`, which must already be sorted by timestamp.
    ///
    /// `reverse` maps a coordinate to an address; it is only called for
    /// pairs inside the window.
    pub fn reconcile<F>(&self, waypoints: &[Waypoint], mut reverse: F) -> Reconciliation
    where
        F: FnMut(GeoCoordinate) -> Result<String, GeocodeError>,
    {
        let mut out = Reconciliation {
            path: Vec::with_capacity(waypoints.len()),
            ..Default::default()
        };

        let mut i = 0;
        while i < waypoints.len() {
            let curr = &waypoints[i];
            let next = match waypoints.get(i + 1) {
                Some(n) => n,
                None => {
                    out.path.push(curr.clone());
                    break;
                }
            };

            if self.in_window(curr.gap_to(next)) {
                match reverse(curr.coordinate()) {
                    Ok(address) if is_enclosing_place(&next.place, &address) => {
                        log::debug!(
                            "Merging '{}' at {:.2}s into '{}' ({address})",
                            next.place,
                            next.timestamp,
                            curr.place
                        );
                        out.path.push(curr.clone());
                        out.merged.push(next.clone());
                        i += 2;
                        continue;
                    }
                    Ok(_) => {}
                    Err(error) => {
                        log::warn!(
                            "Hierarchy check for '{}' at {:.2}s failed, keeping both: {error}",
                            curr.place,
                            curr.timestamp
                        );
                        out.failures.push(LookupFailure {
                            place: curr.place.clone(),
                            timestamp: curr.timestamp,
                            error,
                        });
                    }
                }
            }

            out.path.push(curr.clone());
            i += 1;
        }

        out
    }

    fn in_window(&self, gap: f64) -> bool {
        (0.0..=self.window_secs).contains(&gap)
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(RECONCILE_WINDOW_SECS)
    }
}

/// Case-insensitive containment of `place` in `address`. Blank names never
/// match.
pub fn is_enclosing_place(place: &str, address: &str) -> bool {
    let place = place.trim();
    !place.is_empty() && address.to_lowercase().contains(&place.to_lowercase())
}
