use crate::animation::interpolation::Interpolation;
use crate::core::{geo::Coordinate, geodesy};
use crate::{Error, Result};

/// Where a distance along the path lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Index of the segment's starting vertex, in `0..len - 1`
    pub segment_index: usize,
    /// Progress through that segment, in `[0, 1]`
    pub segment_progress: f64,
    pub position: Coordinate,
    /// Compass bearing of the segment, in `[0, 360)`
    pub heading: f64,
}

/// An immutable route polyline with a precomputed distance table.
///
/// `segment_lengths[i]` is the length of the edge ending at vertex `i`
/// (`segment_lengths[0] == 0`) and `cumulative[i]` is the distance from the
/// first vertex to vertex `i`. Both tables have one entry per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    coordinates: Vec<Coordinate>,
    segment_lengths: Vec<f64>,
    cumulative: Vec<f64>,
    /// One bearing per segment; degenerate segments borrow a neighbour's
    headings: Vec<f64>,
}

impl Path {
    pub fn new(coordinates: Vec<Coordinate>) -> Result<Self> {
        if coordinates.len() < 2 {
            return Err(Error::InvalidPath(format!(
                "a path needs at least 2 points, got {}",
                coordinates.len()
            )));
        }
        if let Some(index) = coordinates.iter().position(|c| !c.is_finite()) {
            return Err(Error::InvalidPath(format!(
                "point {index} is not a finite coordinate: {:?}",
                coordinates[index]
            )));
        }

        let mut segment_lengths = Vec::with_capacity(coordinates.len());
        let mut cumulative = Vec::with_capacity(coordinates.len());
        segment_lengths.push(0.0);
        cumulative.push(0.0);
        let mut total = 0.0;
        for pair in coordinates.windows(2) {
            let length = geodesy::distance(pair[0], pair[1]);
            total += length;
            segment_lengths.push(length);
            cumulative.push(total);
        }

        let headings = Self::segment_headings(&coordinates, &segment_lengths);

        Ok(Self {
            coordinates,
            segment_lengths,
            cumulative,
            headings,
        })
    }

    /// Bearing for every segment. A zero-length segment has no direction of
    /// its own, so it takes the previous segment's heading, or the next
    /// one's when it leads the path.
    fn segment_headings(coordinates: &[Coordinate], segment_lengths: &[f64]) -> Vec<f64> {
        let segments = coordinates.len() - 1;
        let mut headings: Vec<Option<f64>> = (0..segments)
            .map(|i| {
                (segment_lengths[i + 1] > 0.0)
                    .then(|| geodesy::bearing(coordinates[i], coordinates[i + 1]))
            })
            .collect();

        let mut last = None;
        for heading in headings.iter_mut() {
            match heading {
                Some(h) => last = Some(*h),
                None => *heading = last,
            }
        }
        let mut next = None;
        for heading in headings.iter_mut().rev() {
            match heading {
                Some(h) => next = Some(*h),
                None => *heading = next,
            }
        }

        headings.into_iter().map(|h| h.unwrap_or(0.0)).collect()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.coordinates.len() - 1
    }

    pub fn start(&self) -> Coordinate {
        self.coordinates[0]
    }

    pub fn end(&self) -> Coordinate {
        self.coordinates[self.last_index()]
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.coordinates.get(index).copied()
    }

    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    pub fn cumulative_distances(&self) -> &[f64] {
        &self.cumulative
    }

    /// Total length in meters
    pub fn total_length(&self) -> f64 {
        self.cumulative[self.last_index()]
    }

    /// Heading of segment `index`, clamped to the last segment.
    pub fn segment_heading(&self, index: usize) -> f64 {
        self.headings[index.min(self.headings.len() - 1)]
    }

    /// Maps a distance along the path onto a segment, a position and a heading.
    ///
    /// Distances at or before the start pin to the first vertex with progress
    /// 0; distances at or past the end pin to the last vertex with progress 1.
    pub fn locate(&self, distance_along: f64) -> Location {
        let last_segment = self.last_index() - 1;

        if !(distance_along > 0.0) {
            return Location {
                segment_index: 0,
                segment_progress: 0.0,
                position: self.start(),
                heading: self.segment_heading(0),
            };
        }

        if distance_along >= self.total_length() {
            return Location {
                segment_index: last_segment,
                segment_progress: 1.0,
                position: self.end(),
                heading: self.segment_heading(last_segment),
            };
        }

        // Largest vertex whose cumulative distance does not exceed the target.
        // Since the target is below the total, the following edge has a
        // positive length.
        let index = self.cumulative.partition_point(|&d| d <= distance_along) - 1;
        let index = index.min(last_segment);
        let length = self.segment_lengths[index + 1];
        let progress = if length > 0.0 {
            ((distance_along - self.cumulative[index]) / length).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Location {
            segment_index: index,
            segment_progress: progress,
            position: Interpolation::coordinate(
                &self.coordinates[index],
                &self.coordinates[index + 1],
                progress,
            ),
            heading: self.segment_heading(index),
        }
    }

    pub fn to_line_string(&self) -> geo_types::LineString<f64> {
        self.coordinates
            .iter()
            .map(|&c| geo_types::Coord::from(c))
            .collect()
    }
}

impl TryFrom<Vec<Coordinate>> for Path {
    type Error = Error;

    fn try_from(coordinates: Vec<Coordinate>) -> Result<Self> {
        Self::new(coordinates)
    }
}

impl TryFrom<geo_types::LineString<f64>> for Path {
    type Error = Error;

    fn try_from(line: geo_types::LineString<f64>) -> Result<Self> {
        Self::new(line.0.into_iter().map(Coordinate::from).collect())
    }
}
