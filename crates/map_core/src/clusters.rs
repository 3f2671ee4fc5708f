//! Screen-space grouping of house markers.

use std::collections::HashMap;

use shared::domain::Coordinate;

/// Default grid cell edge in pixels.
pub const CLUSTER_CELL_PX: f32 = 60.0;
/// Fewer members than this are drawn as plain markers.
pub const MIN_CLUSTER_SIZE: usize = 2;

/// Markers that share one grid cell on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCluster {
    pub members: Vec<Coordinate>,
    /// Mean screen position of the members.
    pub screen: (f32, f32),
}

impl MarkerCluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_cluster(&self) -> bool {
        self.members.len() >= MIN_CLUSTER_SIZE
    }

    /// Geographic mean of the members, where a click on the badge zooms to.
    pub fn centroid(&self) -> Option<Coordinate> {
        if self.members.is_empty() {
            return None;
        }
        let n = self.members.len() as f64;
        let (lat, lng) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(lat, lng), c| (lat + c.lat, lng + c.lng));
        Some(Coordinate::new(lat / n, lng / n))
    }
}

/// Buckets projected markers into square cells of `cell_size` pixels.
///
/// Clusters come out in the order their first member was seen.
pub fn cluster_markers(
    markers: impl IntoIterator<Item = (Coordinate, (f32, f32))>,
    cell_size: f32,
) -> Vec<MarkerCluster> {
    let cell_size = cell_size.max(1.0);
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();
    let mut clusters: Vec<(MarkerCluster, (f32, f32))> = Vec::new();

    for (position, (x, y)) in markers {
        let cell = (
            (x / cell_size).floor() as i64,
            (y / cell_size).floor() as i64,
        );
        let slot = *index.entry(cell).or_insert_with(|| {
            clusters.push((
                MarkerCluster {
                    members: Vec::new(),
                    screen: (0.0, 0.0),
                },
                (0.0, 0.0),
            ));
            clusters.len() - 1
        });
        let (cluster, sum) = &mut clusters[slot];
        cluster.members.push(position);
        sum.0 += x;
        sum.1 += y;
    }

    clusters
        .into_iter()
        .map(|(mut cluster, (sx, sy))| {
            let n = cluster.members.len() as f32;
            cluster.screen = (sx / n, sy / n);
            cluster
        })
        .collect()
}
