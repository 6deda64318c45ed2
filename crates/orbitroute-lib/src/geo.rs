//! Spherical coverage model for satellites and ground stations.
//!
//! Every node is placed on a sphere of radius [`EARTH_RADIUS_KM`]. A node at
//! altitude `h` sees the surface up to its horizon, which subtends the
//! *coverage angle* `acos(R / (R + h))` at the centre of the sphere. Two nodes
//! can see each other when their coverage cones jointly span the angle
//! between their ground projections.

use serde::Serialize;

use crate::error::{Error, Result};

/// Fixed planetary radius used by the coverage model, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Cartesian position of a node's ground projection, in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SurfacePoint {
    /// Project a latitude/longitude pair (degrees) onto the model sphere.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        let lat = latitude.to_radians();
        let lon = longitude.to_radians();
        Self {
            x: EARTH_RADIUS_KM * lat.cos() * lon.cos(),
            y: EARTH_RADIUS_KM * lat.cos() * lon.sin(),
            z: EARTH_RADIUS_KM * lat.sin(),
        }
    }

    /// Angle at the sphere's centre between two surface points, in degrees.
    ///
    /// The cosine is clamped to `[-1, 1]` because rounding can push it just
    /// outside the domain of `acos` for nearly identical or antipodal points.
    /// Identical points short-circuit to exactly zero.
    pub fn angle_to(&self, other: &Self) -> f64 {
        if self == other {
            return 0.0;
        }
        let dot = self.x * other.x + self.y * other.y + self.z * other.z;
        let cosine = (dot / (EARTH_RADIUS_KM * EARTH_RADIUS_KM)).clamp(-1.0, 1.0);
        cosine.acos().to_degrees()
    }
}

/// A satellite or ground station in the relay network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoNode {
    id: String,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    coverage: f64,
}

impl GeoNode {
    /// Create a node. Altitude is in kilometres above the model sphere.
    ///
    /// Coordinates are not validated here; see [`GeoNode::validate`].
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            altitude,
            coverage: coverage_angle(altitude),
        }
    }

    /// Create a node on the surface (altitude 0).
    pub fn ground_station(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(id, latitude, longitude, 0.0)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Half-angle of the node's horizon cone in degrees; `0` on the surface.
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    pub fn is_ground_station(&self) -> bool {
        self.altitude == 0.0
    }

    /// Ground projection of this node. Altitude is ignored.
    pub fn surface_point(&self) -> SurfacePoint {
        SurfacePoint::from_degrees(self.latitude, self.longitude)
    }

    /// Angle between the ground projections of two nodes, in degrees.
    pub fn angular_distance(&self, other: &GeoNode) -> f64 {
        self.surface_point().angle_to(&other.surface_point())
    }

    /// Whether the coverage cones of both nodes overlap.
    pub fn can_see(&self, other: &GeoNode) -> bool {
        self.coverage + other.coverage >= self.angular_distance(other)
    }

    /// Check the coordinate preconditions of the coverage model.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Error::InvalidCoordinate {
            id: self.id.clone(),
            message,
        };

        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(invalid(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(invalid(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        if !self.altitude.is_finite() || self.altitude < 0.0 {
            return Err(invalid(format!(
                "altitude {} must be a finite value >= 0",
                self.altitude
            )));
        }
        Ok(())
    }
}

/// Coverage half-angle in degrees for a node at `altitude` kilometres.
pub fn coverage_angle(altitude: f64) -> f64 {
    (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + altitude)).acos().to_degrees()
}
