//! Scene documents: a polygon described in YAML (or JSON, which YAML reads too).
//!
//! ```yaml
//! name: crate
//! unit: world
//! context:
//!   pixels_per_unit: 32
//!   reference_size: [1920, 1080]
//! points: [[0, 0], [10, 0], [10, 10], [0, 10]]
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use poly_transform::{Polygon, UnitContext, UnitVector, Units};

use super::common::CliError;

/// A polygon plus the unit frame it is expressed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Optional label, echoed in reports
    #[serde(default)]
    pub name: Option<String>,

    /// Unit the point coordinates are written in
    #[serde(default)]
    pub unit: Units,

    /// Conversion reference frame
    #[serde(default)]
    pub context: UnitContext,

    /// Vertices in outline order
    pub points: Vec<[f64; 2]>,
}

impl Scene {
    /// Load a scene from a YAML or JSON file, or from stdin when the path is `-`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map(|_| buf)
        } else {
            fs::read_to_string(path)
        }
        .map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let scene = Self::parse(&content).map_err(|e| CliError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), points = scene.points.len(), "scene loaded");
        Ok(scene)
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Build the polygon, in the scene's unit.
    pub fn to_polygon(&self) -> Result<Polygon, CliError> {
        if self.points.is_empty() {
            return Err(CliError::Usage("scene has no points".to_string()));
        }
        let positions = self.points.iter().map(|&[x, y]| UnitVector::new(x, y, self.unit));
        Ok(Polygon::from_positions(positions, self.context)?)
    }
}
