//! Common utilities shared across CLI commands.

use serde::Serialize;
use thiserror::Error;

use poly_transform::{
    GeometryError, Polygon, PolygonPoint, PolygonSegment, UnitContext, UnitVector, Units,
};

use super::scene::Scene;

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene {path}: {message}")]
    Parse { path: String, message: String },
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for command results.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options every command understands.
#[derive(Debug, Default)]
pub struct CommonArgs {
    pub scene_path: Option<String>,
    pub format: OutputFormat,
    /// Unit for positions given on the command line (default: scene unit)
    pub input_unit: Option<Units>,
    pub pixels_per_unit: Option<f64>,
    pub reference_size: Option<(f64, f64)>,
}

impl CommonArgs {
    /// Try to consume `args[*i]` (and its value). Returns `Ok(false)` for
    /// options this struct doesn't know about.
    pub fn accept(&mut self, args: &[String], i: &mut usize) -> Result<bool, CliError> {
        match args[*i].as_str() {
            "--json" => self.format = OutputFormat::Json,
            "-f" | "--format" => {
                self.format = match take_value(args, i)?.to_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "text" => OutputFormat::Text,
                    other => {
                        return Err(CliError::Usage(format!(
                            "Unknown format: {}. Use 'text' or 'json'.",
                            other
                        )));
                    }
                };
            }
            "--in" => {
                let name = take_value(args, i)?;
                self.input_unit = Some(parse_unit(name)?);
            }
            "--pixels-per-unit" => {
                self.pixels_per_unit = Some(parse_number(take_value(args, i)?)?);
            }
            "--reference" => {
                self.reference_size = Some(parse_size(take_value(args, i)?)?);
            }
            // `-` reads the scene from stdin
            other if (other == "-" || !other.starts_with('-')) && self.scene_path.is_none() => {
                self.scene_path = Some(other.to_string());
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Load the scene, apply context overrides, and build the polygon.
    pub fn load_polygon(&self) -> Result<(Scene, Polygon), CliError> {
        let path = self
            .scene_path
            .as_deref()
            .ok_or_else(|| CliError::Usage("Error: scene file required".to_string()))?;
        let mut scene = Scene::load(path)?;
        scene.context = self.context_for(&scene);
        let polygon = scene.to_polygon()?;
        Ok((scene, polygon))
    }

    fn context_for(&self, scene: &Scene) -> UnitContext {
        let mut context = scene.context;
        if let Some(ppu) = self.pixels_per_unit {
            context.pixels_per_unit = ppu;
        }
        if let Some(size) = self.reference_size {
            context.reference_size = Some(size);
        }
        context
    }

    /// Tag a command-line coordinate pair with the input unit. Without
    /// `--in` that is the unit the scene file is written in, even after the
    /// polygon's working unit has been changed.
    pub fn vector(&self, scene: &Scene, (x, y): (f64, f64)) -> UnitVector {
        UnitVector::new(x, y, self.input_unit.unwrap_or(scene.unit))
    }
}

/// Value following an option, advancing `i`.
pub fn take_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    let option = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{} requires a value", option)))
}

pub fn parse_number(s: &str) -> Result<f64, CliError> {
    s.trim()
        .parse()
        .map_err(|_| CliError::Usage(format!("not a number: {}", s)))
}

/// Parse "x,y".
pub fn parse_pair(s: &str) -> Result<(f64, f64), CliError> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| CliError::Usage(format!("expected x,y but got {}", s)))?;
    Ok((parse_number(x)?, parse_number(y)?))
}

/// Parse "WxH".
pub fn parse_size(s: &str) -> Result<(f64, f64), CliError> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| CliError::Usage(format!("expected WxH but got {}", s)))?;
    Ok((parse_number(w)?, parse_number(h)?))
}

/// Parse "0,2,5".
pub fn parse_indices(s: &str) -> Result<Vec<usize>, CliError> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| CliError::Usage(format!("not an index: {}", part)))
        })
        .collect()
}

pub fn parse_unit(name: &str) -> Result<Units, CliError> {
    Units::from_name(name).ok_or_else(|| {
        CliError::Usage(format!(
            "Unknown unit: {}. Use one of: {}",
            name,
            Units::all().iter().map(Units::name).collect::<Vec<_>>().join(", ")
        ))
    })
}

pub fn unknown_option(option: &str) -> CliError {
    CliError::Usage(format!("Unknown option: {}", option))
}

/// A point in JSON output format.
#[derive(Debug, Serialize)]
pub struct JsonPoint {
    pub x: f64,
    pub y: f64,
}

impl From<UnitVector> for JsonPoint {
    fn from(v: UnitVector) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// A polygon vertex in JSON output format.
#[derive(Debug, Serialize)]
pub struct JsonVertex {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// A polygon edge in JSON output format.
#[derive(Debug, Serialize)]
pub struct JsonSegment {
    pub index: usize,
    pub from: JsonVertex,
    pub to: JsonVertex,
    pub length: f64,
    pub angle: f64,
}

impl From<&PolygonPoint> for JsonVertex {
    fn from(p: &PolygonPoint) -> Self {
        Self {
            index: p.index(),
            x: p.position().x,
            y: p.position().y,
        }
    }
}

impl From<PolygonSegment<'_>> for JsonSegment {
    fn from(seg: PolygonSegment<'_>) -> Self {
        Self {
            index: seg.index(),
            from: seg.first.point().into(),
            to: seg.second.point().into(),
            length: seg.length(),
            angle: seg.angle(),
        }
    }
}

pub fn vertices(polygon: &Polygon) -> Vec<JsonVertex> {
    polygon.points().iter().map(JsonVertex::from).collect()
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_pairs_sizes_and_indices() {
        assert_eq!(parse_pair("1.5, -2").unwrap(), (1.5, -2.0));
        assert_eq!(parse_size("1920x1080").unwrap(), (1920.0, 1080.0));
        assert_eq!(parse_indices("0, 2,5").unwrap(), vec![0, 2, 5]);
        assert!(parse_pair("3").is_err());
        assert!(parse_indices("a").is_err());
    }

    #[test]
    fn common_args_consume_known_options() {
        let argv = args(&["scene.yaml", "--json", "--reference", "800x600", "--bogus"]);
        let mut common = CommonArgs::default();
        let mut i = 0;
        assert!(common.accept(&argv, &mut i).unwrap());
        i += 1;
        assert!(common.accept(&argv, &mut i).unwrap());
        i += 1;
        assert!(common.accept(&argv, &mut i).unwrap());
        assert_eq!(i, 3);
        i += 1;
        assert!(!common.accept(&argv, &mut i).unwrap());

        assert_eq!(common.scene_path.as_deref(), Some("scene.yaml"));
        assert_eq!(common.format, OutputFormat::Json);
        assert_eq!(common.reference_size, Some((800.0, 600.0)));
    }

    #[test]
    fn missing_option_value_is_usage_error() {
        let argv = args(&["--in"]);
        let mut i = 0;
        let err = CommonArgs::default().accept(&argv, &mut i).unwrap_err();
        assert_eq!(err.to_string(), "--in requires a value");
    }
}
