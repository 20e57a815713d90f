//! Transform command: apply moves/rotations and print the resulting outline.
//!
//! Operations run in a fixed order regardless of flag order:
//! unit change, move, set-position, rotate, set-rotation, centroid.

use serde::Serialize;
use tracing::info;

use poly_transform::{Movable, Polygon, UnitBasedObject, UnitVector, Units};

use super::common::{
    CliError, CommonArgs, JsonPoint, JsonVertex, OutputFormat, parse_number, parse_pair,
    parse_unit, print_json, take_value, unknown_option, vertices,
};

#[derive(Serialize)]
struct TransformReport {
    unit: Units,
    rotation: f64,
    centroid: JsonPoint,
    points: Vec<JsonVertex>,
}

/// Requested operations, all optional.
#[derive(Default)]
struct Plan {
    unit: Option<Units>,
    offset: Option<(f64, f64)>,
    position: Option<(f64, f64)>,
    rotate: Option<f64>,
    set_rotation: Option<f64>,
    origin: Option<(f64, f64)>,
    centroid: Option<(f64, f64)>,
}

/// Execute the transform command.
pub fn cmd_transform(args: &[String]) -> Result<(), CliError> {
    let mut common = CommonArgs::default();
    let mut plan = Plan::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--move" => plan.offset = Some(parse_pair(take_value(args, &mut i)?)?),
            "--set-position" => plan.position = Some(parse_pair(take_value(args, &mut i)?)?),
            "-r" | "--rotate" => plan.rotate = Some(parse_number(take_value(args, &mut i)?)?),
            "--set-rotation" => {
                plan.set_rotation = Some(parse_number(take_value(args, &mut i)?)?)
            }
            "--origin" => plan.origin = Some(parse_pair(take_value(args, &mut i)?)?),
            "--centroid" => plan.centroid = Some(parse_pair(take_value(args, &mut i)?)?),
            "-u" | "--unit" => plan.unit = Some(parse_unit(take_value(args, &mut i)?)?),
            _ => {
                if !common.accept(args, &mut i)? {
                    return Err(unknown_option(&args[i]));
                }
            }
        }
        i += 1;
    }

    let (scene, mut polygon) = common.load_polygon()?;

    if let Some(unit) = plan.unit {
        polygon.set_unit(unit)?;
    }
    if let Some(offset) = plan.offset {
        polygon.move_by(common.vector(&scene, offset))?;
    }
    if let Some(position) = plan.position {
        polygon.set_position(common.vector(&scene, position))?;
    }

    // Rotations pivot on --origin, or the centroid at the time of rotating.
    let origin = plan.origin.map(|origin| common.vector(&scene, origin));
    let pivot = |polygon: &Polygon| -> Result<UnitVector, CliError> {
        match origin {
            Some(origin) => Ok(origin),
            None => Ok(polygon.centroid()?),
        }
    };
    if let Some(angle) = plan.rotate {
        let around = pivot(&polygon)?;
        polygon.rotate(angle, around)?;
    }
    if let Some(angle) = plan.set_rotation {
        let around = pivot(&polygon)?;
        polygon.set_rotation(angle, around)?;
    }
    if let Some(centroid) = plan.centroid {
        polygon.set_position_from_centroid(common.vector(&scene, centroid))?;
    }
    info!(points = polygon.points_amount(), rotation = polygon.rotation(), "transform applied");

    let report = TransformReport {
        unit: polygon.unit(),
        rotation: polygon.rotation(),
        centroid: polygon.centroid()?.into(),
        points: vertices(&polygon),
    };

    match common.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("Rotation: {:.3}°  Unit: {}", report.rotation, report.unit);
            println!("Centroid: {:.3}, {:.3}", report.centroid.x, report.centroid.y);
            for p in &report.points {
                println!("  [{}] {:.3}, {:.3}", p.index, p.x, p.y);
            }
        }
    }

    Ok(())
}
