//! Closest command: nearest vertex (or edge) to a position.

use serde::Serialize;

use poly_transform::{Polygon, UnitVector};

use super::common::{
    CliError, CommonArgs, JsonSegment, JsonVertex, OutputFormat, parse_indices, parse_pair,
    print_json, take_value, unknown_option,
};

/// Either `point` or `segment` is set.
#[derive(Serialize)]
struct ClosestReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    point: Option<JsonVertex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    segment: Option<JsonSegment>,
    distance: f64,
}

/// Execute the closest command.
pub fn cmd_closest(args: &[String]) -> Result<(), CliError> {
    let mut common = CommonArgs::default();
    let mut at: Option<(f64, f64)> = None;
    let mut neighbor = false;
    let mut line = false;
    let mut excluded: Vec<usize> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--at" => at = Some(parse_pair(take_value(args, &mut i)?)?),
            "-n" | "--neighbor" => neighbor = true,
            "-l" | "--line" => line = true,
            "-x" | "--exclude" => excluded.extend(parse_indices(take_value(args, &mut i)?)?),
            _ => {
                if !common.accept(args, &mut i)? {
                    return Err(unknown_option(&args[i]));
                }
            }
        }
        i += 1;
    }

    let at = at.ok_or_else(|| CliError::Usage("Error: --at x,y required".to_string()))?;
    let (scene, polygon) = common.load_polygon()?;
    let position = common.vector(&scene, at);

    let report = if line {
        closest_line(&polygon, position)?
    } else {
        closest_point(&polygon, position, neighbor, &excluded)?
    };

    match common.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            if let Some(vertex) = &report.point {
                println!(
                    "Point {} at {:.3}, {:.3} (distance {:.3})",
                    vertex.index, vertex.x, vertex.y, report.distance
                );
            }
            if let Some(segment) = &report.segment {
                println!(
                    "Segment {} ({} -> {}) (distance {:.3})",
                    segment.index, segment.from.index, segment.to.index, report.distance
                );
            }
        }
    }

    Ok(())
}

fn closest_point(
    polygon: &Polygon,
    position: UnitVector,
    neighbor: bool,
    excluded: &[usize],
) -> Result<ClosestReport, CliError> {
    let point = polygon.find_closest_point(position, neighbor, excluded)?;
    Ok(ClosestReport {
        point: Some(point.point().into()),
        segment: None,
        distance: point.distance(position)?,
    })
}

fn closest_line(polygon: &Polygon, position: UnitVector) -> Result<ClosestReport, CliError> {
    let segment = polygon.find_closest_line(position)?;
    let local = position.to(segment.first.position().unit, polygon.context())?;
    Ok(ClosestReport {
        point: None,
        distance: segment.segment().distance_to(local),
        segment: Some(segment.into()),
    })
}
