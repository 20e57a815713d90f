//! Info command implementation.

use serde::Serialize;

use poly_transform::{UnitBasedObject, Units};

use super::common::{
    CliError, CommonArgs, JsonPoint, JsonSegment, JsonVertex, OutputFormat, print_json,
    unknown_option, vertices,
};

/// Bounding box in JSON output format.
#[derive(Serialize)]
struct JsonBox {
    min: JsonPoint,
    max: JsonPoint,
}

#[derive(Serialize)]
struct InfoReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    unit: Units,
    points: Vec<JsonVertex>,
    centroid: JsonPoint,
    rotation: f64,
    bounding_box: Option<JsonBox>,
    signed_area: f64,
    clockwise: bool,
    segments: Vec<JsonSegment>,
}

/// Execute the info command.
pub fn cmd_info(args: &[String]) -> Result<(), CliError> {
    let mut common = CommonArgs::default();

    let mut i = 0;
    while i < args.len() {
        if !common.accept(args, &mut i)? {
            return Err(unknown_option(&args[i]));
        }
        i += 1;
    }

    let (scene, polygon) = common.load_polygon()?;

    let report = InfoReport {
        name: scene.name.clone(),
        unit: polygon.unit(),
        points: vertices(&polygon),
        centroid: polygon.centroid()?.into(),
        rotation: polygon.rotation(),
        bounding_box: polygon.bounding_box().map(|(min, max)| JsonBox {
            min: min.into(),
            max: max.into(),
        }),
        signed_area: polygon.signed_area(),
        clockwise: polygon.is_clockwise(),
        segments: polygon.segments().map(JsonSegment::from).collect(),
    };

    match common.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            if let Some(name) = &report.name {
                println!("{}", name);
            }
            println!("Points:    {} ({})", report.points.len(), report.unit);
            for p in &report.points {
                println!("  [{}] {:.3}, {:.3}", p.index, p.x, p.y);
            }
            println!("Centroid:  {:.3}, {:.3}", report.centroid.x, report.centroid.y);
            println!("Rotation:  {:.3}°", report.rotation);
            if let Some(bbox) = &report.bounding_box {
                println!(
                    "Bounds:    {:.3}, {:.3} -> {:.3}, {:.3}",
                    bbox.min.x, bbox.min.y, bbox.max.x, bbox.max.y
                );
            }
            println!(
                "Area:      {:.3} ({})",
                report.signed_area.abs(),
                if report.clockwise { "clockwise" } else { "counter-clockwise" }
            );
            println!("Segments:");
            for seg in &report.segments {
                println!(
                    "  [{}] {} -> {}  length {:.3}  angle {:.3}°",
                    seg.index, seg.from.index, seg.to.index, seg.length, seg.angle
                );
            }
        }
    }

    Ok(())
}
