//! Near command: tolerance-box hit tests for vertices and the centroid.

use serde::Serialize;

use super::common::{
    CliError, CommonArgs, JsonVertex, OutputFormat, parse_pair, print_json, take_value,
    unknown_option,
};

#[derive(Serialize)]
struct NearReport {
    /// First vertex inside the box, in index order
    point: Option<JsonVertex>,
    centroid: bool,
}

/// Execute the near command.
pub fn cmd_near(args: &[String]) -> Result<(), CliError> {
    let mut common = CommonArgs::default();
    let mut at: Option<(f64, f64)> = None;
    let mut tolerance = (0.5, 0.5);

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--at" => at = Some(parse_pair(take_value(args, &mut i)?)?),
            "-t" | "--tolerance" => tolerance = parse_pair(take_value(args, &mut i)?)?,
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
    let tolerance = common.vector(&scene, tolerance);

    let report = NearReport {
        point: polygon
            .point_around_position(position, tolerance)?
            .map(|p| p.point().into()),
        centroid: polygon.is_centroid_around_position(position, tolerance)?,
    };

    match common.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            match &report.point {
                Some(p) => println!("Point {} at {:.3}, {:.3}", p.index, p.x, p.y),
                None => println!("No point nearby"),
            }
            println!("Centroid nearby: {}", if report.centroid { "yes" } else { "no" });
        }
    }

    Ok(())
}
