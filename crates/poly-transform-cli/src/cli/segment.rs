//! Segment command: which edge (if any) a position lies on.

use poly_transform::DEFAULT_SEGMENT_TOLERANCE;

use super::common::{
    CliError, CommonArgs, JsonSegment, OutputFormat, parse_number, parse_pair, print_json,
    take_value, unknown_option,
};

/// Execute the segment command.
pub fn cmd_segment(args: &[String]) -> Result<(), CliError> {
    let mut common = CommonArgs::default();
    let mut at: Option<(f64, f64)> = None;
    let mut tolerance = DEFAULT_SEGMENT_TOLERANCE;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--at" => at = Some(parse_pair(take_value(args, &mut i)?)?),
            "-t" | "--tolerance" => tolerance = parse_number(take_value(args, &mut i)?)?,
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

    let found: Option<JsonSegment> = polygon
        .segment_containing_point(position, tolerance)?
        .map(JsonSegment::from);

    match common.format {
        // `null` when no edge qualifies
        OutputFormat::Json => print_json(&found)?,
        OutputFormat::Text => match found {
            Some(seg) => println!(
                "On segment {} ({} -> {}), angle {:.3}°",
                seg.index, seg.from.index, seg.to.index, seg.angle
            ),
            None => println!("Not on any segment (tolerance {})", tolerance),
        },
    }

    Ok(())
}
