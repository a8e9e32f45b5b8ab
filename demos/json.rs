//! Read a curve pair from a JSON file and print an SVG of the curves and the
//! resampled gap rows.

use kurbo::BezPath;

use bezier_profile::{Path, ProfileDescription, Resampler};

fn main() -> Result<(), bezier_profile::Error> {
    let path = std::env::args().nth(1).expect("needs filename");
    let n = std::env::args()
        .nth(2)
        .map(|n| n.parse().expect("sample count must be a number"))
        .unwrap_or(8);
    let data = std::fs::read_to_string(path).unwrap();
    let profile = ProfileDescription::from_json(&data)?;
    let curve1 = Path::from_description(&profile.curve1)?;
    let curve2 = Path::from_description(&profile.curve2)?;

    let resampler = Resampler::new();
    let rows = resampler.compute_pair(&curve1, &curve2, n)?;
    let domain = resampler.domain();

    let mut bp = BezPath::new();
    bp.extend(curve1.render().elements().iter().copied());
    bp.extend(curve2.render().elements().iter().copied());
    println!(
        r##"<!DOCTYPE html>
<html>
    <body>
    <svg height="{}" width="{}">
      <path d="{}" fill="none" stroke="#111" />"##,
        domain.height(),
        domain.width(),
        bp.to_svg()
    );
    for row in &rows {
        let x = domain.x0 + row.x * domain.width();
        let y = domain.y0 + row.y * domain.height();
        let y2 = domain.y0 + row.y2 * domain.height();
        println!(
            r#"      <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="red" />"#,
            x, y, x, y2
        );
    }
    println!(
        r#"    </svg>
    </body>
</html>"#
    );
    eprintln!("{}", serde_json::to_string(&rows).unwrap());
    Ok(())
}
