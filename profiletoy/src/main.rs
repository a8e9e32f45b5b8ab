//! Load curves, replay drags, and print the resulting rows as JSON.
//!
//! ```text
//! profiletoy [CURVES.json] [--options FILE] [--samples N]
//!            [--drag X,Y,X2,Y2]... [--save FILE] [--rows FILE]
//! ```
//!
//! Drag coordinates are in curve units; each drag presses at `X,Y` and
//! releases at `X2,Y2`.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use kurbo::Point;

use profiletoy::{default_curve, Document, EditSession, EditorOptions, Select};

#[derive(Debug, Default)]
struct Args {
    curves: Option<PathBuf>,
    options: Option<PathBuf>,
    samples: Option<usize>,
    drags: Vec<(Point, Point)>,
    save: Option<PathBuf>,
    rows: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| anyhow!("{} needs a value", arg));
        match arg.as_str() {
            "--options" => args.options = Some(value()?.into()),
            "--samples" => {
                let n = value()?;
                args.samples = Some(n.parse().with_context(|| format!("bad sample count {}", n))?)
            }
            "--drag" => args.drags.push(parse_drag(&value()?)?),
            "--save" => args.save = Some(value()?.into()),
            "--rows" => args.rows = Some(value()?.into()),
            s if s.starts_with("--") => bail!("unknown option {}", s),
            _ if args.curves.is_none() => args.curves = Some(PathBuf::from(&arg)),
            _ => bail!("unexpected argument {}", arg),
        }
    }
    Ok(args)
}

fn parse_drag(s: &str) -> anyhow::Result<(Point, Point)> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("bad drag {}", s))?;
    match coords.as_slice() {
        [x, y, x2, y2] => Ok((Point::new(*x, *y), Point::new(*x2, *y2))),
        _ => bail!("drag needs four numbers, got {}", s),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let mut options = match &args.options {
        Some(path) => EditorOptions::load_from_file(path),
        None => EditorOptions::default(),
    };
    if let Some(n) = args.samples {
        options.sample_count = n;
    }
    let doc = match &args.curves {
        Some(path) => Document::load(path)?,
        None => Document::Single(default_curve()),
    };

    let mut session = EditSession::new(&doc, &options)?;
    let mut tool = Select::default();
    for (from, to) in &args.drags {
        let down = session.to_screen(*from);
        if tool.pointer_down(down, &mut session).is_none() {
            log::warn!("no point at {:?}, skipping drag", from);
            continue;
        }
        tool.pointer_moved(session.to_screen(*to), &mut session)?;
        tool.pointer_up(&mut session);
    }

    if let Some(path) = &args.save {
        session.to_document().save(path)?;
    }
    if let Some(path) = &args.rows {
        session.rows().save(path)?;
    }
    println!("{}", session.rows().to_json()?);
    Ok(())
}
