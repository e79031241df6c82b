//! Headless heightfield queries.
use std::error::Error;
use std::fmt::Write as _;

use strata_terrain::{CellTriangle, HeightField, HeightFieldLoader};

use crate::config::Config;

pub fn run(cfg: &Config, points: &[(f32, f32)]) -> Result<(), Box<dyn Error>> {
    let t = &cfg.terrain;
    let field = HeightFieldLoader::new(t.scale).load(&t.description, t.method)?;
    print!("{}", summary(&field));
    for &(x, z) in points {
        println!("{}", query_line(&field, x, z));
    }
    Ok(())
}

/// Parses `x,z` as given to `--at`.
pub fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,z but got '{}'", s))?;
    let num = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|_| format!("'{}' is not a number", v.trim()))
    };
    Ok((num(x)?, num(z)?))
}

pub fn summary(field: &HeightField) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "grid {} rows x {} cols, origin ({}, {}), cell {} x {}, scale {}",
        field.num_rows(),
        field.num_cols(),
        field.origin_x(),
        field.origin_z(),
        field.cell_size_x(),
        field.cell_size_z(),
        field.scale()
    );
    let _ = writeln!(
        out,
        "extent x [{}, {}] z [{}, {}], height [{}, {}]",
        field.origin_x(),
        field.max_x(),
        field.origin_z(),
        field.max_z(),
        field.min_height(),
        field.max_height()
    );
    out
}

pub fn query_line(field: &HeightField, x: f32, z: f32) -> String {
    let Some(pos) = field.locate(x, z) else {
        return format!("({}, {}): out of bounds", x, z);
    };
    let tri = match CellTriangle::select(pos.frac_col, pos.frac_row) {
        CellTriangle::Abc => "ABC",
        CellTriangle::Acd => "ACD",
    };
    let mut line = format!(
        "({}, {}): cell ({}, {}) frac ({:.3}, {:.3}) {}",
        x, z, pos.row, pos.col, pos.frac_col, pos.frac_row, tri
    );
    match field.height_at_position(&pos) {
        Some(h) => {
            let _ = write!(line, " height {:.4}", h);
        }
        None => line.push_str(" height out of bounds"),
    }
    match field.normal_at_position(&pos) {
        Some(n) => {
            let _ = write!(line, " normal ({:.4}, {:.4}, {:.4})", n.x, n.y, n.z);
        }
        None => line.push_str(" normal out of bounds"),
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> HeightField {
        HeightField::from_samples(0.0, 0.0, 1.0, 1.0, 2, 2, vec![0.0, 0.0, 0.0, 10.0]).unwrap()
    }

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("1.5, -2").unwrap(), (1.5, -2.0));
        assert!(parse_point("1.5").is_err());
        assert!(parse_point("a,2").is_err());
    }

    #[test]
    fn query_reports_height_and_triangle() {
        let line = query_line(&ramp(), 0.5, 0.5);
        assert!(line.contains("ACD"), "{line}");
        assert!(line.contains("height 5.0000"), "{line}");
    }

    #[test]
    fn query_reports_out_of_bounds() {
        assert_eq!(query_line(&ramp(), -1.0, 0.5), "(-1, 0.5): out of bounds");
        let far = query_line(&ramp(), 1.0, 0.5);
        assert!(far.contains("normal out of bounds"), "{far}");
    }

    #[test]
    fn summary_lists_dimensions() {
        let s = summary(&ramp());
        assert!(s.starts_with("grid 2 rows x 2 cols"));
        assert!(s.contains("height [0, 10]"));
    }
}
