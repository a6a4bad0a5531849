use std::io::Write;
use std::path::Path;

use crate::data::projection::ProjectedTable;
use crate::data::ranking::ranking_rows;

fn cell(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// Write the ranking table as CSV. Missing scores are empty cells.
pub fn write_ranking_csv<W: Write>(mut out: W, table: &ProjectedTable) -> std::io::Result<()> {
    writeln!(out, "material,sel,psa_L,psa_W")?;
    for r in ranking_rows(table) {
        let label = if r.label.contains([',', '"']) {
            format!("\"{}\"", r.label.replace('"', "\"\""))
        } else {
            r.label.to_string()
        };
        writeln!(
            out,
            "{},{},{},{}",
            label,
            cell(r.sel),
            cell(r.psa_loading),
            cell(r.psa_working_capacity)
        )?;
    }
    Ok(())
}

pub fn save_ranking_csv<P: AsRef<Path>>(path: P, table: &ProjectedTable) -> std::io::Result<()> {
    let mut f = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_ranking_csv(&mut f, table)?;
    f.flush()
}
