use crate::chart::Figure;
use crate::report::IndicatorSlot;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save figures as one JSON array, the payload a Plotly front end expects.
pub fn save_figures_json<P: AsRef<Path>>(figures: &[Figure], path: P, pretty: bool) -> Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut f, figures)?;
    } else {
        serde_json::to_writer(&mut f, figures)?;
    }
    f.flush()?;
    Ok(())
}

/// Save the observations of every available slot as CSV with header, in slot order.
pub fn save_observations_csv<P: AsRef<Path>>(slots: &[IndicatorSlot], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "indicator_id",
        "indicator_name",
        "country_id",
        "country_name",
        "country_iso3",
        "year",
        "value",
    ))?;
    for p in slots.iter().flat_map(IndicatorSlot::observations) {
        wtr.serialize((
            &p.indicator_id,
            &p.indicator_name,
            &p.country_id,
            &p.country_name,
            &p.country_iso3,
            p.year,
            p.value,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}
