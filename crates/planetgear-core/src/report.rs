//! Text and JSON-lines renderers for search events.

use std::io::{self, Write};

use tracing::error;

use crate::sink::{SearchEvent, SearchSink};
use crate::types::ValidatedDesign;

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

// ---------------------------------------------------------------------------
// TextReport
// ---------------------------------------------------------------------------

/// Human-readable report:
///
/// ```text
/// Beginning search...
/// Z1_max=28, Z2_max=26, Z3_max=62
///
/// Z3 = 12
/// ...
/// Ratio=6.5, Config=2AA, Member Function=1v, Error=0, Num. Planets = 3
/// Z1=13, Z2a=26, Z2b=12, Z3=45
/// D1=38.., D2a=76.., D2b=24, D3=90
/// Modulus_Z1=2.923.., Modulus_Z3=2, Efficiency=0.885
///
/// Search complete
/// ```
pub struct TextReport<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextReport<W> {
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_event(&mut self, event: &SearchEvent<'_>) -> io::Result<()> {
        match *event {
            SearchEvent::Started { bounds, .. } => {
                writeln!(self.out, "Beginning search...")?;
                writeln!(
                    self.out,
                    "Z1_max={}, Z2_max={}, Z3_max={}\n",
                    bounds.z1_max, bounds.z2_max, bounds.z3_max
                )
            }
            SearchEvent::Progress { z3 } => writeln!(self.out, "Z3 = {z3}"),
            SearchEvent::Accepted(design) => write_design(&mut self.out, design),
            SearchEvent::Completed(summary) => {
                if summary.cancelled {
                    writeln!(
                        self.out,
                        "Search cancelled after {} annular tooth counts",
                        summary.z3_completed
                    )
                } else {
                    writeln!(self.out, "Search complete")
                }
            }
        }
    }
}

fn write_design(out: &mut impl Write, d: &ValidatedDesign) -> io::Result<()> {
    let c = &d.candidate;
    let p = &d.pitch_diameters;
    writeln!(
        out,
        "Ratio={}, Config={}, Member Function={}, Error={}, Num. Planets = {}",
        round6(d.ratio),
        d.configuration,
        d.member_function,
        d.error_percent,
        d.planet_count
    )?;
    writeln!(out, "{c}")?;
    writeln!(out, "D1={}, D2a={}, D2b={}, D3={}", p.d1, p.d2a, p.d2b, p.d3)?;
    writeln!(
        out,
        "Modulus_Z1={}, Modulus_Z3={}, Efficiency={:.3}\n",
        d.moduli.modulus_z1, d.moduli.modulus_z3, d.efficiency
    )
}

impl<W: Write> SearchSink for TextReport<W> {
    fn event(&mut self, event: &SearchEvent<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_event(event) {
            error!("planetgear: failed to write report: {e}");
            self.error = Some(e);
        }
    }
}

// ---------------------------------------------------------------------------
// JsonLinesReport
// ---------------------------------------------------------------------------

/// One JSON object per event, newline separated.
pub struct JsonLinesReport<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesReport<W> {
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> SearchSink for JsonLinesReport<W> {
    fn event(&mut self, event: &SearchEvent<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(e) = result {
            error!("planetgear: failed to write JSON event: {e}");
            self.error = Some(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
