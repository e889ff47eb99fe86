//! Product decoding and output

use std::fmt::Write;
use std::path::Path;

use anyhow::Context;
use log::{error, info};
use serde::Serialize;

use awips::{Decoded, Decoder, MesoscaleDiscussion, SpecialProduct, TextProduct};

use crate::cli::{Args, Command};

/// Run the application
///
/// Dispatches the subcommand given in `args`. The `decoder` is
/// fully configured.
pub fn run(args: &Args, decoder: &Decoder) -> Result<(), anyhow::Error> {
    match &args.command {
        Command::Parse { file, json } => parse(file, *json, decoder),
    }
}

/// JSON output
#[derive(Serialize)]
struct Output<'a> {
    product: &'a TextProduct,

    #[serde(skip_serializing_if = "Option::is_none")]
    mcd: Option<&'a MesoscaleDiscussion>,

    warnings: Vec<String>,
}

fn parse(file: &Path, json: bool, decoder: &Decoder) -> Result<(), anyhow::Error> {
    if file.is_dir() {
        println!("provided path is a directory");
        return Ok(());
    }

    info!("decoding file: \"{}\"", file.display());
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Unable to read \"{}\"", file.display()))?;

    let decoded = match decoder.decode(&text) {
        Ok(decoded) => decoded,
        Err(err) => {
            // undecodable products are reported, not fatal
            println!("{}", err);
            return Ok(());
        }
    };

    let mcd = if MesoscaleDiscussion::applies_to(&decoded.product.awips) {
        match MesoscaleDiscussion::decode(&text, decoder) {
            Ok(mcd) => Some(mcd),
            Err(err) => {
                error!("{}: {}", decoded.product.awips, err);
                None
            }
        }
    } else {
        None
    };

    if json {
        let output = Output {
            product: &decoded.product,
            mcd: mcd.as_ref(),
            warnings: decoded.warnings.iter().map(|w| w.to_string()).collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Unable to format JSON")?
        );
    } else {
        print!("{}", summary(&decoded, mcd.as_ref()));
    }

    Ok(())
}

// Human-readable summary of a decoded product
fn summary(decoded: &Decoded, mcd: Option<&MesoscaleDiscussion>) -> String {
    let product = &decoded.product;
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", product.awips, product.wmo);
    let _ = writeln!(out, "issued: {}", product.issued.to_rfc3339());
    if let Some(expires) = product.expires {
        let _ = writeln!(out, "expires: {}", expires.to_rfc3339());
    }
    if let Some(ends) = product.ends {
        let _ = writeln!(out, "ends: {}", ends.to_rfc3339());
    }

    for (i, segment) in product.segments.iter().enumerate() {
        let _ = writeln!(out, "segment {}:", i);
        for vtec in &segment.vtec {
            let _ = writeln!(out, "  vtec: {} {:#}", vtec.event_id(), vtec);
        }
        if let Some(ugc) = &segment.ugc {
            let codes: Vec<&str> = ugc.code_str_iter().collect();
            let _ = writeln!(out, "  ugc: {}", codes.join(" "));
        }
        if let Some(latlon) = &segment.latlon {
            let _ = writeln!(out, "  polygon: {} points", latlon.len());
        }
        if segment.is_emergency() {
            let _ = writeln!(out, "  EMERGENCY");
        }
        if segment.is_pds() {
            let _ = writeln!(out, "  PARTICULARLY DANGEROUS SITUATION");
        }
    }

    if let Some(mcd) = mcd {
        let _ = writeln!(out, "mesoscale discussion {}:", mcd.number);
        let _ = writeln!(
            out,
            "  valid: {} - {}",
            mcd.issued.to_rfc3339(),
            mcd.expires.to_rfc3339()
        );
        let _ = writeln!(out, "  concerning: {}", mcd.concerning);
        if let Some(pct) = mcd.watch_probability {
            let _ = writeln!(out, "  watch probability: {}%", pct);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVR: &str = "\
000
WUUS53 KMKX 102156
SVRMKX
WIC133-102230-
/O.NEW.KMKX.SV.W.0042.240610T2156Z-240610T2230Z/

Severe Thunderstorm Warning
National Weather Service Milwaukee/Sullivan WI
456 PM CDT Mon Jun 10 2024

LAT...LON 4305 8826 4311 8799 4290 8797 4284 8826

$$
";

    #[test]
    fn test_summary() {
        let decoded = TextProduct::new(SVR).expect("decode failed");
        let out = summary(&decoded, None);

        assert_eq!(
            out,
            "\
SVRMKX WUUS53 KMKX 102156
issued: 2024-06-10T21:56:00+00:00
expires: 2024-06-10T22:30:00+00:00
ends: 2024-06-10T22:30:00+00:00
segment 0:
  vtec: KMKX.SV.W.0042 Severe Thunderstorm Warning New (KMKX) #42
  ugc: WIC133
  polygon: 4 points
"
        );
    }

    #[test]
    fn test_json_unspecified_time() {
        let text = SVR.replace("240610T2156Z-240610T2230Z", "000000T0000Z-240610T2230Z");
        let decoded = TextProduct::new(&text).expect("decode failed");
        let output = Output {
            product: &decoded.product,
            mcd: None,
            warnings: vec![],
        };

        let json = serde_json::to_value(&output).expect("bad JSON");
        let vtec = &json["product"]["segments"][0]["vtec"][0];
        assert!(vtec["start"].is_null());
        assert_eq!(vtec["end"], "2024-06-10T22:30:00Z");
        assert!(json.get("mcd").is_none());
    }
}
