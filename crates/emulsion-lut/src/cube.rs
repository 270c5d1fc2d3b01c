//! Adobe/Resolve `.cube` 3D LUT format support.
//!
//! The `.cube` format is a plain-text LUT format emitted by DaVinci
//! Resolve, Adobe applications, and most film-look marketplaces. Parsing
//! is strict: any conforming 3D file must load, and a malformed file must
//! fail with the offending line in the error.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "Look Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```

use crate::lut3d::{MAX_SIZE, MIN_SIZE};
use crate::{CubeError, CubeLut, CubeResult};
use emulsion_core::hash;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads a 3D LUT from a `.cube` file on disk.
pub fn read<P: AsRef<Path>>(path: P) -> CubeResult<CubeLut> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse(&name, &text)
}

/// Parses a 3D LUT from `.cube` text.
///
/// `name` identifies the source file; together with the byte size, declared
/// cube size, and title it determines the asset id, so re-parsing the same
/// file always yields the same id.
pub fn parse(name: &str, text: &str) -> CubeResult<CubeLut> {
    let mut size: Option<usize> = None;
    let mut title = String::new();
    let mut domain_min = [0.0f32; 3];
    let mut domain_max = [1.0f32; 3];
    let mut data: Vec<[f32; 3]> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("TITLE") {
            title = rest.trim().trim_matches('"').to_string();
        } else if line.starts_with("LUT_3D_SIZE") {
            size = Some(parse_size(line)?);
        } else if line.starts_with("LUT_1D_SIZE") {
            return Err(CubeError::Unsupported1D(line.to_string()));
        } else if line.starts_with("DOMAIN_MIN") {
            domain_min = parse_triple(line_no, line, true)?;
        } else if line.starts_with("DOMAIN_MAX") {
            domain_max = parse_triple(line_no, line, true)?;
        } else {
            data.push(parse_triple(line_no, line, false)?);
        }
    }

    let size = size.ok_or(CubeError::MissingSize)?;
    let expected = size * size * size;
    if data.len() != expected {
        return Err(CubeError::SampleCountMismatch {
            size,
            expected,
            found: data.len(),
        });
    }

    let id = asset_id(name, text.len(), size, &title);
    let display = if title.is_empty() { name } else { &title };
    let lut = CubeLut::from_data(id, display, size, data)?;
    Ok(lut.with_domain(domain_min, domain_max))
}

/// Writes a LUT back out as `.cube` text.
pub fn write<W: Write>(writer: W, lut: &CubeLut) -> CubeResult<()> {
    let mut w = BufWriter::new(writer);
    writeln!(w, "# Generated by emulsion")?;
    if !lut.name.is_empty() {
        writeln!(w, "TITLE \"{}\"", lut.name)?;
    }
    writeln!(w, "LUT_3D_SIZE {}", lut.size)?;
    if lut.domain_min != [0.0; 3] || lut.domain_max != [1.0; 3] {
        let min = lut.domain_min;
        let max = lut.domain_max;
        writeln!(w, "DOMAIN_MIN {} {} {}", min[0], min[1], min[2])?;
        writeln!(w, "DOMAIN_MAX {} {} {}", max[0], max[1], max[2])?;
    }
    writeln!(w)?;
    for rgb in &lut.data {
        writeln!(w, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
    }
    w.flush()?;
    Ok(())
}

/// Writes a LUT to a `.cube` file on disk.
pub fn write_file<P: AsRef<Path>>(path: P, lut: &CubeLut) -> CubeResult<()> {
    let file = fs::File::create(path.as_ref())?;
    write(file, lut)
}

/// Deterministic asset id from the source file identity.
fn asset_id(name: &str, byte_len: usize, size: usize, title: &str) -> String {
    let mut h = hash::hash_bytes(name.as_bytes());
    h = hash::fold(h, byte_len as u64);
    h = hash::fold(h, size as u64);
    h = hash::fold(h, hash::hash_bytes(title.as_bytes()) as u64);
    format!("cube-{h:08x}")
}

fn parse_size(line: &str) -> CubeResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(CubeError::InvalidSize(line.to_string()));
    }
    let size: usize = parts[1]
        .parse()
        .map_err(|_| CubeError::InvalidSize(line.to_string()))?;
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(CubeError::InvalidSize(line.to_string()));
    }
    Ok(size)
}

/// Parses exactly three numeric values, with or without a leading keyword.
fn parse_triple(line_no: usize, line: &str, keyword: bool) -> CubeResult<[f32; 3]> {
    let malformed = || CubeError::MalformedLine {
        line: line_no,
        expected: 3,
        text: line.to_string(),
    };
    let mut parts = line.split_whitespace();
    if keyword {
        parts.next();
    }
    let parts: Vec<&str> = parts.collect();
    if parts.len() != 3 {
        return Err(malformed());
    }
    let mut out = [0.0f32; 3];
    for (dst, tok) in out.iter_mut().zip(parts) {
        *dst = tok.parse().map_err(|_| malformed())?;
    }
    Ok(out)
}
