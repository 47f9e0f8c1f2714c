use anyhow::Context;
use isarcore::ScatteringMatrix;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

/// Renders a matrix in the far-field text layout read by `isarcore::parser`.
pub fn render_response(matrix: &ScatteringMatrix) -> Result<String, fmt::Error> {
    let mut out = String::new();
    out.push_str("##File Type: Far field\n");
    out.push_str("##Source: isar-simulator\n");
    for (row, frequency) in matrix.frequencies_hz.iter().enumerate() {
        writeln!(out, "#Request Name: FarField1")?;
        writeln!(out, "#FREQUENCY = {frequency:.8E}")?;
        writeln!(out, "#No. of Theta Samples: {}", matrix.angles_deg.len())?;
        out.push_str("#\"Theta\" \"Phi\" \"Re(Etheta)\" \"Im(Etheta)\" \"Re(Ephi)\" \"Im(Ephi)\"\n");
        for (col, theta) in matrix.angles_deg.iter().enumerate() {
            let value = matrix.data[(row, col)];
            writeln!(
                out,
                "{theta:.8E} {phi:.8E} {re:.8E} {im:.8E} {zero:.8E} {zero:.8E}",
                phi = 90.0,
                re = value.re,
                im = value.im,
                zero = 0.0,
            )?;
        }
        out.push('\n');
    }
    Ok(out)
}

pub fn write_response(path: &Path, matrix: &ScatteringMatrix) -> anyhow::Result<()> {
    let text = render_response(matrix).context("formatting scattering response")?;
    fs::write(path, text)
        .with_context(|| format!("writing scattering response {}", path.display()))
}
