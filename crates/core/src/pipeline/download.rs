use std::{
    io::{BufWriter, Write, stdout},
    path::Path,
};

use crate::{
    error::{Error, Result},
    http::Transport,
    io::OutputFile,
};

/// Stream one remote font to `destination`, creating its directory first.
///
/// Returns the number of bytes written. Nothing about the payload is verified.
pub fn download_font(transport: &dyn Transport, source: &str, destination: &Path) -> Result<u64> {
    print!("Downloading {}... ", destination.display());
    let _ = stdout().flush();

    let file = OutputFile::new(destination);
    let mut sink = BufWriter::new(file.create()?);
    let bytes = transport.stream(source, &mut sink)?;
    sink.flush().map_err(|e| Error::io("Failed to write", destination, e))?;

    let size_kb = bytes as f64 / 1024.0;
    println!("OK ({size_kb:.1} KB)");
    Ok(bytes)
}
