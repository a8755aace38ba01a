use crate::grid::Heightfield;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// File extension of saved projects.
pub const PROJECT_EXT: &str = "terra";

/// On-disk project document: JSON, gzip-compressed. Altitudes are row-major,
/// `width * height` entries.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDoc {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub altitudes: Vec<f32>,
}

/// Write a project file. The field is serialized as-is; nothing in the
/// document depends on any later rendering choice.
///
/// JSON has no representation for `inf` or `NaN`, so non-finite altitudes
/// fail with [`io::ErrorKind::InvalidData`] before the file is touched.
pub fn save_project(path: &Path, name: &str, field: &Heightfield) -> io::Result<()> {
    if let Some(index) = field.cells().iter().position(|&a| !a.is_finite()) {
        let (x, y) = (index % field.width(), index / field.width());
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "altitude {} at ({x}, {y}) has no JSON representation",
                field.cells()[index]
            ),
        ));
    }

    let doc = ProjectDoc {
        name: name.to_string(),
        width: field.width() as u32,
        height: field.height() as u32,
        altitudes: field.cells().to_vec(),
    };
    let json = serde_json::to_vec(&doc)?;

    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(&json)?;
    encoder.finish()?;
    Ok(())
}

/// Read a project file back into a name and a heightfield.
pub fn load_project(path: &Path) -> io::Result<(String, Heightfield)> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json)?;

    let doc: ProjectDoc = serde_json::from_slice(&json)?;
    let cell_count = doc.width as usize * doc.height as usize;
    if doc.altitudes.len() != cell_count {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "project claims {}x{} ({cell_count} cells) but stores {} altitudes",
                doc.width,
                doc.height,
                doc.altitudes.len()
            ),
        ));
    }

    let field = Heightfield::from_cells(doc.width as usize, doc.height as usize, doc.altitudes);
    Ok((doc.name, field))
}
