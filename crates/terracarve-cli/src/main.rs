use crate::{
    cli::{Cli, Commands},
    export::export_projects,
};
use anyhow::{bail, Context};
use clap::Parser;
use heightfield::grid::Heightfield;
use heightfield::project::{load_project, save_project, PROJECT_EXT};
use std::path::Path;
use terracarve::tga::{self, TgaCompression};

mod cli;
mod export;
mod shell;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::New {
            output,
            width,
            height,
            altitude,
            name,
        } => {
            ensure_project_extension(&output)?;

            let mut field = Heightfield::new(width, height);
            field.fill(altitude);

            let name = name.unwrap_or_else(|| file_stem(&output));
            save_project(Path::new(&output), &name, &field)
                .with_context(|| format!("Failed to write project {output}"))?;

            println!("Created {width}x{height} project '{name}' in {output}");
        }
        Commands::Info { project } => {
            let (name, field) = load_project(Path::new(&project))
                .with_context(|| format!("Failed to read project {project}"))?;

            println!("Project '{name}': {}x{} cells", field.width(), field.height());
            match field.altitude_bounds() {
                Some((min, max)) => println!("Altitude range: {min} to {max}"),
                None => println!("Altitude range: empty field"),
            }
        }
        Commands::Edit { project } => {
            shell::run(Path::new(&project))?;
        }
        Commands::Export { project, o, c } => {
            let compression = parse_compression(&c);

            let (_, field) = load_project(Path::new(&project))
                .with_context(|| format!("Failed to read project {project}"))?;
            let bytes = tga::encode_field(&field, compression)?;
            std::fs::write(&o, &bytes).with_context(|| format!("Failed to write image {o}"))?;

            println!("Exported {project} to {o} ({} bytes)", bytes.len());
        }
        Commands::ExportAll { folder, o, c } => {
            let compression = parse_compression(&c);

            export_projects(&folder, &o, compression)?;

            println!("All projects exported");
        }
        Commands::Import { input, o, name } => {
            ensure_project_extension(&o)?;

            let bytes = std::fs::read(&input)
                .with_context(|| format!("Failed to read image {input}"))?;
            let decoded = tga::decode(&bytes)?;

            let cells = decoded.pixels.iter().map(|&p| p as f32 / 255.0).collect();
            let field = Heightfield::from_cells(decoded.width, decoded.height, cells);

            let name = name.unwrap_or_else(|| file_stem(&o));
            save_project(Path::new(&o), &name, &field)
                .with_context(|| format!("Failed to write project {o}"))?;

            println!("Imported {}x{} image into {o}", decoded.width, decoded.height);
        }
    }

    Ok(())
}

fn parse_compression(mode: &str) -> TgaCompression {
    match mode {
        "none" => TgaCompression::Uncompressed,
        "rle" => TgaCompression::RunLength,
        _ => panic!("Invalid compression. Allowed: none | rle"),
    }
}

// The batch exporter only picks up files carrying the project extension.
fn ensure_project_extension(path: &str) -> anyhow::Result<()> {
    let ok = Path::new(path)
        .extension()
        .map(|ext| ext == PROJECT_EXT)
        .unwrap_or(false);
    if !ok {
        bail!("Project files use the .{PROJECT_EXT} extension: {path}");
    }
    Ok(())
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("terrain")
        .to_string()
}
