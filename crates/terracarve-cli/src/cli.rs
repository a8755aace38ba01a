use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "terracarve")]
#[command(about = "A console terrain editor with grayscale TGA export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
pub enum Commands {
    /// Create a fresh project file
    New {
        /// Project file to create
        output: String,
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
        /// Starting altitude for every cell
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = finite_altitude)]
        altitude: f32,
        /// Project name stored in the file (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Print a project's dimensions and altitude range
    Info {
        /// Project file to inspect
        project: String,
    },
    /// Open a project in the interactive console
    Edit {
        /// Project file to open
        project: String,
    },
    /// Render one project to a grayscale TGA image
    Export {
        /// Project file to render
        project: String,
        /// Output file (TGA)
        #[arg(short, long)]
        o: String,
        /// Pixel-data compression
        #[arg(short, long, default_value = "none", value_parser = clap::builder::PossibleValuesParser::new(["none", "rle"]))]
        c: String,
    },
    /// Render every project in a folder to TGA images
    ExportAll {
        /// Input folder containing project files
        folder: String,
        /// Output directory
        #[arg(short, long)]
        o: String,
        /// Pixel-data compression
        #[arg(short, long, default_value = "none", value_parser = clap::builder::PossibleValuesParser::new(["none", "rle"]))]
        c: String,
    },
    /// Turn a grayscale TGA image into a project
    Import {
        /// Image file to read
        input: String,
        /// Project file to create
        #[arg(short, long)]
        o: String,
        /// Project name stored in the file (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,
    },
}

// f32 parsing accepts inf and NaN, which no project file can store.
fn finite_altitude(token: &str) -> Result<f32, String> {
    match token.parse::<f32>() {
        Ok(altitude) if altitude.is_finite() => Ok(altitude),
        Ok(_) => Err(format!("'{token}' is not a finite altitude")),
        Err(e) => Err(e.to_string()),
    }
}
