//! The interactive editing console: one command per line on stdin,
//! dispatched against the open project.

use anyhow::Context;
use heightfield::editor::FieldEditor;
use heightfield::grid::Heightfield;
use heightfield::project::{load_project, save_project};
use std::cell::Cell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use terracarve::tga::{encode_field, TgaCompression};

const HELP: &str = "\
Commands:
  set <x> <y> <altitude>           set one cell
  fill <altitude>                  set every cell
  raise <x> <y> <w> <h> <delta>    raise (or dig) a rectangle
  info                             show dimensions and altitude range
  save [path]                      write the project back to disk
  export <path> [rle]              render a grayscale TGA image
  help                             show this list
  quit                             leave; quit! discards unsaved changes";

pub fn run(project_path: &Path) -> anyhow::Result<()> {
    let (name, field) = load_project(project_path)
        .with_context(|| format!("Failed to read project {}", project_path.display()))?;

    let mut session = Session::new(name, field, project_path.to_path_buf());
    println!(
        "Editing '{}' ({}x{}). Type 'help' for commands.",
        session.name,
        session.editor.field().width(),
        session.editor.field().height()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF ends the session
        }
        if session.dispatch(line.trim()) == Outcome::Quit {
            break;
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Continue,
    Quit,
}

struct Session {
    editor: FieldEditor,
    name: String,
    path: PathBuf,
    dirty: Rc<Cell<bool>>,
}

impl Session {
    fn new(name: String, field: Heightfield, path: PathBuf) -> Session {
        let dirty = Rc::new(Cell::new(false));
        let mut editor = FieldEditor::new(field);
        editor.subscribe(Box::new({
            let dirty = Rc::clone(&dirty);
            move |_| dirty.set(true)
        }));
        Session {
            editor,
            name,
            path,
            dirty,
        }
    }

    fn dispatch(&mut self, line: &str) -> Outcome {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Outcome::Continue;
        };

        match command {
            "set" => self.cmd_set(args),
            "fill" => self.cmd_fill(args),
            "raise" => self.cmd_raise(args),
            "info" => self.cmd_info(),
            "save" => self.cmd_save(args),
            "export" => self.cmd_export(args),
            "help" => println!("{HELP}"),
            "quit" | "exit" => {
                if self.dirty.get() {
                    println!("Unsaved changes. 'save' first, or 'quit!' to discard them.");
                } else {
                    return Outcome::Quit;
                }
            }
            "quit!" | "exit!" => return Outcome::Quit,
            other => println!("Unknown command '{other}'. Type 'help' for the list."),
        }
        Outcome::Continue
    }

    fn cmd_set(&mut self, args: &[&str]) {
        let [x, y, altitude] = args else {
            println!("Usage: set <x> <y> <altitude>");
            return;
        };
        let (Ok(x), Ok(y), Some(altitude)) =
            (x.parse::<usize>(), y.parse::<usize>(), parse_altitude(altitude))
        else {
            println!("Usage: set <x> <y> <altitude>");
            return;
        };

        if self.editor.field().get(x, y).is_none() {
            let field = self.editor.field();
            println!(
                "({x}, {y}) is outside the {}x{} field",
                field.width(),
                field.height()
            );
            return;
        }
        self.editor.set_altitude(x, y, altitude);
        println!("Cell ({x}, {y}) set to {altitude}");
    }

    fn cmd_fill(&mut self, args: &[&str]) {
        let [altitude] = args else {
            println!("Usage: fill <altitude>");
            return;
        };
        let Some(altitude) = parse_altitude(altitude) else {
            println!("Usage: fill <altitude>");
            return;
        };

        self.editor.fill(altitude);
        println!("Filled every cell at {altitude}");
    }

    fn cmd_raise(&mut self, args: &[&str]) {
        let [x, y, width, height, delta] = args else {
            println!("Usage: raise <x> <y> <width> <height> <delta>");
            return;
        };
        let (Ok(x), Ok(y), Ok(width), Ok(height), Some(delta)) = (
            x.parse::<usize>(),
            y.parse::<usize>(),
            width.parse::<usize>(),
            height.parse::<usize>(),
            parse_altitude(delta),
        ) else {
            println!("Usage: raise <x> <y> <width> <height> <delta>");
            return;
        };

        self.editor.raise_rect(x, y, width, height, delta);
        println!("Raised {width}x{height} cells at ({x}, {y}) by {delta}");
    }

    fn cmd_info(&self) {
        let field = self.editor.field();
        let state = if self.dirty.get() {
            " (unsaved changes)"
        } else {
            ""
        };
        println!(
            "Project '{}': {}x{} cells{state}",
            self.name,
            field.width(),
            field.height()
        );
        match field.altitude_bounds() {
            Some((min, max)) => println!("Altitude range: {min} to {max}"),
            None => println!("Altitude range: empty field"),
        }
    }

    fn cmd_save(&mut self, args: &[&str]) {
        let path = match args {
            [] => self.path.clone(),
            [path] => PathBuf::from(path),
            _ => {
                println!("Usage: save [path]");
                return;
            }
        };

        match save_project(&path, &self.name, self.editor.field()) {
            Ok(()) => {
                self.dirty.set(false);
                self.path = path;
                println!("Saved {}", self.path.display());
            }
            Err(e) => println!("Save failed: {e}"),
        }
    }

    fn cmd_export(&self, args: &[&str]) {
        let (path, compression) = match args {
            [path] => (path, TgaCompression::Uncompressed),
            [path, "rle"] => (path, TgaCompression::RunLength),
            _ => {
                println!("Usage: export <path> [rle]");
                return;
            }
        };

        let bytes = match encode_field(self.editor.field(), compression) {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("Export failed: {e}");
                return;
            }
        };
        match std::fs::write(path, &bytes) {
            Ok(()) => println!("Wrote {path} ({} bytes)", bytes.len()),
            Err(e) => println!("Export failed: {e}"),
        }
    }
}

// f32 parsing accepts inf and NaN, which no project file can store.
fn parse_altitude(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|a| a.is_finite())
}
