use anyhow::Context;
use heightfield::project::{load_project, PROJECT_EXT};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::{
    collections::VecDeque,
    fs::{create_dir_all, read_dir},
    path::Path,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};
use terracarve::tga::{encode_field, TgaCompression};

fn export_project_file(
    project_path: &Path,
    output_path: &str,
    compression: TgaCompression,
) -> anyhow::Result<()> {
    let (_, field) = load_project(project_path)?;
    let bytes = encode_field(&field, compression)?;

    let stem = project_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("terrain");
    let filename = format!("{output_path}/{stem}.tga");
    std::fs::write(&filename, &bytes).with_context(|| format!("Failed to write {filename}"))?;
    Ok(())
}

/// Render every project file in `input_path` to a TGA in `output_path`,
/// one worker per core pulling from a shared queue. A file that fails is
/// reported and skipped; the batch keeps going.
pub fn export_projects(
    input_path: &str,
    output_path: &str,
    compression: TgaCompression,
) -> anyhow::Result<()> {
    let project_files: Vec<_> = read_dir(input_path)
        .with_context(|| format!("Failed to read project folder {input_path}"))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().map(|ext| ext == PROJECT_EXT).unwrap_or(false)
                && path.metadata().map(|meta| meta.len() > 0).unwrap_or(false)
        })
        .collect();
    let file_count = project_files.len();

    let file_queue = Arc::new(Mutex::new(VecDeque::from(project_files)));
    let mut handles = Vec::new();

    create_dir_all(output_path)
        .with_context(|| format!("Failed to create output directory {output_path}"))?;

    let num_threads = thread::available_parallelism()?.get();

    // START: Progress bar

    let m = MultiProgress::new();

    let status_bar = m.add(ProgressBar::new_spinner());
    status_bar.set_style(
        ProgressStyle::with_template("[Worker {prefix}]: {spinner:.green} Exporting {msg}")
            .unwrap(),
    );
    status_bar.enable_steady_tick(Duration::from_millis(100));

    let main_bar = m.add(ProgressBar::new(file_count as u64));
    main_bar.set_style(ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len}").unwrap());

    let main_bar = Arc::new(main_bar);
    let status_bar = Arc::new(status_bar);

    // END: Progress bar

    for thread_idx in 0..num_threads {
        let main_bar = Arc::clone(&main_bar);
        let status_bar = Arc::clone(&status_bar);
        let file_queue = Arc::clone(&file_queue);

        let output_path = output_path.to_string();

        let handle = thread::spawn(move || loop {
            let path_opt = {
                let mut queue = file_queue.lock().unwrap();
                queue.pop_front()
            };

            let path = match path_opt {
                Some(p) => p,
                None => break,
            };

            status_bar.set_prefix(format!("{}/{}", thread_idx, num_threads));
            status_bar.set_message(format!("{:?}", path.file_name().unwrap()));

            if let Err(e) = export_project_file(&path, &output_path, compression) {
                eprintln!("Failed to export {}: {e}", path.display());
            }

            main_bar.inc(1);
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    main_bar.finish_with_message("Export finished");
    status_bar.finish_and_clear();

    Ok(())
}
