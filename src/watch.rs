use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};

use notify::EventKind;

/// Watches the directories holding `files` and reports changes to any of them.
///
/// Directories are watched rather than the files themselves so editors that save by
/// replacing the file still trigger a reload.
pub fn spawn_file_watcher(files: Vec<PathBuf>) -> Receiver<PathBuf> {
    let (tx, rx) = channel::<PathBuf>();
    std::thread::spawn(move || {
        use notify::{RecursiveMode, Watcher};
        let watched = files.clone();
        let watcher = notify::recommended_watcher(
            move |res: Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    if !is_change(&event.kind) {
                        return;
                    }
                    for p in event.paths {
                        if watched.iter().any(|w| same_file_name(w, &p)) {
                            let _ = tx.send(p);
                        }
                    }
                }
                Err(e) => log::warn!("watch error: {}", e),
            },
        );
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                log::warn!("file watcher unavailable: {}", e);
                return;
            }
        };
        let mut dirs: Vec<PathBuf> = files.iter().map(|f| watch_dir(f)).collect();
        dirs.sort();
        dirs.dedup();
        for dir in &dirs {
            match watcher.watch(dir, RecursiveMode::NonRecursive) {
                Ok(()) => log::info!("watching {}", dir.display()),
                Err(e) => log::warn!("cannot watch {}: {}", dir.display(), e),
            }
        }
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}

fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any
    )
}

fn watch_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn same_file_name(watched: &Path, changed: &Path) -> bool {
    watched.file_name().is_some() && watched.file_name() == changed.file_name()
}
