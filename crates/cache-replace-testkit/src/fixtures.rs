//! Partial source fixtures on disk

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `source` as the file for partial `name` under `dir`
///
/// Uses the default layout: `users/row` becomes `dir/users/_row.html`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_partial(dir: &Path, name: &str, source: &str) -> PathBuf {
    let name = Path::new(name);
    let file_name = name
        .file_name()
        .expect("partial name must end in a file name")
        .to_string_lossy();

    let mut path = dir.to_path_buf();
    if let Some(parent) = name.parent() {
        path.push(parent);
    }
    std::fs::create_dir_all(&path).expect("Failed to create partial directory");

    path.push(format!("_{}.html", file_name));
    std::fs::write(&path, source).expect("Failed to write partial");
    path
}

/// Directory holding a small set of partials with markers
///
/// - `container`: `<div class="box"><cr inner></div>`
/// - `inner`: `<p>{{ greeting }}</p>`
/// - `footer`: `<footer>{{ site }}</footer>`
/// - `users/row`: `<li data-id="<cr id>"><cr name></li>`
pub fn sample_partials_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temporary directory");
    let dir = temp.path();

    write_partial(dir, "container", r#"<div class="box"><cr inner></div>"#);
    write_partial(dir, "inner", "<p>{{ greeting }}</p>");
    write_partial(dir, "footer", "<footer>{{ site }}</footer>");
    write_partial(dir, "users/row", r#"<li data-id="<cr id>"><cr name></li>"#);

    temp
}
