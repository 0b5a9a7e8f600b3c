use std::collections::HashSet;
use std::path::Path;

/// Strip the final extension from a display name (`photo.jpeg` -> `photo`).
///
/// Names without an extension pass through unchanged; a name that strips to
/// nothing falls back to a positional `image-N`.
pub(crate) fn output_stem(display_name: &str, index: usize) -> String {
    let stem = Path::new(display_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    if stem.is_empty() {
        format!("image-{}", index + 1)
    } else {
        stem.to_string()
    }
}

/// Assign final archive entry names in input order.
///
/// Stems can collide after extension stripping (two sources differing only
/// by original extension). Collisions get a deterministic numeric suffix
/// (`a.jpg`, `a-2.jpg`, `a-3.jpg`, ...), checked against every name already
/// assigned so a literal `a-2` source cannot re-collide.
pub(crate) fn assign_entry_names(stems: &[String], ext: &str) -> Vec<String> {
    let mut used = HashSet::new();
    let mut out = Vec::with_capacity(stems.len());
    for stem in stems {
        let mut name = format!("{stem}.{ext}");
        let mut n = 1u32;
        while !used.insert(name.clone()) {
            n += 1;
            name = format!("{stem}-{n}.{ext}");
        }
        out.push(name);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/names.rs"]
mod tests;
