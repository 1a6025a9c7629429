//! Relative path computation between documents of a site.
//!
//! All paths are root-relative and `/`-separated. Segment lists passed to
//! [`ref_relative_path`] hold directory names only; the file name travels
//! separately as the leaf.

use std::collections::BTreeMap;

/// Split a link into its path and optional `#fragment`.
///
/// # Examples
///
/// ```
/// use quire_paths::split_fragment;
///
/// assert_eq!(split_fragment("a.html#top"), ("a.html", Some("top")));
/// assert_eq!(split_fragment("a.html"), ("a.html", None));
/// ```
pub fn split_fragment(link: &str) -> (&str, Option<&str>) {
    match link.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (link, None),
    }
}

/// Relative path from a document back to the site root.
///
/// Emits one `../` per `/` in `path`. The path is not canonicalized, so
/// `.` and `..` segments are counted like any other directory.
///
/// # Examples
///
/// ```
/// use quire_paths::base_path;
///
/// assert_eq!(base_path("a/b/c.html"), "../../");
/// assert_eq!(base_path("index.html"), "");
/// ```
pub fn base_path(path: &str) -> String {
    "../".repeat(path.matches('/').count())
}

/// Final `/`-delimited segment of `path`.
pub fn leaf(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, leaf)| leaf)
}

/// Directory segments of `path`, excluding the leaf.
///
/// Empty segments (leading, doubled or trailing slashes) are skipped.
///
/// # Examples
///
/// ```
/// use quire_paths::directories;
///
/// assert_eq!(directories("a/b/c.html"), vec!["a", "b"]);
/// assert!(directories("c.html").is_empty());
/// ```
pub fn directories(path: &str) -> Vec<&str> {
    let dir = path.rsplit_once('/').map_or("", |(dir, _)| dir);
    dir.split('/').filter(|s| !s.is_empty()).collect()
}

/// Recover the root prefix of `full_path` given its known local suffix.
///
/// Returns `full_path` unchanged when it does not end with `local_path`.
///
/// # Examples
///
/// ```
/// use quire_paths::relative_root_path;
///
/// assert_eq!(
///     relative_root_path("site/docs/guide.html", "docs/guide.html"),
///     "site/"
/// );
/// ```
pub fn relative_root_path<'a>(full_path: &'a str, local_path: &str) -> &'a str {
    full_path.strip_suffix(local_path).unwrap_or(full_path)
}

/// Relativize `full_path` against the directory `root_path`.
///
/// `root_path` is treated as a directory whether or not it ends with `/`.
/// When `full_path` lies outside it, `full_path` is returned unchanged. The
/// fragment of `full_path` is kept.
///
/// # Examples
///
/// ```
/// use quire_paths::relative_local_path;
///
/// assert_eq!(relative_local_path("docs/", "docs/api/index.html"), "api/index.html");
/// assert_eq!(relative_local_path("docs", "blog/post.html"), "blog/post.html");
/// ```
pub fn relative_local_path(root_path: &str, full_path: &str) -> String {
    let (path, fragment) = split_fragment(full_path);
    let root = root_path.trim_end_matches('/');
    if root.is_empty() {
        return full_path.to_owned();
    }

    let Some(rest) = path
        .strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return full_path.to_owned();
    };

    match fragment {
        Some(fragment) => format!("{rest}#{fragment}"),
        None => rest.to_owned(),
    }
}

/// Shortest relative path between two documents of the same forest.
///
/// Leading segments shared by `root_segments` and `path_segments` are skipped.
/// Each remaining root segment becomes a `..`, followed by the remaining
/// target segments and finally `leaf_file`.
///
/// # Examples
///
/// ```
/// use quire_paths::ref_relative_path;
///
/// assert_eq!(ref_relative_path(&["a", "b"], &["a", "c"], "x.html"), "../c/x.html");
/// assert_eq!(ref_relative_path(&["a", "b"], &["a", "b"], "x.html"), "x.html");
/// ```
pub fn ref_relative_path<R, P>(root_segments: &[R], path_segments: &[P], leaf_file: &str) -> String
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    let common = root_segments
        .iter()
        .zip(path_segments)
        .take_while(|(a, b)| a.as_ref() == b.as_ref())
        .count();

    let ups = root_segments.len() - common;
    let mut parts: Vec<&str> = Vec::with_capacity(ups + path_segments.len() - common + 1);
    parts.extend(std::iter::repeat_n("..", ups));
    parts.extend(path_segments[common..].iter().map(AsRef::as_ref));
    parts.push(leaf_file);

    parts.join("/")
}

/// Link from the document at `from_path` to `to_link`.
///
/// Both arguments are root-relative output paths; the fragment of `to_link`
/// is carried over.
///
/// # Examples
///
/// ```
/// use quire_paths::relative_link;
///
/// assert_eq!(relative_link("a/b/page.html", "a/other.html"), "../other.html");
/// assert_eq!(relative_link("a/page.html", "a/page.html#intro"), "page.html#intro");
/// ```
pub fn relative_link(from_path: &str, to_link: &str) -> String {
    let (to_path, fragment) = split_fragment(to_link);
    let path = ref_relative_path(&directories(from_path), &directories(to_path), leaf(to_path));
    match fragment {
        Some(fragment) => format!("{path}#{fragment}"),
        None => path,
    }
}

/// Rewrite a site-wide source→target mapping relative to one document.
///
/// Keys are made relative to the directory of `local_path` (a source path);
/// values are made relative to the directory of the local document's target,
/// looked up in `global_mappings` (falling back to `local_path` when the local
/// document is not mapped). Each side is computed independently, since source
/// and target trees may differ in depth.
pub fn relative_mapping(
    local_path: &str,
    global_mappings: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let local_target = global_mappings
        .get(local_path)
        .map_or(local_path, String::as_str);
    let source_root = directories(local_path);
    let target_root = directories(local_target);

    global_mappings
        .iter()
        .map(|(source, target)| {
            (
                ref_relative_path(&source_root, &directories(source), leaf(source)),
                ref_relative_path(&target_root, &directories(target), leaf(target)),
            )
        })
        .collect()
}
