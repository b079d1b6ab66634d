use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

/// Stamps `ZEALOT_VERSION`: the crate version, plus the short commit for
/// builds that are not a clean checkout of the matching tag.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let version = env!("CARGO_PKG_VERSION");
    let stamped = match git(&["rev-parse", "--short", "HEAD"]) {
        None => version.to_string(),
        Some(hash) if hash.is_empty() => version.to_string(),
        Some(hash) => {
            let clean = git(&["status", "--porcelain"]).is_some_and(|s| s.is_empty());
            let tagged = git(&["tag", "--points-at", "HEAD"]).is_some_and(|tags| {
                tags.lines()
                    .any(|t| t.trim_start_matches('v') == version)
            });
            if clean && tagged {
                version.to_string()
            } else {
                format!("{}+{}", version, hash)
            }
        }
    };

    println!("cargo:rustc-env=ZEALOT_VERSION={}", stamped);
}
