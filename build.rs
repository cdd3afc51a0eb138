use std::process::Command;

fn main() {
    println!("cargo:rustc-env=GIT_HASH={}", git_describe());
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}

/// Short commit hash for the startup banner, "-dirty" suffixed when the
/// working tree has uncommitted changes. "unknown" outside a git checkout.
fn git_describe() -> String {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string());

    let Some(hash) = hash else {
        return "unknown".to_string();
    };

    let dirty = Command::new("git")
        .args(["diff", "--quiet"])
        .output()
        .map(|o| !o.status.success())
        .unwrap_or(false);

    if dirty { format!("{hash}-dirty") } else { hash }
}
