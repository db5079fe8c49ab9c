use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn main() {
    // One describe call carries everything the version string needs: the
    // nearest tag, the distance from it, and the dirty flag. Tagged release
    // builds come out as just the tag.
    if let Some(describe) = git(&["describe", "--tags", "--always", "--dirty"]) {
        println!("cargo:rustc-env=SEBPATCH_BUILD_INFO={}", describe);
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
}
