use std::process::Command;

const GIT_COMMAND: &str = "git";
const GIT_ARGS: [&str; 3] = ["log", "-1", "--format=%h %cs"];

const DEFAULT_HASH: &str = "0000000";
const DEFAULT_DATE: &str = "0000-00-00";

fn main() {
    let (hash, date) = git_info().unwrap_or_else(|| (DEFAULT_HASH.to_string(), DEFAULT_DATE.to_string()));
    println!("cargo:rustc-env=BUILD_HASH={hash}");
    println!("cargo:rustc-env=BUILD_DATE={date}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}

/// Returns the abbreviated hash and commit date of `HEAD`, or `None` if either is
/// unavailable, such as when building outside of a repository.
fn git_info() -> Option<(String, String)> {
    let out = match Command::new(GIT_COMMAND).args(GIT_ARGS).output() {
        Ok(out) if out.status.success() => out,
        Ok(out) => {
            eprintln!("[{GIT_COMMAND} {}]: {}", GIT_ARGS.join(" "), out.status);
            return None;
        }
        Err(e) => {
            eprintln!("[{GIT_COMMAND} {}]: {e}", GIT_ARGS.join(" "));
            return None;
        }
    };
    let s = String::from_utf8(out.stdout).ok()?;
    s.trim()
        .split_once(' ')
        .map(|(hash, date)| (hash.to_string(), date.to_string()))
}
