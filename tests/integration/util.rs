use std::{ffi::OsString, path::Path, process::Command};

const BATSTAT_EXE_PATH: &str = env!("CARGO_BIN_EXE_batstat");
const DEFAULT_CFG: [&str; 2] = ["-C", "./tests/valid_configs/empty_config.toml"];

pub fn abs_path(path: &str) -> OsString {
    let path = Path::new(path);

    if path.exists() {
        path.canonicalize().unwrap().into_os_string()
    } else {
        // We are going to trust that the path given is valid...
        path.to_owned().into_os_string()
    }
}

/// Returns the [`Command`] of a binary invocation of batstat. Paths given to
/// `-C` and `--replay` are made absolute.
pub fn batstat_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(BATSTAT_EXE_PATH);

    let mut prev = "";
    for arg in args.iter() {
        if prev == "-C" || prev == "--replay" {
            cmd.arg(abs_path(arg));
        } else {
            cmd.arg(arg);
        }

        prev = arg;
    }

    cmd
}

/// Returns the [`Command`] of a binary invocation of batstat with the empty
/// config file, so the user's own config is never touched.
pub fn no_cfg_batstat_command() -> Command {
    batstat_command(&DEFAULT_CFG)
}

/// Like [`no_cfg_batstat_command`], replaying the given trace.
pub fn replay_command(trace: &str) -> Command {
    batstat_command(&[DEFAULT_CFG[0], DEFAULT_CFG[1], "--replay", trace])
}
