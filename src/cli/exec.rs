use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::DispatchError;

/// Replace the current process with `path`.
///
/// The child sees the executable's basename as `argv[0]`, then `args`, and
/// inherits the environment. Only returns when the exec itself fails.
#[cfg(unix)]
pub fn replace_process(path: &Path, args: &[OsString]) -> DispatchError {
    use std::os::unix::process::CommandExt;

    let arg0 = path.file_name().unwrap_or(path.as_os_str());
    let source = Command::new(path).arg0(arg0).args(args).exec();
    DispatchError::Exec {
        path: path.to_path_buf(),
        source,
    }
}

/// Without `exec`, run the child to completion and exit with its status.
#[cfg(not(unix))]
pub fn replace_process(path: &Path, args: &[OsString]) -> DispatchError {
    match Command::new(path).args(args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => DispatchError::Exec {
            path: path.to_path_buf(),
            source,
        },
    }
}
