//! Utility functions for running external programs
use crate::{Error, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Run an external command with the given arguments, without waiting for it to exit.
///
/// This redirects the process stdin, stdout and stderr to /dev/null. The exit status of
/// the child is never collected: the window manager ignores SIGCHLD so that children
/// are reaped automatically.
pub fn spawn_with_args<S: AsRef<str>>(cmd: &[S]) -> Result<()> {
    let (prog, args) = match cmd.split_first() {
        Some((prog, args)) => (prog.as_ref(), args),
        None => return Err(Error::Custom("empty command".to_owned())),
    };

    debug!(%prog, "spawning subprocess");
    Command::new(prog)
        .args(args.iter().map(|a| a.as_ref()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(())
}

/// Stop the Caps Lock key from toggling the lock state so that it can be used as the
/// trigger key.
///
/// This must run before SIGCHLD is ignored as it waits for `setxkbmap` to exit.
pub fn disable_caps_lock() -> Result<()> {
    let status = Command::new("setxkbmap")
        .args(["-option", "caps:none"])
        .stdin(Stdio::null())
        .status()?;

    if !status.success() {
        return Err(Error::Custom(format!("setxkbmap failed: {status}")));
    }

    Ok(())
}
