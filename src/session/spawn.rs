//! Process spawning utilities

use std::fs::OpenOptions;
use std::io;
use std::os::fd::AsFd;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use rustix::fs::{fcntl_getfl, fcntl_setfl, OFlags};

/// Spawn `command` through the shell with stdin and stdout piped and
/// stderr appended to the sink file.
///
/// When `environment` is provided it replaces the inherited environment
/// wholesale; otherwise the child sees the parent's environment.
pub(crate) fn spawn_shell(
    command: &str,
    working_dir: &Path,
    environment: Option<&[(String, String)]>,
    err_sink: &Path,
) -> io::Result<Child> {
    let sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(err_sink)?;

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .current_dir(working_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::from(sink));

    if let Some(vars) = environment {
        cmd.env_clear();
        cmd.envs(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    cmd.spawn()
}

/// Put a pipe into non-blocking mode so reads return immediately
/// instead of suspending when no data is available.
pub(crate) fn set_nonblocking(fd: &impl AsFd) -> io::Result<()> {
    let flags = fcntl_getfl(fd)?;
    fcntl_setfl(fd, flags | OFlags::NONBLOCK)?;
    Ok(())
}

/// Check if a child process is still executing.
///
/// An already-reaped or exited child reports false; probing never
/// fails from the caller's perspective.
pub(crate) fn is_alive(child: &mut Child) -> bool {
    matches!(child.try_wait(), Ok(None))
}
