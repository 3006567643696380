use crate::protocol::{Command, SOCKET_PATH};
use std::io::{self, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to connect to vitrine at {}: {source}. Is vitrine running?", path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn send_command(command: &Command) -> Result<(), ClientError> {
    send_to(Path::new(SOCKET_PATH), command)
}

pub fn send_to(path: &Path, command: &Command) -> Result<(), ClientError> {
    let mut stream = UnixStream::connect(path).map_err(|source| ClientError::Connect {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Sending '{}' to {}", command, path.display());
    writeln!(stream, "{}", command)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::os::unix::net::UnixListener;

    fn scratch_socket(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("vitrinectl-{}-{}.sock", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_send_writes_one_line() {
        let path = scratch_socket("send");
        let listener = UnixListener::bind(&path).unwrap();

        send_to(&path, &Command::Goto(2)).unwrap();

        let (stream, _) = listener.accept().unwrap();
        let mut line = String::new();
        BufReader::new(stream).read_line(&mut line).unwrap();
        assert_eq!(line, "goto 2\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_daemon_reports_path() {
        let path = scratch_socket("missing");
        let err = send_to(&path, &Command::Show).unwrap_err();
        assert!(matches!(err, ClientError::Connect { .. }));
        assert!(err.to_string().contains("Is vitrine running?"));
    }
}
