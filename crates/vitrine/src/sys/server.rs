use crate::events::AppEvent;
use async_channel::Sender;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;
use vitrinectl::protocol::{Command, SOCKET_PATH};

fn parse_line(line: &str) -> Option<AppEvent> {
    if line.trim().is_empty() {
        return None;
    }
    match line.parse::<Command>() {
        Ok(command) => Some(AppEvent::from(command)),
        Err(e) => {
            log::warn!("Ignoring control command {:?}: {}", line.trim(), e);
            None
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    serve(Path::new(SOCKET_PATH), tx).await;
}

pub async fn serve(socket_path: &Path, tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(socket_path).is_ok() {
        let _ = std::fs::remove_file(socket_path);
    }

    let listener = match UnixListener::bind(socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::debug!("Control socket listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if let Some(event) = parse_line(&line)
                            && tx.send(event).await.is_err()
                        {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::UnixStream;
    use vitrinectl::appearance::Theme;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("show"), Some(AppEvent::Show));
        assert_eq!(parse_line("theme dark"), Some(AppEvent::SetTheme(Theme::Dark)));
        assert_eq!(parse_line("reload"), Some(AppEvent::ConfigReload));
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("explode"), None);
    }

    #[tokio::test]
    async fn test_serve_forwards_commands() {
        let path = std::env::temp_dir().join(format!("vitrine-test-{}.sock", std::process::id()));
        let (tx, rx) = async_channel::unbounded();

        let server_path = path.clone();
        let server = tokio::spawn(async move { serve(&server_path, tx).await });

        let mut stream = loop {
            match UnixStream::connect(&path).await {
                Ok(s) => break s,
                Err(_) => tokio::time::sleep(std::time::Duration::from_millis(10)).await,
            }
        };
        stream.write_all(b"goto 2\nbogus\nhide\n").await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), AppEvent::Goto(2));
        assert_eq!(rx.recv().await.unwrap(), AppEvent::Hide);

        server.abort();
        let _ = std::fs::remove_file(&path);
    }
}
