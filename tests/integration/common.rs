use std::{
    net::{Ipv4Addr, TcpListener as StdTcpListener},
    path::PathBuf,
    process::Stdio,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use tokio::{
    io::AsyncReadExt,
    net::TcpStream,
    process::{Child, ChildStdin, ChildStdout, Command},
    task::JoinHandle,
    time::sleep,
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_mcp-ui-server");
pub const VALID_CONFIG: &str = "tests/fixtures/config_valid.toml";

/// A spawned server binary whose stderr is drained in the background.
pub struct ServerProcess {
    pub child: Child,
    stderr_task: Option<JoinHandle<Vec<u8>>>,
}

impl ServerProcess {
    fn spawn(mut command: Command) -> Result<Self> {
        command
            .env("RUST_LOG", "warn")
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let mut child = command.spawn().context("failed to spawn server process")?;
        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf).await;
                buf
            })
        });
        Ok(Self { child, stderr_task })
    }

    /// Wait for the child to exit on its own and return its captured stderr.
    pub async fn finish(mut self) -> Result<(std::process::ExitStatus, String)> {
        let status = tokio::time::timeout(Duration::from_secs(5), self.child.wait())
            .await
            .context("server did not exit in time")??;
        Ok((status, self.take_stderr().await))
    }

    /// Terminate a long-running network server.
    pub async fn shutdown(mut self) -> Result<String> {
        self.child.kill().await.context("failed to kill server")?;
        Ok(self.take_stderr().await)
    }

    async fn take_stderr(&mut self) -> String {
        match self.stderr_task.take() {
            Some(task) => String::from_utf8_lossy(&task.await.unwrap_or_default()).into_owned(),
            None => String::new(),
        }
    }
}

/// Launch the binary in stdio mode; the returned pair is an rmcp transport.
pub fn spawn_stdio_server(config: &str) -> Result<(ServerProcess, (ChildStdout, ChildStdin))> {
    let mut command = Command::new(BINARY_PATH);
    command
        .env("MCP_CONFIG_PATH", fixture(config))
        .stdout(Stdio::piped())
        .stdin(Stdio::piped());
    let mut process = ServerProcess::spawn(command)?;
    let stdout = process.child.stdout.take().context("child stdout")?;
    let stdin = process.child.stdin.take().context("child stdin")?;
    Ok((process, (stdout, stdin)))
}

/// Launch the binary with `--transport <transport>` on a free loopback port
/// and wait until it accepts connections.
pub async fn spawn_network_server(transport: &str) -> Result<(ServerProcess, u16)> {
    let port = free_port()?;
    let mut command = Command::new(BINARY_PATH);
    command
        .arg("--config")
        .arg(fixture(VALID_CONFIG))
        .arg("--transport")
        .arg(transport)
        .arg("--port")
        .arg(port.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::null());
    let process = ServerProcess::spawn(command)?;
    wait_until_listening(port).await?;
    Ok((process, port))
}

fn free_port() -> Result<u16> {
    let listener = StdTcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
    Ok(listener.local_addr()?.port())
}

async fn wait_until_listening(port: u16) -> Result<()> {
    for _ in 0..100 {
        if TcpStream::connect((Ipv4Addr::LOCALHOST, port)).await.is_ok() {
            return Ok(());
        }
        sleep(Duration::from_millis(50)).await;
    }
    bail!("server never started listening on port {port}")
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}
