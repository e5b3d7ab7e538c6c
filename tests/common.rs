#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use httptest::Server;
use shifttrack::api::WebhookClient;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch directory holding an isolated config file and session database.
pub struct TestEnv {
    pub dir: TempDir,
    pub db: String,
    pub config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir
            .path()
            .join("shifttrack.sqlite")
            .to_string_lossy()
            .to_string();
        let config = dir.path().join("shifttrack.conf");
        Self { dir, db, config }
    }

    /// The binary, pointed at this environment's config and database.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("shifttrack");
        cmd.env("SHIFTTRACK_CONFIG", &self.config)
            .env_remove("SHIFTTRACK_PASSWORD")
            .env_remove("SHIFTTRACK_LOG")
            .args(["--db", &self.db]);
        cmd
    }

    /// Same as [`cmd`](Self::cmd), talking to `server`.
    pub fn cmd_for(&self, server: &Server) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--webhook-base", &webhook_base(server)]);
        cmd
    }

    pub fn write_config(&self, yaml: &str) {
        fs::write(&self.config, yaml).expect("write config");
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub fn webhook_base(server: &Server) -> String {
    server.url_str("/webhook")
}

pub fn client_for(server: &Server) -> WebhookClient {
    WebhookClient::builder()
        .base(webhook_base(server))
        .account("id_subcuenta", "acc-1")
        .build()
        .expect("build client")
}
