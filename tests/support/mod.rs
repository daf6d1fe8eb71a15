#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use serde_json::{json, Value};

/// Build a `td` command isolated to a temp data dir and the given backend.
pub fn td_cmd(data_dir: &Path, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("td").expect("td binary");
    cmd.env("TD_DATA_DIR", data_dir);
    cmd.env("TD_API_URL", api_url);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A task body as the Mongo-backed API returns it.
pub fn task_json(id: &str, title: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "",
        "status": status,
    })
}
