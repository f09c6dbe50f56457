use std::{path::Path, process::Command};

use chrono::{Datelike, NaiveDate};
use serde_json::{Value, json};
use tempfile::TempDir;

fn bars_json() -> Value {
    // Weekdays Jan 2 .. Jan 31 2019, rising by 1 a day.
    let mut bars = Vec::new();
    let mut close = 100.0;
    for day in 1..=31u32 {
        let date = NaiveDate::from_ymd_opt(2019, 1, day).unwrap();
        if date.weekday().number_from_monday() > 5 || day == 1 {
            continue;
        }
        bars.push(json!({
            "date": date.to_string(),
            "open": close, "high": close + 1.0, "low": close - 1.0,
            "close": close, "volume": 1000
        }));
        close += 1.0;
    }
    json!({ "AAPL": bars.clone(), "SPY": bars })
}

fn run(dir: &Path, args: &[&str]) -> Value {
    let config = dir.join("dashboard.toml");
    std::fs::write(
        &config,
        "[series]\nmoving_average_periods = [5]\n[series.display]\nstart = \"2019-01-01\"\nend = \"2019-01-31\"\nwarmup_days = 0\n",
    )
    .unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_dashboard"))
        .env_remove("DASHBOARD_CONFIG")
        .env("RUST_LOG", "warn")
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("binary runs");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
}

#[test]
fn prices_command_prints_weekly_view() {
    let dir = TempDir::new().unwrap();
    let bars = dir.path().join("bars.json");
    std::fs::write(&bars, bars_json().to_string()).unwrap();

    let view = run(dir.path(), &["prices", "--bars", bars.to_str().unwrap(), "--symbol", "AAPL"]);
    let weekly = view["weekly"].as_array().unwrap();
    // Jan 2-4, 7-11, 14-18, 21-25, 28-31.
    assert_eq!(weekly.len(), 5);
    assert_eq!(weekly[0]["date"], "2019-01-04");
    assert_eq!(weekly[0]["volume"], 3000.0);
    assert_eq!(view["overlays"][0]["period"], 5);
}

#[test]
fn bubbles_final_only_prints_settled_layout() {
    let dir = TempDir::new().unwrap();
    let words = dir.path().join("words.json");
    let payload = json!({
        "top_words": [{"word": "up", "counts": 10, "average_score": 0.4}],
        "bottom_words": [{"word": "down", "counts": 30, "average_score": -0.4}],
        "adj_matrix": {"up": {"down": 5}, "down": {"up": 5}}
    });
    std::fs::write(&words, payload.to_string()).unwrap();

    let view = run(
        dir.path(),
        &["bubbles", "--words", words.to_str().unwrap(), "--steps", "20", "--final-only"],
    );
    assert_eq!(view["summary"]["steps"], 20);
    assert_eq!(view["graph"]["edges"].as_array().unwrap().len(), 1);
    assert_eq!(view["frame"]["nodes"][1]["word"], "down");
}
