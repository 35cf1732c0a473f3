#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use manetracker::models::{Cost, Currency, GeoLocation, HaircutFields};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated home directory plus database for one CLI test.
pub struct TestEnv {
    pub dir: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let db = dir
            .path()
            .join("manetracker.sqlite")
            .to_string_lossy()
            .to_string();
        Self { dir, db }
    }

    /// `manetracker --db <db>` with HOME pointing inside the temp dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("manetracker");
        cmd.env("HOME", self.dir.path())
            .args(["--db", &self.db]);
        cmd
    }

    /// Run `init` and `login`.
    pub fn ready(&self) -> &Self {
        self.cmd().args(["--test", "init"]).assert().success();
        self.cmd().arg("login").assert().success();
        self
    }

    /// Write a small fake image file and return its path.
    pub fn image(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("fake image bytes for {name}")).expect("write image");
        path
    }
}

pub fn fields(date: &str, style: &str) -> HaircutFields {
    HaircutFields::new(date, style)
}

/// A record with every optional field filled in.
pub fn full_fields(date: &str, style: &str) -> HaircutFields {
    HaircutFields {
        date: date.into(),
        style: style.into(),
        notes: Some("Short on the sides, longer on top".into()),
        images: vec!["data:image/png;base64,AAAA".into()],
        location: Some(GeoLocation {
            address: "456 King St W, Toronto, ON".into(),
            lat: 43.6441,
            lng: -79.3982,
        }),
        rating: Some(8.5),
        barbershop: Some("Uncle Barber".into()),
        barber: Some("Marco".into()),
        cost: Some(Cost {
            amount: 35.0,
            currency: Currency::parse("USD").expect("currency"),
        }),
    }
}

pub fn rated(date: &str, style: &str, rating: Option<f64>) -> HaircutFields {
    HaircutFields {
        rating,
        ..fields(date, style)
    }
}

pub fn costing(date: &str, style: &str, amount: Option<f64>) -> HaircutFields {
    HaircutFields {
        cost: amount.map(|amount| Cost {
            amount,
            currency: Currency::default(),
        }),
        ..fields(date, style)
    }
}
