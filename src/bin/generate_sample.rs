use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use clap::{Parser, ValueEnum};
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rusty_traffic::data::model::DatasetLabel;

/// Write a real and three synthetic traffic datasets for the dashboard.
#[derive(Debug, Parser)]
struct Args {
    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Rows per dataset.
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Parquet,
}

/// Generator parameters. Synthetic variants drift from the real profile.
struct Profile {
    dur_mu: f64,
    pkt_mu: f64,
    bytes_per_pkt: f64,
    /// Weights for tcp, udp, icmp, arp.
    proto_weights: [f64; 4],
    noise: f64,
}

const PROTOCOLS: [&str; 4] = ["tcp", "udp", "icmp", "arp"];

fn profile(label: DatasetLabel) -> Profile {
    match label {
        DatasetLabel::Real => Profile {
            dur_mu: -1.0,
            pkt_mu: 2.5,
            bytes_per_pkt: 420.0,
            proto_weights: [0.62, 0.30, 0.05, 0.03],
            noise: 0.15,
        },
        DatasetLabel::Ctgan => Profile {
            dur_mu: -0.8,
            pkt_mu: 2.3,
            bytes_per_pkt: 390.0,
            proto_weights: [0.55, 0.35, 0.07, 0.03],
            noise: 0.25,
        },
        DatasetLabel::TableGan => Profile {
            dur_mu: -1.3,
            pkt_mu: 2.8,
            bytes_per_pkt: 470.0,
            proto_weights: [0.70, 0.25, 0.03, 0.02],
            noise: 0.30,
        },
        DatasetLabel::Custom => Profile {
            dur_mu: -1.05,
            pkt_mu: 2.45,
            bytes_per_pkt: 430.0,
            proto_weights: [0.60, 0.31, 0.06, 0.03],
            noise: 0.18,
        },
    }
}

/// Box-Muller transform for a standard normal draw.
fn gauss(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn pick_protocol(rng: &mut impl Rng, weights: &[f64; 4]) -> &'static str {
    let total: f64 = weights.iter().sum();
    let mut x = rng.gen::<f64>() * total;
    for (proto, w) in PROTOCOLS.iter().zip(weights) {
        if x < *w {
            return *proto;
        }
        x -= w;
    }
    PROTOCOLS[0]
}

#[derive(Default)]
struct Columns {
    timestamp: Vec<i64>,
    proto: Vec<&'static str>,
    dur: Vec<f64>,
    spkts: Vec<i64>,
    dpkts: Vec<i64>,
    sbytes: Vec<i64>,
    dbytes: Vec<i64>,
    rate: Vec<f64>,
    sload: Vec<f64>,
    dload: Vec<f64>,
}

fn generate(label: DatasetLabel, rows: usize, rng: &mut StdRng) -> Columns {
    let p = profile(label);
    let mut c = Columns::default();
    let start: i64 = 1_700_000_000;

    for i in 0..rows {
        // Timestamps roughly ordered with jitter, so rows need sorting.
        let ts = start + i as i64 * 2 + (gauss(rng) * 3.0).round() as i64;
        let dur = (p.dur_mu + gauss(rng)).exp();
        let spkts = ((p.pkt_mu + 0.8 * gauss(rng)).exp().round() as i64).max(1);
        let dpkts = ((p.pkt_mu - 0.2 + 0.8 * gauss(rng)).exp().round() as i64).max(0);
        let scale = |rng: &mut StdRng| (1.0 + p.noise * gauss(rng)).max(0.1);
        let sbytes = (spkts as f64 * p.bytes_per_pkt * scale(rng)).round() as i64;
        let dbytes = (dpkts as f64 * p.bytes_per_pkt * 1.4 * scale(rng)).round() as i64;

        c.timestamp.push(ts);
        c.proto.push(pick_protocol(rng, &p.proto_weights));
        c.dur.push(dur);
        c.spkts.push(spkts);
        c.dpkts.push(dpkts);
        c.sbytes.push(sbytes);
        c.dbytes.push(dbytes);
        c.rate.push((spkts + dpkts - 1).max(0) as f64 / dur);
        c.sload.push(sbytes as f64 * 8.0 / dur);
        c.dload.push(dbytes as f64 * 8.0 / dur);
    }
    c
}

const HEADERS: [&str; 10] = [
    "timestamp", "proto", "dur", "spkts", "dpkts", "sbytes", "dbytes", "rate", "sload", "dload",
];

fn write_csv(path: &Path, c: &Columns) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(HEADERS)?;
    for i in 0..c.timestamp.len() {
        writer.write_record([
            c.timestamp[i].to_string(),
            c.proto[i].to_string(),
            format!("{:.6}", c.dur[i]),
            c.spkts[i].to_string(),
            c.dpkts[i].to_string(),
            c.sbytes[i].to_string(),
            c.dbytes[i].to_string(),
            format!("{:.4}", c.rate[i]),
            format!("{:.4}", c.sload[i]),
            format!("{:.4}", c.dload[i]),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, c: Columns) -> Result<()> {
    let batch = RecordBatch::try_from_iter([
        ("timestamp", Arc::new(Int64Array::from(c.timestamp)) as ArrayRef),
        ("proto", Arc::new(StringArray::from(c.proto)) as ArrayRef),
        ("dur", Arc::new(Float64Array::from(c.dur)) as ArrayRef),
        ("spkts", Arc::new(Int64Array::from(c.spkts)) as ArrayRef),
        ("dpkts", Arc::new(Int64Array::from(c.dpkts)) as ArrayRef),
        ("sbytes", Arc::new(Int64Array::from(c.sbytes)) as ArrayRef),
        ("dbytes", Arc::new(Int64Array::from(c.dbytes)) as ArrayRef),
        ("rate", Arc::new(Float64Array::from(c.rate)) as ArrayRef),
        ("sload", Arc::new(Float64Array::from(c.sload)) as ArrayRef),
        ("dload", Arc::new(Float64Array::from(c.dload)) as ArrayRef),
    ])
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    for label in DatasetLabel::ALL {
        let columns = generate(label, args.rows, &mut rng);
        let path = match args.format {
            Format::Csv => {
                let path = args.out_dir.join(format!("{}.csv", label.file_stem()));
                write_csv(&path, &columns)?;
                path
            }
            Format::Parquet => {
                let path = args.out_dir.join(format!("{}.parquet", label.file_stem()));
                write_parquet(&path, columns)?;
                path
            }
        };
        println!("Wrote {} rows of {label} to {}", args.rows, path.display());
    }
    Ok(())
}
