use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "svd2zig", about = "Generate Zig register definitions from SVD files", version)]
struct Opts {
    /// Input SVD file
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let input = File::open(&opts.input)
        .with_context(|| format!("cannot open {}", opts.input.display()))?;

    match &opts.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            svd2zig::generate(input, &mut out)
                .with_context(|| format!("cannot convert {}", opts.input.display()))?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            svd2zig::generate(input, &mut out)
                .with_context(|| format!("cannot convert {}", opts.input.display()))?;
            out.flush()?;
        }
    }

    Ok(())
}
