use geojson_reader::output::{Operation, Output};
use geojson_reader::{read_features_from, read_from};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(StructOpt, Debug)]
#[structopt(name = "geojson_reader", about = "Decode GeoJSON documents and report on their geometries")]
struct Opt {
    /// Keep features apart and print their properties, instead of collapsing
    /// the document into one geometry
    #[structopt(short, long)]
    features: bool,

    /// One of: summary, area, centroid, envelope, count
    #[structopt(short, long, default_value = "summary")]
    op: Operation,

    /// GeoJSON file, `-` reads from stdin
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn open(input: &Path) -> Result<Box<dyn Read>, Box<dyn Error>> {
    if input.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(input)?;
    Ok(Box::new(file))
}

fn main() -> Result<(), Box<dyn Error>> {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,geojson_reader=info".into());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let opt = Opt::from_args();
    let reader = BufReader::new(open(&opt.input)?);
    let stdout = io::stdout();
    let mut handle = BufWriter::new(stdout.lock());

    if opt.features {
        let features = read_features_from(reader)?;
        info!(features = features.len(), "decoded {}", opt.input.display());
        features.write_json_lines(opt.op, &mut handle)?;
    } else {
        let geometry = read_from(reader)?;
        info!(kind = geometry.kind().as_str(), "decoded {}", opt.input.display());
        geometry.write_json_lines(opt.op, &mut handle)?;
    }
    Ok(())
}
